// Netlify REST API HTTP client
//
// Base path: https://api.netlify.com/api/v1/
// Auth: `Authorization: Bearer <token>` default header
//
// Every endpoint is a fixed template relative to the base URL. `{site_id}`
// and `{account_id}` are substituted segment by segment from the call or the
// configured defaults before the GET is issued.

use secrecy::SecretString;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::models::{Account, Build, BuildStatus, Deploy, Form, Site, Submission};
use crate::transport::TransportConfig;

/// Default Netlify API root.
pub const DEFAULT_BASE_URL: &str = "https://api.netlify.com/api/v1";

// ── Endpoint templates ───────────────────────────────────────────────

pub const SITES: &str = "sites";
pub const SITE_BUILDS: &str = "sites/{site_id}/builds";
pub const SITE_DEPLOYS: &str = "sites/{site_id}/deploys";
pub const SITE_FORMS: &str = "sites/{site_id}/forms";
pub const SITE_SUBMISSIONS: &str = "sites/{site_id}/submissions";
pub const ACCOUNT_BUILD_STATUS: &str = "{account_id}/builds/status";
pub const ACCOUNTS: &str = "accounts";

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the Netlify REST API.
///
/// Holds no per-call state: the inner `reqwest::Client` is a connection
/// pool and is safe to share across concurrent requests. Clone it freely.
#[derive(Debug, Clone)]
pub struct NetlifyClient {
    http: reqwest::Client,
    base_url: Url,
    account_id: String,
    default_site_id: String,
}

impl NetlifyClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a bearer token and transport config.
    pub fn new(
        base_url: &str,
        token: &SecretString,
        account_id: impl Into<String>,
        default_site_id: impl Into<String>,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client(token)?;
        Self::from_reqwest(base_url, http, account_id, default_site_id)
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(
        base_url: &str,
        http: reqwest::Client,
        account_id: impl Into<String>,
        default_site_id: impl Into<String>,
    ) -> Result<Self, Error> {
        Ok(Self {
            http,
            base_url: normalize_base_url(base_url)?,
            account_id: account_id.into(),
            default_site_id: default_site_id.into(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    pub fn default_site_id(&self) -> &str {
        &self.default_site_id
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Resolve a template into a full URL.
    ///
    /// An empty `site_id` falls back to the configured default site. Ids are
    /// pushed as single percent-encoded path segments, so `/`, `?` and `#`
    /// inside an id never change the endpoint; `.` and `..` are rejected.
    pub fn endpoint(&self, template: &str, site_id: &str) -> Result<Url, Error> {
        let site = if site_id.is_empty() {
            self.default_site_id.as_str()
        } else {
            site_id
        };

        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?;
            segments.pop_if_empty();
            for part in template.split('/') {
                let segment = match part {
                    "{site_id}" => site,
                    "{account_id}" => self.account_id.as_str(),
                    literal => literal,
                };
                if matches!(segment, "." | "..") {
                    return Err(Error::InvalidSiteId {
                        site_id: segment.to_owned(),
                    });
                }
                segments.push(segment);
            }
        }
        Ok(url)
    }

    // ── Request helper ───────────────────────────────────────────────

    /// Issue one authenticated GET and decode the JSON body.
    pub async fn get<T: DeserializeOwned>(&self, template: &str, site_id: &str) -> Result<T, Error> {
        let url = self.endpoint(template, site_id)?;
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        if status.is_client_error() || status.is_server_error() {
            debug!(status = status.as_u16(), "upstream rejected request");
            return Err(Error::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
            }
        })
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// `GET /sites` (account-wide)
    pub async fn list_sites(&self) -> Result<Vec<Site>, Error> {
        self.get(SITES, "").await
    }

    /// `GET /sites/{site_id}/builds`
    pub async fn list_builds(&self, site_id: &str) -> Result<Vec<Build>, Error> {
        self.get(SITE_BUILDS, site_id).await
    }

    /// `GET /sites/{site_id}/deploys`
    pub async fn list_deploys(&self, site_id: &str) -> Result<Vec<Deploy>, Error> {
        self.get(SITE_DEPLOYS, site_id).await
    }

    /// `GET /sites/{site_id}/forms`
    pub async fn list_forms(&self, site_id: &str) -> Result<Vec<Form>, Error> {
        self.get(SITE_FORMS, site_id).await
    }

    /// `GET /sites/{site_id}/submissions`
    pub async fn list_submissions(&self, site_id: &str) -> Result<Vec<Submission>, Error> {
        self.get(SITE_SUBMISSIONS, site_id).await
    }

    /// `GET /{account_id}/builds/status`, scoped by the configured account.
    pub async fn build_status(&self) -> Result<BuildStatus, Error> {
        self.get(ACCOUNT_BUILD_STATUS, "").await
    }

    /// `GET /accounts`
    pub async fn list_accounts(&self) -> Result<Vec<Account>, Error> {
        self.get(ACCOUNTS, "").await
    }
}

/// Ensure the base URL ends with `/` so relative templates join beneath it.
fn normalize_base_url(raw: &str) -> Result<Url, Error> {
    let mut url = Url::parse(raw)?;
    let path = url.path().trim_end_matches('/').to_owned();
    url.set_path(&format!("{path}/"));
    Ok(url)
}

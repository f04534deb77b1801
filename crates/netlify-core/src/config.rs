// ── Runtime datasource settings ──
//
// Describes *how* to reach the Netlify API. Carries the credential and
// connection tuning but never touches disk; `netlify-config` builds one of
// these and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;

use netlify_api::DEFAULT_BASE_URL;

/// Settings for one datasource instance. Immutable once the client is built.
#[derive(Debug, Clone)]
pub struct Settings {
    /// API root (defaults to `https://api.netlify.com/api/v1`).
    pub base_url: String,
    /// Personal access token sent as `Authorization: Bearer`.
    pub access_token: SecretString,
    /// Account used by account-scoped endpoints (build usage).
    pub account_id: String,
    /// Site used when a query leaves the site selector empty.
    pub site_id: String,
    /// Client-level request timeout.
    pub timeout: Duration,
    /// Extra CA certificate to trust (corporate proxies).
    pub ca_cert: Option<PathBuf>,
}

impl Settings {
    pub fn new(access_token: SecretString) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            access_token,
            account_id: String::new(),
            site_id: String::new(),
            timeout: Duration::from_secs(30),
            ca_cert: None,
        }
    }
}

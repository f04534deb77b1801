// Netlify REST API record shapes.
//
// Every field is optional: the core treats records as opaque rows and only
// needs them to decode and re-serialize, so partial payloads must not fail.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Sites ────────────────────────────────────────────────────────────

/// Site from `GET /sites`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Site {
    pub id: String,
    pub state: Option<String>,
    pub plan: Option<String>,
    pub name: Option<String>,
    pub custom_domain: Option<String>,
    pub domain_aliases: Option<Vec<String>>,
    pub notification_email: Option<String>,
    pub url: Option<String>,
    pub ssl_url: Option<String>,
    pub admin_url: Option<String>,
    pub screenshot_url: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub user_id: Option<String>,
    pub ssl: Option<bool>,
    pub force_ssl: Option<bool>,
    pub managed_dns: Option<bool>,
    pub deploy_url: Option<String>,
    pub published_deploy: Option<PublishedDeploy>,
    pub account_name: Option<String>,
    pub account_slug: Option<String>,
    pub git_provider: Option<String>,
    pub build_settings: Option<BuildSettings>,
    pub build_image: Option<String>,
    pub functions_region: Option<String>,
}

/// The deploy currently published for a site.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublishedDeploy {
    pub id: Option<String>,
    pub build_id: Option<String>,
    pub state: Option<String>,
    pub branch: Option<String>,
    pub commit_ref: Option<String>,
    pub context: Option<String>,
    pub error_message: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub framework: Option<String>,
}

/// Repository build settings for a site.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSettings {
    pub provider: Option<String>,
    pub repo_path: Option<String>,
    pub repo_branch: Option<String>,
    pub repo_url: Option<String>,
    pub dir: Option<String>,
    pub functions_dir: Option<String>,
    pub cmd: Option<String>,
    pub public_repo: Option<bool>,
    pub stop_builds: Option<bool>,
}

// ── Builds & deploys ─────────────────────────────────────────────────

/// Build from `GET /sites/{site_id}/builds`.
///
/// `state` values seen in the wild: new, pending_review, accepted, rejected,
/// enqueued, building, uploading, uploaded, preparing, prepared, processing,
/// processed, ready, error, retrying.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Build {
    pub id: String,
    pub deploy_id: Option<String>,
    pub sha: Option<String>,
    pub done: Option<bool>,
    pub error: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Deploy from `GET /sites/{site_id}/deploys`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Deploy {
    pub id: String,
    pub site_id: Option<String>,
    pub build_id: Option<String>,
    pub state: Option<String>,
    pub name: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub published_at: Option<DateTime<Utc>>,
    pub deploy_time: Option<i64>,
    pub manual_deploy: Option<bool>,
    pub error_message: Option<String>,
    pub branch: Option<String>,
    pub context: Option<String>,
}

// ── Forms ────────────────────────────────────────────────────────────

/// Form from `GET /sites/{site_id}/forms`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Form {
    pub id: String,
    pub site_id: Option<String>,
    pub name: Option<String>,
    pub paths: Option<Vec<String>>,
    pub submission_count: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Submission from `GET /sites/{site_id}/submissions`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Submission {
    pub id: String,
    pub number: Option<i64>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company: Option<String>,
    pub summary: Option<String>,
    pub body: Option<String>,
    pub data: Option<BTreeMap<String, serde_json::Value>>,
    pub created_at: Option<DateTime<Utc>>,
    pub site_url: Option<String>,
}

// ── Account ──────────────────────────────────────────────────────────

/// Build usage from `GET /{account_id}/builds/status` (a single object).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildStatus {
    pub active: Option<i64>,
    pub pending_concurrency: Option<i64>,
    pub enqueued: Option<i64>,
    pub build_count: Option<i64>,
    pub minutes: Option<BuildMinutes>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildMinutes {
    pub current: Option<i64>,
    pub previous: Option<i64>,
    pub period_start_date: Option<DateTime<Utc>>,
    pub period_end_date: Option<DateTime<Utc>>,
    pub last_updated_at: Option<DateTime<Utc>>,
    pub included_minutes: Option<i64>,
    pub included_minutes_with_packs: Option<i64>,
}

/// Account from `GET /accounts`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Account {
    pub id: String,
    pub name: Option<String>,
    pub slug: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub capabilities: Option<AccountCapabilities>,
    pub billing_name: Option<String>,
    pub billing_email: Option<String>,
    pub billing_details: Option<String>,
    pub billing_period: Option<String>,
    pub payment_method_id: Option<String>,
    pub type_name: Option<String>,
    pub type_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountCapabilities {
    pub sites: Option<Quota>,
    pub collaborators: Option<Quota>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Quota {
    pub included: Option<i64>,
    pub used: Option<i64>,
}

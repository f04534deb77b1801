// ── Health probe ──

use serde::Serialize;
use strum::Display;
use tracing::{info, warn};

use crate::api::NetlifyApi;

pub const HEALTHY_MESSAGE: &str = "Data source is working";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum HealthStatus {
    Ok,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthCheckResult {
    pub status: HealthStatus,
    pub message: String,
}

impl HealthCheckResult {
    pub fn is_ok(&self) -> bool {
        self.status == HealthStatus::Ok
    }
}

/// Verify credentials and reachability by listing sites.
pub async fn check_health<A: NetlifyApi>(api: &A) -> HealthCheckResult {
    match api.list_sites().await {
        Ok(sites) => {
            info!(sites = sites.len(), "health check passed");
            HealthCheckResult {
                status: HealthStatus::Ok,
                message: HEALTHY_MESSAGE.into(),
            }
        }
        Err(e) => {
            warn!(error = %e, "health check failed");
            HealthCheckResult {
                status: HealthStatus::Error,
                message: e.to_string(),
            }
        }
    }
}

// ── Resource side-channel ──
//
// Small HTTP-shaped lookups the editor uses to populate pickers. Only
// `/sites` exists today.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::api::NetlifyApi;

/// Inbound resource call as forwarded by the host.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ResourceRequest {
    pub method: String,
    pub path: String,
}

impl ResourceRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: "GET".into(),
            path: path.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceResponse {
    pub status: u16,
    pub body: String,
}

impl ResourceResponse {
    fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub struct ResourceHandler<A> {
    api: Arc<A>,
}

impl<A> Clone for ResourceHandler<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
        }
    }
}

impl<A: NetlifyApi> ResourceHandler<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    /// Route a resource call. Never fails; errors become status codes.
    pub async fn call_resource(&self, request: &ResourceRequest) -> ResourceResponse {
        let path = request.path.trim_matches('/');
        debug!(method = %request.method, path, "resource call");

        match path {
            "sites" if request.method.eq_ignore_ascii_case("GET") => self.site_ids().await,
            "sites" => ResourceResponse::new(405, "method not allowed"),
            _ => ResourceResponse::new(404, "not found"),
        }
    }

    async fn site_ids(&self) -> ResourceResponse {
        let sites = match self.api.list_sites().await {
            Ok(sites) => sites,
            Err(e) => {
                warn!(error = %e, "listing sites for resource call failed");
                return ResourceResponse::new(500, e.to_string());
            }
        };

        let ids: Vec<&str> = sites.iter().map(|s| s.id.as_str()).collect();
        match serde_json::to_string(&ids) {
            Ok(body) => ResourceResponse::new(200, body),
            Err(e) => ResourceResponse::new(500, e.to_string()),
        }
    }
}

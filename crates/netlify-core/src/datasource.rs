// ── Datasource facade ──
//
// One instance per configured datasource. Owns the shared API client and
// the three request surfaces the host calls into.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::info;

use netlify_api::{NetlifyClient, TlsMode, TransportConfig};

use crate::api::NetlifyApi;
use crate::config::Settings;
use crate::error::CoreError;
use crate::health::{self, HealthCheckResult};
use crate::query::{QueryDataRequest, QueryDataResponse, QueryHandler};
use crate::resources::{ResourceHandler, ResourceRequest, ResourceResponse};

pub struct Datasource<A = NetlifyClient> {
    api: Arc<A>,
    queries: QueryHandler<A>,
    resources: ResourceHandler<A>,
}

impl<A> Clone for Datasource<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            queries: self.queries.clone(),
            resources: self.resources.clone(),
        }
    }
}

impl Datasource<NetlifyClient> {
    /// Build the HTTP client from settings and wire the handlers over it.
    pub fn new(settings: &Settings) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            tls: settings
                .ca_cert
                .clone()
                .map_or(TlsMode::System, TlsMode::CustomCa),
            timeout: settings.timeout,
        };

        let client = NetlifyClient::new(
            &settings.base_url,
            &settings.access_token,
            settings.account_id.as_str(),
            settings.site_id.as_str(),
            &transport,
        )
        .map_err(|e| CoreError::Config {
            message: e.to_string(),
        })?;

        info!(
            base_url = %client.base_url(),
            account_id = %settings.account_id,
            default_site = %settings.site_id,
            "datasource created"
        );
        Ok(Self::with_api(Arc::new(client)))
    }
}

impl<A: NetlifyApi> Datasource<A> {
    pub fn with_api(api: Arc<A>) -> Self {
        Self {
            queries: QueryHandler::new(Arc::clone(&api)),
            resources: ResourceHandler::new(Arc::clone(&api)),
            api,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub async fn query_data(
        &self,
        request: &QueryDataRequest,
        cancel: &CancellationToken,
    ) -> QueryDataResponse {
        self.queries.handle_queries(request, cancel).await
    }

    pub async fn call_resource(&self, request: &ResourceRequest) -> ResourceResponse {
        self.resources.call_resource(request).await
    }

    pub async fn check_health(&self) -> HealthCheckResult {
        health::check_health(self.api.as_ref()).await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::path::PathBuf;

    use secrecy::SecretString;

    use super::*;

    #[test]
    fn new_builds_client_from_settings() {
        let mut settings = Settings::new(SecretString::from("tok"));
        settings.account_id = "acme".into();
        settings.site_id = "s1".into();

        let ds = Datasource::new(&settings).unwrap();
        assert_eq!(ds.api().account_id(), "acme");
        assert_eq!(ds.api().default_site_id(), "s1");
        assert_eq!(
            ds.api().base_url().as_str(),
            "https://api.netlify.com/api/v1/"
        );
    }

    #[test]
    fn bad_base_url_is_config_error() {
        let mut settings = Settings::new(SecretString::from("tok"));
        settings.base_url = "not a url".into();
        let err = Datasource::new(&settings).err().unwrap();
        assert!(matches!(err, CoreError::Config { .. }));
    }

    #[test]
    fn missing_ca_file_is_config_error() {
        let mut settings = Settings::new(SecretString::from("tok"));
        settings.ca_cert = Some(PathBuf::from("/nonexistent/ca.pem"));
        let err = Datasource::new(&settings).err().unwrap();
        assert!(matches!(err, CoreError::Config { .. }));
    }
}

// ── API seam ──
//
// The dispatcher, resource handler and health probe talk to Netlify only
// through this trait. `NetlifyClient` is the production implementation;
// tests plug in stubs.

use std::future::Future;

use netlify_api::{Account, Build, BuildStatus, Deploy, Error, Form, NetlifyClient, Site, Submission};

/// The seven Netlify reads the datasource needs.
///
/// Per-site methods take a site id; an empty id means "the configured
/// default site". Implementations must be shareable across concurrent tasks.
pub trait NetlifyApi: Send + Sync {
    fn list_sites(&self) -> impl Future<Output = Result<Vec<Site>, Error>> + Send;

    fn list_builds(&self, site_id: &str) -> impl Future<Output = Result<Vec<Build>, Error>> + Send;

    fn list_deploys(&self, site_id: &str)
    -> impl Future<Output = Result<Vec<Deploy>, Error>> + Send;

    fn list_forms(&self, site_id: &str) -> impl Future<Output = Result<Vec<Form>, Error>> + Send;

    fn list_submissions(
        &self,
        site_id: &str,
    ) -> impl Future<Output = Result<Vec<Submission>, Error>> + Send;

    fn build_status(&self) -> impl Future<Output = Result<BuildStatus, Error>> + Send;

    fn list_accounts(&self) -> impl Future<Output = Result<Vec<Account>, Error>> + Send;
}

impl NetlifyApi for NetlifyClient {
    fn list_sites(&self) -> impl Future<Output = Result<Vec<Site>, Error>> + Send {
        NetlifyClient::list_sites(self)
    }

    fn list_builds(&self, site_id: &str) -> impl Future<Output = Result<Vec<Build>, Error>> + Send {
        NetlifyClient::list_builds(self, site_id)
    }

    fn list_deploys(
        &self,
        site_id: &str,
    ) -> impl Future<Output = Result<Vec<Deploy>, Error>> + Send {
        NetlifyClient::list_deploys(self, site_id)
    }

    fn list_forms(&self, site_id: &str) -> impl Future<Output = Result<Vec<Form>, Error>> + Send {
        NetlifyClient::list_forms(self, site_id)
    }

    fn list_submissions(
        &self,
        site_id: &str,
    ) -> impl Future<Output = Result<Vec<Submission>, Error>> + Send {
        NetlifyClient::list_submissions(self, site_id)
    }

    fn build_status(&self) -> impl Future<Output = Result<BuildStatus, Error>> + Send {
        NetlifyClient::build_status(self)
    }

    fn list_accounts(&self) -> impl Future<Output = Result<Vec<Account>, Error>> + Send {
        NetlifyClient::list_accounts(self)
    }
}

//! Query dispatch: decode a host query, resolve its site ids, fetch, merge,
//! and convert to a frame.
//!
//! Per-site entities fan out one request per site id and concatenate the
//! results. If any site fails the whole query fails with the first error
//! that arrived; data from sites that succeeded in the same fan-out is
//! dropped. Account-scoped entities make a single request and ignore the
//! site selector.

use std::collections::BTreeMap;
use std::future::Future;
use std::str::FromStr;
use std::sync::Arc;

use futures_util::future::join_all;
use serde::{Deserialize, Deserializer, Serialize};
use strum::Display;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::api::NetlifyApi;
use crate::entity::{Entity, Scope};
use crate::error::CoreError;
use crate::fanout::fan_out_with_cancel;
use crate::frame::{Frame, Severity};

// ── Inbound query model ──────────────────────────────────────────────

/// Fields the editor sends with every query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryModel {
    #[serde(default, deserialize_with = "null_as_default")]
    pub entity: String,
    /// Single site id or a brace list such as `{a,b,c}`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub site_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub parsing_options: ParsingOptions,
}

/// Column selection hint. Decoded for forward compatibility, not applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsingOptions {
    #[serde(default, deserialize_with = "null_as_default")]
    pub selected_fields: Vec<String>,
}

/// Editors send explicit `null` for untouched fields; treat it like absence.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl QueryModel {
    pub fn from_json(json: &serde_json::Value) -> Result<Self, CoreError> {
        Self::deserialize(json)
            .map_err(|e| CoreError::bad_request(format!("invalid query json: {e}")))
    }
}

/// Expand a site selector into the ids to query.
///
/// `"abc"` yields `["abc"]`; `"{a,b,c}"` yields `["a","b","c"]` with
/// surrounding whitespace trimmed from each element. The empty string yields
/// `[""]`, which the client resolves to the configured default site. An
/// empty brace list is rejected.
pub fn parse_site_ids(expr: &str) -> Result<Vec<String>, CoreError> {
    let Some(list) = expr.strip_prefix('{').and_then(|s| s.strip_suffix('}')) else {
        return Ok(vec![expr.to_owned()]);
    };

    if list.trim().is_empty() {
        return Err(CoreError::bad_request(
            "failed on parsing siteIds: empty site id list",
        ));
    }

    Ok(list.split(',').map(|id| id.trim().to_owned()).collect())
}

// ── Host envelope ────────────────────────────────────────────────────

/// One query of a host request.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataQuery {
    pub ref_id: String,
    pub json: serde_json::Value,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct QueryDataRequest {
    pub queries: Vec<DataQuery>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ErrorStatus {
    BadRequest,
    BadGateway,
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseError {
    pub status: ErrorStatus,
    pub message: String,
}

/// Result for one `refId`: frames on success, an error otherwise.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DataResponse {
    pub frames: Vec<Frame>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ResponseError>,
}

impl From<Result<Frame, CoreError>> for DataResponse {
    fn from(result: Result<Frame, CoreError>) -> Self {
        match result {
            Ok(frame) => Self {
                frames: vec![frame],
                error: None,
            },
            Err(err) => Self {
                frames: Vec::new(),
                error: Some(ResponseError {
                    status: err.status(),
                    message: err.to_string(),
                }),
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryDataResponse {
    pub responses: BTreeMap<String, DataResponse>,
}

// ── Handler ──────────────────────────────────────────────────────────

/// Stateless query dispatcher over a shared API client.
pub struct QueryHandler<A> {
    api: Arc<A>,
}

impl<A> Clone for QueryHandler<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
        }
    }
}

impl<A: NetlifyApi> QueryHandler<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    /// Run every query of a request concurrently, keyed by `refId`.
    ///
    /// A failing query produces an error response for its own `refId` only.
    pub async fn handle_queries(
        &self,
        request: &QueryDataRequest,
        cancel: &CancellationToken,
    ) -> QueryDataResponse {
        let runs = request.queries.iter().map(|q| async move {
            let result = self.query(&q.json, cancel).await;
            if let Err(ref err) = result {
                warn!(ref_id = %q.ref_id, error = %err, "query failed");
            }
            (q.ref_id.clone(), DataResponse::from(result))
        });

        QueryDataResponse {
            responses: join_all(runs).await.into_iter().collect(),
        }
    }

    /// Interpret one query payload and produce its frame.
    pub async fn query(
        &self,
        json: &serde_json::Value,
        cancel: &CancellationToken,
    ) -> Result<Frame, CoreError> {
        let model = QueryModel::from_json(json)?;

        if model.entity.is_empty() {
            return Err(CoreError::bad_request("missing entity"));
        }

        let entity = Entity::from_str(&model.entity).map_err(|_| {
            CoreError::bad_request(format!("unrecognized entity: {}", model.entity))
        })?;

        debug!(
            selected_fields = ?model.parsing_options.selected_fields,
            "query parsing options"
        );

        match entity.scope() {
            Scope::PerSite => {
                let site_ids = parse_site_ids(&model.site_id)?;
                info!(%entity, site_id = %model.site_id, ?site_ids, "query");
                self.per_site(entity, site_ids, cancel).await
            }
            Scope::Account => {
                info!(%entity, "query");
                self.account(entity).await
            }
        }
    }

    async fn per_site(
        &self,
        entity: Entity,
        site_ids: Vec<String>,
        cancel: &CancellationToken,
    ) -> Result<Frame, CoreError> {
        let api = self.api.as_ref();
        match entity {
            Entity::Builds => {
                merge_sites(entity, site_ids, cancel, |site| async move {
                    api.list_builds(&site).await
                })
                .await
            }
            Entity::Deployments => {
                merge_sites(entity, site_ids, cancel, |site| async move {
                    api.list_deploys(&site).await
                })
                .await
            }
            Entity::Forms => {
                merge_sites(entity, site_ids, cancel, |site| async move {
                    api.list_forms(&site).await
                })
                .await
            }
            Entity::FormSubmissions => {
                merge_sites(entity, site_ids, cancel, |site| async move {
                    api.list_submissions(&site).await
                })
                .await
            }
            Entity::BuildsAccount | Entity::Sites | Entity::Accounts => self.account(entity).await,
        }
    }

    async fn account(&self, entity: Entity) -> Result<Frame, CoreError> {
        let context = format!("failed to get {}", entity.description());
        match entity {
            Entity::Sites => {
                let sites = self
                    .api
                    .list_sites()
                    .await
                    .map_err(|e| CoreError::upstream(context, e))?;
                Frame::from_records(entity.frame_name(), &sites)
            }
            Entity::Accounts => {
                let accounts = self
                    .api
                    .list_accounts()
                    .await
                    .map_err(|e| CoreError::upstream(context, e))?;
                Frame::from_records(entity.frame_name(), &accounts)
            }
            Entity::BuildsAccount => {
                let status = self
                    .api
                    .build_status()
                    .await
                    .map_err(|e| CoreError::upstream(context, e))?;
                Frame::from_record(entity.frame_name(), &status)
            }
            Entity::Builds | Entity::Deployments | Entity::Forms | Entity::FormSubmissions => {
                Err(CoreError::bad_request(format!(
                    "entity {entity} requires a site id"
                )))
            }
        }
    }
}

/// Fan `fetch` out across `site_ids`, collapse failures to the first error,
/// and flatten the per-site collections into one frame.
async fn merge_sites<T, F, Fut>(
    entity: Entity,
    site_ids: Vec<String>,
    cancel: &CancellationToken,
    fetch: F,
) -> Result<Frame, CoreError>
where
    T: Serialize,
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<Vec<T>, netlify_api::Error>>,
{
    let requested = site_ids.len();
    let outcome = fan_out_with_cancel(site_ids, fetch, cancel).await;

    if let Some(first) = outcome.errors.into_iter().next() {
        return Err(CoreError::upstream(
            format!("failed to get {}", entity.description()),
            first,
        ));
    }

    let cancelled = outcome.cancelled;
    let records: Vec<T> = outcome.successes.into_iter().flatten().collect();
    debug!(%entity, sites = requested, records = records.len(), "merged site results");

    let frame = Frame::from_records(entity.frame_name(), &records)?;
    if cancelled > 0 {
        return Ok(frame.with_notice(
            Severity::Warning,
            format!("query cancelled: {cancelled} of {requested} sites did not complete"),
        ));
    }
    Ok(frame)
}

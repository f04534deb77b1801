// netlify-core: Query dispatch and multi-site aggregation between netlify-api and the host.

pub mod api;
pub mod config;
pub mod datasource;
pub mod entity;
pub mod error;
pub mod fanout;
pub mod frame;
pub mod health;
pub mod query;
pub mod resources;

// ── Primary re-exports ──────────────────────────────────────────────
pub use api::NetlifyApi;
pub use config::Settings;
pub use datasource::Datasource;
pub use entity::{Entity, Scope};
pub use error::CoreError;
pub use fanout::{AggregateOutcome, KeyedOutcome, fan_out, fan_out_keyed, fan_out_with_cancel};
pub use frame::{Field, Frame, FrameMeta, Notice, Severity};
pub use health::{HealthCheckResult, HealthStatus};
pub use query::{
    DataQuery, DataResponse, ErrorStatus, QueryDataRequest, QueryDataResponse, QueryHandler,
    QueryModel, ResponseError, parse_site_ids,
};
pub use resources::{ResourceHandler, ResourceRequest, ResourceResponse};

// Cancellation handle accepted by query entry points.
pub use tokio_util::sync::CancellationToken;

//! CLI error types with miette diagnostics.
//!
//! Maps core and config errors into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use netlify_config::ConfigError;
use netlify_core::{CoreError, ErrorStatus};

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const UPSTREAM: i32 = 7;
    pub const INTERRUPTED: i32 = 130;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Credentials ──────────────────────────────────────────────────
    #[error("No access token configured for profile '{profile}'")]
    #[diagnostic(
        code(netlify::no_credentials),
        help(
            "Pass --token, set NETLIFY_ACCESS_TOKEN, or add `token_env` / `token`\n\
             to the profile in the config file (see: netlify-ds config path)."
        )
    )]
    NoCredentials { profile: String },

    #[error("Netlify rejected the access token")]
    #[diagnostic(
        code(netlify::auth_failed),
        help("Create a personal access token under User settings > Applications.")
    )]
    AuthFailed {
        #[source]
        source: CoreError,
    },

    // ── Queries ──────────────────────────────────────────────────────
    #[error("Query {ref_id} failed ({status}): {message}")]
    #[diagnostic(code(netlify::query_failed))]
    QueryFailed {
        ref_id: String,
        status: ErrorStatus,
        message: String,
    },

    #[error("Query cancelled")]
    #[diagnostic(code(netlify::cancelled))]
    Cancelled,

    #[error(transparent)]
    #[diagnostic(code(netlify::core))]
    Core(CoreError),

    // ── Resources / health ───────────────────────────────────────────
    #[error("Resource call returned {status}: {body}")]
    #[diagnostic(code(netlify::resource))]
    Resource { status: u16, body: String },

    #[error("Health check failed: {message}")]
    #[diagnostic(
        code(netlify::unhealthy),
        help("Check the token, account id and base URL with: netlify-ds config show")
    )]
    Unhealthy { message: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(netlify::validation))]
    Validation { field: String, reason: String },

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(netlify::profile_not_found),
        help("Available profiles: {available}")
    )]
    ProfileNotFound { name: String, available: String },

    #[error(transparent)]
    #[diagnostic(code(netlify::config))]
    Config(ConfigError),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    #[diagnostic(code(netlify::json))]
    Json(#[from] serde_json::Error),

    #[error("YAML output failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NoCredentials { .. } | Self::AuthFailed { .. } => exit_code::AUTH,
            Self::QueryFailed { status, .. } => status_exit_code(*status),
            Self::Resource { status: 404, .. } | Self::ProfileNotFound { .. } => {
                exit_code::NOT_FOUND
            }
            Self::Validation { .. } | Self::Resource { status: 405, .. } => exit_code::USAGE,
            Self::Unhealthy { .. } => exit_code::UPSTREAM,
            Self::Core(err) => status_exit_code(err.status()),
            Self::Cancelled => exit_code::INTERRUPTED,
            _ => exit_code::GENERAL,
        }
    }
}

fn status_exit_code(status: ErrorStatus) -> i32 {
    match status {
        ErrorStatus::BadRequest => exit_code::USAGE,
        ErrorStatus::BadGateway => exit_code::UPSTREAM,
        ErrorStatus::Internal => exit_code::GENERAL,
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        if let CoreError::Upstream { source, .. } = &err {
            if matches!(source.status(), Some(401 | 403)) {
                return Self::AuthFailed { source: err };
            }
        }
        match err {
            CoreError::Config { message } => Self::Validation {
                field: "settings".into(),
                reason: message,
            },
            other => Self::Core(other),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => Self::NoCredentials { profile },
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            other => Self::Config(other),
        }
    }
}

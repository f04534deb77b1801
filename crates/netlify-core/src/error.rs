// ── Core error types ──
//
// Query-level failures handed back to the host. Upstream failures keep the
// originating `netlify_api::Error` as their source so callers can still
// inspect the status or raw body.

use thiserror::Error;

use crate::query::ErrorStatus;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Input errors ─────────────────────────────────────────────────
    /// Malformed or incomplete query input. Never retried.
    #[error("{reason}")]
    BadRequest { reason: String },

    // ── Upstream errors (wrapped with query context) ─────────────────
    /// Transport, HTTP status or decode failure talking to Netlify.
    #[error("{context}: {source}")]
    Upstream {
        context: String,
        source: netlify_api::Error,
    },

    // ── Conversion errors ────────────────────────────────────────────
    #[error("failed {name} to frame conversion: {message}")]
    Frame { name: String, message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    pub fn bad_request(reason: impl Into<String>) -> Self {
        Self::BadRequest {
            reason: reason.into(),
        }
    }

    pub fn upstream(context: impl Into<String>, source: netlify_api::Error) -> Self {
        Self::Upstream {
            context: context.into(),
            source,
        }
    }

    /// Status reported to the host alongside the message.
    pub fn status(&self) -> ErrorStatus {
        match self {
            Self::BadRequest { .. } => ErrorStatus::BadRequest,
            Self::Upstream { .. } => ErrorStatus::BadGateway,
            Self::Frame { .. } | Self::Config { .. } => ErrorStatus::Internal,
        }
    }
}

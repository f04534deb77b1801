use thiserror::Error;

/// Top-level error type for the `netlify-api` crate.
///
/// Every failure a single GET can produce falls into one of these buckets.
/// `netlify-core` wraps them with query context before they reach the host.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or client construction error.
    #[error("TLS error: {0}")]
    Tls(String),

    /// A site id that cannot be used as a single path segment.
    #[error("Invalid site id: {site_id:?}")]
    InvalidSiteId { site_id: String },

    /// The bearer token cannot be sent as a header value.
    #[error("Invalid access token: {message}")]
    InvalidToken { message: String },

    // ── Upstream ────────────────────────────────────────────────────
    /// Netlify answered with a status >= 400. The raw body is kept verbatim.
    #[error("error: code: {status}, response: {body}")]
    Upstream { status: u16, body: String },

    // ── Data ────────────────────────────────────────────────────────
    /// A 2xx body did not decode into the expected shape.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String },
}

impl Error {
    /// HTTP status of the failed call, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_display_keeps_raw_body() {
        let err = Error::Upstream {
            status: 500,
            body: "boom".into(),
        };
        assert_eq!(err.to_string(), "error: code: 500, response: boom");
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn deserialization_has_no_status() {
        let err = Error::Deserialization {
            message: "expected value at line 1 column 1".into(),
        };
        assert_eq!(err.status(), None);
    }
}

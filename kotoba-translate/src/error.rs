//! Error types for the kotoba-translate crate.
//!
//! Only [`TranslateError::InvalidRequest`] and [`TranslateError::Config`]
//! ever reach a caller of [`crate::lookup`]. The transport and parse
//! variants describe a single source's failure and are absorbed by the
//! orchestrator as a source contributing nothing.

/// Errors that can occur while looking up translations.
#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    /// The lookup request itself is malformed (empty term, bad limit).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A source did not answer within its deadline.
    #[error("source timed out: {0}")]
    Timeout(String),

    /// A source request failed at the transport level or returned a
    /// non-success status.
    #[error("HTTP error: {message}")]
    Http {
        /// Response status code, if the server answered at all.
        status: Option<u16>,
        /// Human-readable failure description.
        message: String,
    },

    /// A source payload could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid lookup configuration.
    #[error("config error: {0}")]
    Config(String),
}

impl TranslateError {
    /// Map a [`reqwest::Error`] onto the matching variant, keeping the
    /// status code when the server responded.
    pub(crate) fn from_reqwest(source: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return Self::Timeout(format!("{source} request timed out"));
        }
        if err.is_decode() {
            return Self::Parse(format!("{source} response decode failed: {err}"));
        }
        Self::Http {
            status: err.status().map(|s| s.as_u16()),
            message: format!("{source} request failed: {err}"),
        }
    }
}

/// Convenience type alias for kotoba-translate results.
pub type Result<T> = std::result::Result<T, TranslateError>;

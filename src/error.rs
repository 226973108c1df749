//! Error types for the kotoba service.

/// Top-level error type for the translation service.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration file could not be parsed or is invalid.
    #[error("config error: {0}")]
    Config(String),

    /// HTTP server failed to bind or serve.
    #[error("server error: {0}")]
    Server(String),

    /// Translation core rejected the request or configuration.
    #[error(transparent)]
    Translate(#[from] kotoba_translate::TranslateError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, AppError>;

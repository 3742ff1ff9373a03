use thiserror::Error;

/// Top-level error type for Glossa.
#[derive(Debug, Error)]
pub enum GlossaError {
    /// Language resolution or metadata error.
    #[error("locale error: {0}")]
    Locale(String),

    /// Translation bundle fetch error.
    #[error("fetch error: {0}")]
    Fetch(String),

    /// Settings store error.
    #[error("store error: {0}")]
    Store(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

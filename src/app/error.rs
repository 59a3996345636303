use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocketError {
    /// Transport, HTTP status, or GraphQL `errors[]` failure on the remote service.
    #[error("Remote service unavailable: {0}")]
    RemoteUnavailable(String),

    /// A subscribe was attempted before a usable hearing snapshot existed.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Format error: {0}")]
    Format(String),

    /// A consolidation refresh landed after a newer optimistic flip.
    #[error("Stale write for {0}: a newer toggle was issued while the refresh was in flight")]
    StaleWrite(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl DocketError {
    /// True for failures that originate on the remote side of the synchronizer.
    pub fn is_remote(&self) -> bool {
        matches!(self, DocketError::RemoteUnavailable(_))
    }
}

pub type Result<T> = std::result::Result<T, DocketError>;

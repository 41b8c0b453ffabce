use thiserror::Error;

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    /// Transient backing-store fault (transport error, throttling, outage).
    /// Item absence is never reported through this variant.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("invalid data: {0}")]
    InvalidData(String),
}

/// Errors that can occur when uploading to the object store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("upload failed: {0}")]
pub struct UploadError(pub String);

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

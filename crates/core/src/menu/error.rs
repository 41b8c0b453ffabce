use thiserror::Error;

use crate::storage::{RepositoryError, UploadError};

/// Errors surfaced by menu operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MenuError {
    /// The request payload failed a validation rule.
    #[error("validation error: {0}")]
    Validation(String),

    /// Missing, expired or forged credentials, or a bad password.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// The backing store could not complete the operation.
    #[error("storage unavailable: {0}")]
    Storage(String),

    /// A multi-step mutation stopped part-way. Earlier steps are committed
    /// and not rolled back; the message says how far it got.
    #[error("partial mutation: {0}")]
    PartialMutation(String),

    #[error("upload failed: {0}")]
    Upload(String),
}

impl From<RepositoryError> for MenuError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::NotFound { entity_type, id } => {
                MenuError::NotFound { entity_type, id }
            }
            RepositoryError::Unavailable(msg) => MenuError::Storage(msg),
            RepositoryError::Serialization(msg) | RepositoryError::InvalidData(msg) => {
                MenuError::Storage(msg)
            }
        }
    }
}

impl From<UploadError> for MenuError {
    fn from(error: UploadError) -> Self {
        MenuError::Upload(error.0)
    }
}

/// Maps a menu error to the status code an HTTP layer would answer with.
pub fn menu_error_to_status_code(error: &MenuError) -> u16 {
    match error {
        MenuError::Validation(_) => 400,
        MenuError::Unauthorized(_) => 401,
        MenuError::NotFound { .. } => 404,
        MenuError::Storage(_) | MenuError::Upload(_) => 503,
        MenuError::PartialMutation(_) => 500,
    }
}

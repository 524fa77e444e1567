use thiserror::Error;

use lexis_storage::StorageError;
use lexis_types::LexisError;

/// Errors returned by registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error(transparent)]
    Lexis(#[from] LexisError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("config error: {reason}")]
    Config { reason: String },

    #[error("encoding error: {reason}")]
    Encoding { reason: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl RegistryError {
    /// Token-standard error code, when the failure is a domain error.
    pub fn code(&self) -> Option<u32> {
        match self {
            RegistryError::Lexis(e) => Some(e.code()),
            _ => None,
        }
    }

    pub fn is_not_token_owner(&self) -> bool {
        matches!(self, RegistryError::Lexis(LexisError::NotTokenOwner { .. }))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, RegistryError::Lexis(LexisError::NotFound(_)))
    }
}

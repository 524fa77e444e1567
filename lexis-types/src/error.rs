use thiserror::Error;

use crate::primitives::TokenId;

/// Domain errors of the knowledge registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexisError {
    /// The caller is not the current owner of the token, or the token
    /// does not exist and the operation does not distinguish the two.
    #[error("not token owner: token {id}")]
    NotTokenOwner { id: TokenId },

    #[error("token not found: {0}")]
    NotFound(TokenId),

    #[error("token id counter exhausted")]
    IdOverflow,

    #[error("invalid principal: {reason}")]
    InvalidPrincipal { reason: String },
}

impl LexisError {
    /// Stable numeric code reported through the token-standard surface.
    pub fn code(&self) -> u32 {
        match self {
            LexisError::NotTokenOwner { .. } => 101,
            LexisError::NotFound(_) => 102,
            LexisError::IdOverflow => 103,
            LexisError::InvalidPrincipal { .. } => 104,
        }
    }
}

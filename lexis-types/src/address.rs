//! Hex encoding for principals.

use crate::error::LexisError;
use crate::primitives::Principal;

/// The all-zero principal.
pub const ZERO_PRINCIPAL: Principal = [0u8; 20];

/// Render a principal as `0x` followed by 40 lowercase hex digits.
pub fn principal_to_hex(principal: &Principal) -> String {
    format!("0x{}", hex::encode(principal))
}

/// Parse a principal from hex, with or without the `0x` prefix.
pub fn principal_from_hex(s: &str) -> Result<Principal, LexisError> {
    let digits = s.strip_prefix("0x").unwrap_or(s);
    if digits.len() != 40 {
        return Err(LexisError::InvalidPrincipal {
            reason: format!("expected 40 hex characters, got {}", digits.len()),
        });
    }
    let bytes = hex::decode(digits).map_err(|e| LexisError::InvalidPrincipal {
        reason: e.to_string(),
    })?;
    let mut principal = ZERO_PRINCIPAL;
    principal.copy_from_slice(&bytes);
    Ok(principal)
}

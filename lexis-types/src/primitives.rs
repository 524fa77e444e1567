use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// 20-byte identity of a caller or token owner.
pub type Principal = [u8; 20];

/// Sequential token identifier. The first minted token is `1`.
pub type TokenId = u64;

/// Id of the first token ever minted by a registry.
pub const FIRST_TOKEN_ID: TokenId = 1;

/// Collection name reported in mint events.
pub const DEFAULT_COLLECTION_CLASS: &str = "ai-assistant";

/// Asset name reported in mint events.
pub const DEFAULT_ASSET_NAME: &str = "ai-knowledge";

/// Identifies which collection and asset class a registry issues.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub struct AssetClass {
    pub class: String,
    pub asset: String,
}

impl AssetClass {
    pub fn new(class: impl Into<String>, asset: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            asset: asset.into(),
        }
    }
}

impl Default for AssetClass {
    fn default() -> Self {
        Self::new(DEFAULT_COLLECTION_CLASS, DEFAULT_ASSET_NAME)
    }
}

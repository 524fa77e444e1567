//! Notifications emitted by the registry for external observers.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::address::principal_to_hex;
use crate::primitives::{Principal, TokenId};

/// A key-value pair describing one field of an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub key: String,
    pub value: String,
}

impl Attribute {
    fn new(key: &str, value: impl Into<String>) -> Self {
        Self {
            key: key.to_string(),
            value: value.into(),
        }
    }
}

/// Event emitted by a successful mint or transfer.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
pub enum RegistryEvent {
    Mint {
        id: TokenId,
        owner: Principal,
        class: String,
        asset: String,
    },
    Transfer {
        id: TokenId,
        from: Principal,
        to: Principal,
    },
}

impl RegistryEvent {
    /// Event type name, as seen by indexers.
    pub fn ty(&self) -> &'static str {
        match self {
            RegistryEvent::Mint { .. } => "Mint",
            RegistryEvent::Transfer { .. } => "Transfer",
        }
    }

    /// Token the event refers to.
    pub fn token_id(&self) -> TokenId {
        match self {
            RegistryEvent::Mint { id, .. } | RegistryEvent::Transfer { id, .. } => *id,
        }
    }

    /// Flattened attributes with principals rendered as hex.
    pub fn attributes(&self) -> Vec<Attribute> {
        match self {
            RegistryEvent::Mint {
                id,
                owner,
                class,
                asset,
            } => vec![
                Attribute::new("id", id.to_string()),
                Attribute::new("owner", principal_to_hex(owner)),
                Attribute::new("class", class.clone()),
                Attribute::new("asset", asset.clone()),
            ],
            RegistryEvent::Transfer { id, from, to } => vec![
                Attribute::new("id", id.to_string()),
                Attribute::new("from", principal_to_hex(from)),
                Attribute::new("to", principal_to_hex(to)),
            ],
        }
    }

    /// Look up a single attribute value by key.
    pub fn attribute(&self, key: &str) -> Option<String> {
        self.attributes()
            .into_iter()
            .find(|a| a.key == key)
            .map(|a| a.value)
    }
}

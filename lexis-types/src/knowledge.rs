use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// Content attached to a knowledge token.
///
/// `topic` and `uri` are fixed at mint time. Only `data` is rewritten,
/// and only by the token's current owner.
#[derive(
    Debug, Clone, PartialEq, Eq, Default, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
pub struct Knowledge {
    pub topic: String,
    pub data: String,
    pub uri: String,
}

impl Knowledge {
    pub fn new(topic: impl Into<String>, data: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            data: data.into(),
            uri: uri.into(),
        }
    }

    /// Copy of this record with `data` replaced; provenance fields are kept.
    pub fn with_data(&self, data: impl Into<String>) -> Self {
        Self {
            topic: self.topic.clone(),
            data: data.into(),
            uri: self.uri.clone(),
        }
    }
}

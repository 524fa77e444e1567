//! Borsh-encoded message surface, shaped after the SIP009 NFT interface.
//!
//! A host that receives calls as bytes decodes them into [`ExecuteMsg`] or
//! [`QueryMsg`] and hands them to [`Registry::execute`](crate::Registry::execute)
//! or [`Registry::query`](crate::Registry::query). Results come back as a
//! [`Response`] with borsh-encoded data and the events the call emitted.

use borsh::{BorshDeserialize, BorshSerialize};

use lexis_types::{Principal, RegistryEvent, TokenId};

use crate::error::RegistryError;

fn encoding_error(e: std::io::Error) -> RegistryError {
    RegistryError::Encoding {
        reason: e.to_string(),
    }
}

/// State-changing calls.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub enum ExecuteMsg {
    /// Returns the new `TokenId`.
    Mint {
        topic: String,
        data: String,
        uri: String,
    },
    /// Returns `true`.
    Update { id: TokenId, data: String },
    /// Returns `true`.
    Transfer {
        id: TokenId,
        from: Principal,
        to: Principal,
    },
}

/// Read-only calls. None of them check the caller.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub enum QueryMsg {
    /// Returns `Option<Knowledge>`.
    GetKnowledge { id: TokenId },
    /// Returns `u64`.
    GetLastTokenId,
    /// Returns `Option<Principal>`.
    GetTokenOwner { id: TokenId },
    /// Returns `u64`.
    GetBalance { owner: Principal },
    /// Returns `Option<String>`.
    GetTokenUri { id: TokenId },
}

macro_rules! impl_codec {
    ($ty:ty) => {
        impl $ty {
            pub fn to_bytes(&self) -> Result<Vec<u8>, RegistryError> {
                borsh::to_vec(self).map_err(encoding_error)
            }

            pub fn from_bytes(bytes: &[u8]) -> Result<Self, RegistryError> {
                Self::try_from_slice(bytes).map_err(encoding_error)
            }
        }
    };
}

impl_codec!(ExecuteMsg);
impl_codec!(QueryMsg);

/// Result of a dispatched call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    data: Vec<u8>,
    events: Vec<RegistryEvent>,
}

impl Response {
    pub fn new() -> Self {
        Self::default()
    }

    /// Borsh-encode `value` as the response data.
    pub fn set_data<T: BorshSerialize>(mut self, value: &T) -> Result<Self, RegistryError> {
        self.data = borsh::to_vec(value).map_err(encoding_error)?;
        Ok(self)
    }

    pub fn add_event(mut self, event: RegistryEvent) -> Self {
        self.events.push(event);
        self
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn events(&self) -> &[RegistryEvent] {
        &self.events
    }

    /// Decode the response data.
    pub fn decode<T: BorshDeserialize>(&self) -> Result<T, RegistryError> {
        T::try_from_slice(&self.data).map_err(encoding_error)
    }
}

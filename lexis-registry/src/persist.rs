//! Durable layout of registry state on a [`KvStore`](lexis_storage::KvStore).
//!
//! Every mutating registry operation turns into one batch of writes here.
//! The batch is committed before in-memory state changes, so a failed write
//! leaves both the store and the registry untouched.

use std::collections::BTreeMap;
use std::sync::Arc;

use borsh::BorshDeserialize;

use lexis_storage::{BatchOp, BatchWriter, KvStore, StorageError};
use lexis_types::primitives::FIRST_TOKEN_ID;
use lexis_types::{Knowledge, Principal, TokenId};

use crate::content_store::ContentStore;
use crate::token_store::TokenStore;

const LAST_ID_KEY: &[u8] = b"registry:last_id";
const OWNER_PREFIX: &[u8] = b"registry:owner:";
const KNOWLEDGE_PREFIX: &[u8] = b"registry:knowledge:";
const SCHEMA_VERSION_KEY: &[u8] = b"meta:schema_version";

/// Bump whenever a persisted borsh layout changes.
pub const SCHEMA_VERSION: u32 = 1;

fn encode<T: borsh::BorshSerialize>(value: &T) -> Result<Vec<u8>, StorageError> {
    borsh::to_vec(value).map_err(|e| StorageError::SerializationError {
        reason: e.to_string(),
    })
}

fn decode<T: BorshDeserialize>(bytes: &[u8]) -> Result<T, StorageError> {
    T::try_from_slice(bytes).map_err(|e| StorageError::DeserializationError {
        reason: e.to_string(),
    })
}

fn token_key(prefix: &[u8], id: TokenId) -> Vec<u8> {
    let mut key = Vec::with_capacity(prefix.len() + std::mem::size_of::<TokenId>());
    key.extend_from_slice(prefix);
    // Big-endian so that key order matches id order.
    key.extend_from_slice(&id.to_be_bytes());
    key
}

fn id_from_key(key: &[u8], prefix_len: usize) -> Result<TokenId, StorageError> {
    let raw: [u8; 8] = key
        .get(prefix_len..)
        .and_then(|b| b.try_into().ok())
        .ok_or_else(|| StorageError::DeserializationError {
            reason: format!("malformed token key of length {}", key.len()),
        })?;
    Ok(TokenId::from_be_bytes(raw))
}

fn is_dense<'a>(ids: impl Iterator<Item = &'a TokenId>, last_id: TokenId) -> bool {
    ids.copied().eq(FIRST_TOKEN_ID..=last_id)
}

/// Persistent registry state backed by a batch-capable store.
#[derive(Clone)]
pub struct RegistryStore {
    store: Arc<dyn BatchWriter>,
}

impl RegistryStore {
    pub fn new(store: Arc<dyn BatchWriter>) -> Self {
        Self { store }
    }

    /// Check the persisted schema version; stamp it on a fresh store.
    pub fn check_schema_version(&self) -> Result<(), StorageError> {
        match self.store.get(SCHEMA_VERSION_KEY)? {
            Some(bytes) => {
                let stored: u32 = decode(&bytes)?;
                if stored != SCHEMA_VERSION {
                    return Err(StorageError::DeserializationError {
                        reason: format!(
                            "registry schema mismatch: store is v{}, expected v{}",
                            stored, SCHEMA_VERSION
                        ),
                    });
                }
                Ok(())
            }
            None => self.store.put(SCHEMA_VERSION_KEY, &encode(&SCHEMA_VERSION)?),
        }
    }

    pub fn last_id_op(id: TokenId) -> Result<BatchOp, StorageError> {
        Ok(BatchOp::put(LAST_ID_KEY.to_vec(), encode(&id)?))
    }

    pub fn owner_op(id: TokenId, owner: &Principal) -> BatchOp {
        BatchOp::put(token_key(OWNER_PREFIX, id), owner.to_vec())
    }

    pub fn knowledge_op(id: TokenId, knowledge: &Knowledge) -> Result<BatchOp, StorageError> {
        Ok(BatchOp::put(token_key(KNOWLEDGE_PREFIX, id), encode(knowledge)?))
    }

    /// Apply all ops atomically.
    pub fn commit(&self, ops: Vec<BatchOp>) -> Result<(), StorageError> {
        self.store.write_batch(ops)
    }

    /// Load both stores, verifying that ids `1..=last_id` each have an
    /// owner and a knowledge record and that nothing else is stored.
    pub fn load(&self) -> Result<(TokenStore, ContentStore), StorageError> {
        let last_id: TokenId = match self.store.get(LAST_ID_KEY)? {
            Some(bytes) => decode(&bytes)?,
            None => 0,
        };

        let mut owners = BTreeMap::new();
        for (key, value) in self.store.prefix_scan(OWNER_PREFIX)? {
            let id = id_from_key(&key, OWNER_PREFIX.len())?;
            let owner: Principal = value.as_slice().try_into().map_err(|_| {
                StorageError::DeserializationError {
                    reason: format!("owner of token {} is {} bytes", id, value.len()),
                }
            })?;
            owners.insert(id, owner);
        }

        let mut records = BTreeMap::new();
        for (key, value) in self.store.prefix_scan(KNOWLEDGE_PREFIX)? {
            let id = id_from_key(&key, KNOWLEDGE_PREFIX.len())?;
            records.insert(id, decode::<Knowledge>(&value)?);
        }

        if !is_dense(owners.keys(), last_id) || !is_dense(records.keys(), last_id) {
            return Err(StorageError::DeserializationError {
                reason: format!(
                    "inconsistent registry state: last_id {}, {} owners, {} records",
                    last_id,
                    owners.len(),
                    records.len()
                ),
            });
        }

        Ok((
            TokenStore::from_parts(last_id, owners),
            ContentStore::from_parts(records),
        ))
    }
}

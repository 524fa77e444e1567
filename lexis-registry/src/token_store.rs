//! Id counter and ownership map.

use std::collections::BTreeMap;

use lexis_types::{LexisError, Principal, TokenId};

/// Owns the monotonic id counter and the id → owner mapping.
///
/// Ids are handed out densely starting at 1. Nothing is ever removed from
/// the owner map, so `owners` always holds exactly the ids `1..=last_id`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenStore {
    last_id: TokenId,
    owners: BTreeMap<TokenId, Principal>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from persisted parts. The caller has checked density.
    pub(crate) fn from_parts(last_id: TokenId, owners: BTreeMap<TokenId, Principal>) -> Self {
        Self { last_id, owners }
    }

    /// Id the next `allocate` will return, without reserving it.
    pub fn next_id(&self) -> Result<TokenId, LexisError> {
        self.last_id.checked_add(1).ok_or(LexisError::IdOverflow)
    }

    /// Bump the counter and record `owner` for the new id.
    pub fn allocate(&mut self, owner: Principal) -> Result<TokenId, LexisError> {
        let id = self.next_id()?;
        self.last_id = id;
        self.owners.insert(id, owner);
        Ok(id)
    }

    pub fn owner_of(&self, id: TokenId) -> Option<Principal> {
        self.owners.get(&id).copied()
    }

    pub fn exists(&self, id: TokenId) -> bool {
        self.owners.contains_key(&id)
    }

    /// Replace the owner of an existing token.
    pub fn set_owner(&mut self, id: TokenId, new_owner: Principal) -> Result<(), LexisError> {
        match self.owners.get_mut(&id) {
            Some(owner) => {
                *owner = new_owner;
                Ok(())
            }
            None => Err(LexisError::NotFound(id)),
        }
    }

    /// Number of tokens currently owned by `owner`.
    pub fn balance_of(&self, owner: &Principal) -> u64 {
        self.owners.values().filter(|o| *o == owner).count() as u64
    }

    /// Ids owned by `owner`, ascending.
    pub fn tokens_of(&self, owner: &Principal) -> Vec<TokenId> {
        self.owners
            .iter()
            .filter(|(_, o)| *o == owner)
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn last_id(&self) -> TokenId {
        self.last_id
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TokenId, &Principal)> {
        self.owners.iter()
    }
}

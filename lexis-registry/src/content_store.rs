use std::collections::BTreeMap;

use lexis_types::{Knowledge, LexisError, TokenId};

/// Per-token knowledge payloads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentStore {
    records: BTreeMap<TokenId, Knowledge>,
}

impl ContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_parts(records: BTreeMap<TokenId, Knowledge>) -> Self {
        Self { records }
    }

    /// Insert the record for a freshly allocated id.
    pub fn put(&mut self, id: TokenId, knowledge: Knowledge) {
        self.records.insert(id, knowledge);
    }

    /// Snapshot of the record, if any.
    pub fn get(&self, id: TokenId) -> Option<Knowledge> {
        self.records.get(&id).cloned()
    }

    /// Replace `data`, leaving `topic` and `uri` as minted.
    pub fn update_data(&mut self, id: TokenId, data: String) -> Result<(), LexisError> {
        let record = self.records.get_mut(&id).ok_or(LexisError::NotFound(id))?;
        record.data = data;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TokenId, &Knowledge)> {
        self.records.iter()
    }
}

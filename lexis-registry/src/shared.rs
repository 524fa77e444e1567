//! Registry handle for concurrent hosts.
//!
//! The registry's atomicity relies on operations running one at a time.
//! [`SharedRegistry`] provides that ordering with a single global lock:
//! every mutation holds the write half for its whole duration, queries share
//! the read half.

use std::sync::Arc;

use tokio::sync::RwLock;

use lexis_types::{Knowledge, Principal, TokenId};

use crate::error::RegistryError;
use crate::identity::Context;
use crate::messages::{ExecuteMsg, QueryMsg, Response};
use crate::registry::Registry;

#[derive(Clone)]
pub struct SharedRegistry {
    inner: Arc<RwLock<Registry>>,
}

impl SharedRegistry {
    pub fn new(registry: Registry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(registry)),
        }
    }

    pub async fn mint(
        &self,
        ctx: &Context,
        topic: impl Into<String>,
        data: impl Into<String>,
        uri: impl Into<String>,
    ) -> Result<TokenId, RegistryError> {
        self.inner.write().await.mint(ctx, topic, data, uri)
    }

    pub async fn update(
        &self,
        ctx: &Context,
        id: TokenId,
        data: impl Into<String>,
    ) -> Result<bool, RegistryError> {
        self.inner.write().await.update(ctx, id, data)
    }

    pub async fn transfer(
        &self,
        ctx: &Context,
        id: TokenId,
        from: Principal,
        to: Principal,
    ) -> Result<bool, RegistryError> {
        self.inner.write().await.transfer(ctx, id, from, to)
    }

    pub async fn execute(&self, ctx: &Context, msg: ExecuteMsg) -> Result<Response, RegistryError> {
        self.inner.write().await.execute(ctx, msg)
    }

    pub async fn query(&self, ctx: &Context, msg: QueryMsg) -> Result<Response, RegistryError> {
        self.inner.read().await.query(ctx, msg)
    }

    pub async fn get_knowledge(&self, id: TokenId) -> Option<Knowledge> {
        self.inner.read().await.get_knowledge(id)
    }

    pub async fn get_last_token_id(&self) -> Result<u64, RegistryError> {
        self.inner.read().await.get_last_token_id()
    }

    pub async fn get_token_owner(&self, id: TokenId) -> Result<Option<Principal>, RegistryError> {
        self.inner.read().await.get_token_owner(id)
    }

    pub async fn get_balance(&self, owner: &Principal) -> Result<u64, RegistryError> {
        self.inner.read().await.get_balance(owner)
    }

    /// Run several reads against one consistent snapshot.
    pub async fn read<R>(&self, f: impl FnOnce(&Registry) -> R) -> R {
        f(&*self.inner.read().await)
    }
}

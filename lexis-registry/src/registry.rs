//! The knowledge token registry.
//!
//! [`Registry`] composes a [`TokenStore`] and a [`ContentStore`] and is the
//! only code that mutates them. Every mutation follows the same order:
//!
//! 1. validate against current state (ownership, existence, counter room),
//! 2. commit the change set to the persistent store, if one is attached,
//! 3. apply the change in memory,
//! 4. notify the [`EventSink`].
//!
//! A failure in steps 1 or 2 returns before anything is changed, so callers
//! never observe a partially applied operation.

use std::sync::Arc;

use lexis_storage::{BatchOp, BatchWriter, StorageError};
use lexis_types::address::principal_to_hex;
use lexis_types::primitives::AssetClass;
use lexis_types::{Knowledge, LexisError, Principal, RegistryEvent, TokenId};
use tracing::{debug, info, warn};

use crate::config::RegistryConfig;
use crate::content_store::ContentStore;
use crate::error::RegistryError;
use crate::events::EventSink;
use crate::identity::IdentityContext;
use crate::messages::{ExecuteMsg, QueryMsg, Response};
use crate::persist::RegistryStore;
use crate::token_store::TokenStore;

pub struct Registry {
    tokens: TokenStore,
    content: ContentStore,
    class: AssetClass,
    sink: Arc<dyn EventSink>,
    store: Option<RegistryStore>,
}

impl Registry {
    /// Empty in-memory registry.
    pub fn new(sink: Arc<dyn EventSink>) -> Self {
        Self::from_stores(TokenStore::new(), ContentStore::new(), sink)
    }

    /// Registry over caller-supplied stores.
    ///
    /// The stores must agree: every id in `tokens` has a record in `content`.
    pub fn from_stores(tokens: TokenStore, content: ContentStore, sink: Arc<dyn EventSink>) -> Self {
        Self {
            tokens,
            content,
            class: AssetClass::default(),
            sink,
            store: None,
        }
    }

    /// Registry persisted to `store`, restoring whatever it already holds.
    pub fn with_store(store: Arc<dyn BatchWriter>, sink: Arc<dyn EventSink>) -> Result<Self, RegistryError> {
        let store = RegistryStore::new(store);
        store.check_schema_version()?;
        let (tokens, content) = store.load()?;
        info!(
            "restored registry: last_id {}, {} records",
            tokens.last_id(),
            content.len()
        );
        let mut registry = Self::from_stores(tokens, content, sink);
        registry.store = Some(store);
        Ok(registry)
    }

    /// Registry built from configuration: backend and collection names.
    pub fn open(config: &RegistryConfig, sink: Arc<dyn EventSink>) -> Result<Self, RegistryError> {
        let registry = match config.open_store()? {
            Some(store) => Self::with_store(store, sink)?,
            None => Self::new(sink),
        };
        Ok(registry.with_asset_class(config.asset_class()))
    }

    pub fn with_asset_class(mut self, class: AssetClass) -> Self {
        self.class = class;
        self
    }

    pub fn asset_class(&self) -> &AssetClass {
        &self.class
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    pub fn content(&self) -> &ContentStore {
        &self.content
    }

    // ── Access control ─────────────────────────────────────────────────

    /// The single authorization rule: `caller` currently owns `id`.
    /// False for ids that were never minted.
    fn is_owner(&self, id: TokenId, caller: &Principal) -> bool {
        self.tokens.owner_of(id).as_ref() == Some(caller)
    }

    fn persist(
        &self,
        ops: impl FnOnce() -> Result<Vec<BatchOp>, StorageError>,
    ) -> Result<(), RegistryError> {
        if let Some(store) = &self.store {
            store.commit(ops()?)?;
        }
        Ok(())
    }

    // ── Mutations ──────────────────────────────────────────────────────

    /// Mint a new knowledge token owned by the caller. Open to anyone.
    pub fn mint(
        &mut self,
        ctx: &impl IdentityContext,
        topic: impl Into<String>,
        data: impl Into<String>,
        uri: impl Into<String>,
    ) -> Result<TokenId, RegistryError> {
        let knowledge = Knowledge::new(topic, data, uri);
        self.mint_knowledge(ctx.caller(), knowledge).map(|(id, _)| id)
    }

    fn mint_knowledge(
        &mut self,
        owner: Principal,
        knowledge: Knowledge,
    ) -> Result<(TokenId, RegistryEvent), RegistryError> {
        let id = self.tokens.next_id()?;
        self.persist(|| {
            Ok(vec![
                RegistryStore::last_id_op(id)?,
                RegistryStore::owner_op(id, &owner),
                RegistryStore::knowledge_op(id, &knowledge)?,
            ])
        })?;

        let allocated = self.tokens.allocate(owner)?;
        debug_assert_eq!(allocated, id);
        self.content.put(id, knowledge);

        info!("minted knowledge token {} to {}", id, principal_to_hex(&owner));
        let event = RegistryEvent::Mint {
            id,
            owner,
            class: self.class.class.clone(),
            asset: self.class.asset.clone(),
        };
        self.sink.emit(&event);
        Ok((id, event))
    }

    /// Replace the `data` of a token. Only the current owner may do this;
    /// an unknown id is rejected the same way as a foreign one.
    pub fn update(
        &mut self,
        ctx: &impl IdentityContext,
        id: TokenId,
        data: impl Into<String>,
    ) -> Result<bool, RegistryError> {
        let caller = ctx.caller();
        if !self.is_owner(id, &caller) {
            warn!(
                "rejected update of token {} by {}: not token owner",
                id,
                principal_to_hex(&caller)
            );
            return Err(LexisError::NotTokenOwner { id }.into());
        }
        let current = self.content.get(id).ok_or(LexisError::NotFound(id))?;
        let updated = current.with_data(data);

        self.persist(|| Ok(vec![RegistryStore::knowledge_op(id, &updated)?]))?;
        self.content.update_data(id, updated.data)?;

        debug!("updated knowledge data of token {}", id);
        Ok(true)
    }

    /// Move token `id` from `from` to `to`.
    ///
    /// The caller must be `from`, and `from` must own the token. A token
    /// that was never minted is reported as `NotFound`. Transferring to
    /// oneself is allowed and still emits a `Transfer` event.
    pub fn transfer(
        &mut self,
        ctx: &impl IdentityContext,
        id: TokenId,
        from: Principal,
        to: Principal,
    ) -> Result<bool, RegistryError> {
        self.transfer_token(ctx.caller(), id, from, to).map(|_| true)
    }

    fn transfer_token(
        &mut self,
        caller: Principal,
        id: TokenId,
        from: Principal,
        to: Principal,
    ) -> Result<RegistryEvent, RegistryError> {
        if caller != from {
            warn!(
                "rejected transfer of token {}: caller {} is not sender {}",
                id,
                principal_to_hex(&caller),
                principal_to_hex(&from)
            );
            return Err(LexisError::NotTokenOwner { id }.into());
        }
        if !self.tokens.exists(id) {
            warn!("rejected transfer of token {}: not found", id);
            return Err(LexisError::NotFound(id).into());
        }
        if !self.is_owner(id, &caller) {
            warn!(
                "rejected transfer of token {} by {}: not token owner",
                id,
                principal_to_hex(&caller)
            );
            return Err(LexisError::NotTokenOwner { id }.into());
        }

        self.persist(|| Ok(vec![RegistryStore::owner_op(id, &to)]))?;
        self.tokens.set_owner(id, to)?;

        info!(
            "transferred knowledge token {} from {} to {}",
            id,
            principal_to_hex(&from),
            principal_to_hex(&to)
        );
        let event = RegistryEvent::Transfer { id, from, to };
        self.sink.emit(&event);
        Ok(event)
    }

    // ── Queries ────────────────────────────────────────────────────────

    /// Full content of a token. Anyone may read any token.
    pub fn get_knowledge(&self, id: TokenId) -> Option<Knowledge> {
        let knowledge = self.content.get(id);
        if knowledge.is_none() {
            debug!("get_knowledge: no token {}", id);
        }
        knowledge
    }

    /// Id of the most recently minted token, `0` before the first mint.
    pub fn get_last_token_id(&self) -> Result<u64, RegistryError> {
        Ok(self.tokens.last_id())
    }

    pub fn get_token_owner(&self, id: TokenId) -> Result<Option<Principal>, RegistryError> {
        Ok(self.tokens.owner_of(id))
    }

    pub fn get_balance(&self, owner: &Principal) -> Result<u64, RegistryError> {
        Ok(self.tokens.balance_of(owner))
    }

    /// SIP009 token URI: the provenance pointer fixed at mint.
    pub fn get_token_uri(&self, id: TokenId) -> Result<Option<String>, RegistryError> {
        Ok(self.content.get(id).map(|k| k.uri))
    }

    /// Ids currently owned by `owner`, ascending.
    pub fn tokens_of(&self, owner: &Principal) -> Vec<TokenId> {
        self.tokens.tokens_of(owner)
    }

    // ── Message dispatch ───────────────────────────────────────────────

    /// Handle a state-changing message on behalf of the context's caller.
    pub fn execute(
        &mut self,
        ctx: &impl IdentityContext,
        msg: ExecuteMsg,
    ) -> Result<Response, RegistryError> {
        let caller = ctx.caller();
        match msg {
            ExecuteMsg::Mint { topic, data, uri } => {
                let (id, event) = self.mint_knowledge(caller, Knowledge { topic, data, uri })?;
                Response::new().add_event(event).set_data(&id)
            }
            ExecuteMsg::Update { id, data } => {
                let ok = self.update(ctx, id, data)?;
                Response::new().set_data(&ok)
            }
            ExecuteMsg::Transfer { id, from, to } => {
                let event = self.transfer_token(caller, id, from, to)?;
                Response::new().add_event(event).set_data(&true)
            }
        }
    }

    /// Handle a read-only message. The caller is not consulted.
    pub fn query(
        &self,
        _ctx: &impl IdentityContext,
        msg: QueryMsg,
    ) -> Result<Response, RegistryError> {
        match msg {
            QueryMsg::GetKnowledge { id } => Response::new().set_data(&self.get_knowledge(id)),
            QueryMsg::GetLastTokenId => Response::new().set_data(&self.get_last_token_id()?),
            QueryMsg::GetTokenOwner { id } => Response::new().set_data(&self.get_token_owner(id)?),
            QueryMsg::GetBalance { owner } => Response::new().set_data(&self.get_balance(&owner)?),
            QueryMsg::GetTokenUri { id } => Response::new().set_data(&self.get_token_uri(id)?),
        }
    }
}

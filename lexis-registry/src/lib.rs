//! Owner-gated knowledge token registry.
//!
//! A [`Registry`] issues sequentially numbered tokens, each carrying a
//! [`Knowledge`](lexis_types::Knowledge) record. Anyone can mint; only the
//! current owner can rewrite a token's data or transfer it; anyone can read.
//!
//! ```ignore
//! use std::sync::Arc;
//! use lexis_registry::{Context, Registry, TracingSink};
//!
//! let mut registry = Registry::new(Arc::new(TracingSink));
//! let alice = Context::new([1u8; 20]);
//! let id = registry.mint(&alice, "AI Ethics", "...", "https://example.com/ai-ethics")?;
//! registry.update(&alice, id, "revised")?;
//! registry.transfer(&alice, id, [1u8; 20], [2u8; 20])?;
//! ```

pub mod config;
pub mod content_store;
pub mod error;
pub mod events;
pub mod identity;
pub mod messages;
pub mod persist;
pub mod registry;
pub mod shared;
pub mod telemetry;
pub mod testing;
pub mod token_store;

pub use config::RegistryConfig;
pub use content_store::ContentStore;
pub use error::RegistryError;
pub use events::{EventSink, MemorySink, NullSink, TracingSink};
pub use identity::{Context, IdentityContext};
pub use messages::{ExecuteMsg, QueryMsg, Response};
pub use registry::Registry;
pub use shared::SharedRegistry;
pub use token_store::TokenStore;

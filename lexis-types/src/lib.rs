//! Shared type definitions for the Lexis knowledge token registry.

pub mod address;
pub mod error;
pub mod event;
pub mod knowledge;
pub mod primitives;

pub use error::LexisError;
pub use event::RegistryEvent;
pub use knowledge::Knowledge;
pub use primitives::{Principal, TokenId};

//! Caller identity for registry operations.
//!
//! The registry does not authenticate anyone. Whatever drives it (a block
//! executor, an RPC layer, a test) resolves the caller first and hands the
//! registry an [`IdentityContext`].

use lexis_types::Principal;

/// Source of the already-authenticated calling principal.
pub trait IdentityContext {
    fn caller(&self) -> Principal;
}

impl<T: IdentityContext + ?Sized> IdentityContext for &T {
    fn caller(&self) -> Principal {
        (**self).caller()
    }
}

/// Execution context carrying the caller of a single operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Context {
    caller: Principal,
}

impl Context {
    pub fn new(caller: Principal) -> Self {
        Self { caller }
    }

    /// Whether the caller is `expected`.
    pub fn is_caller(&self, expected: &Principal) -> bool {
        self.caller == *expected
    }
}

impl IdentityContext for Context {
    fn caller(&self) -> Principal {
        self.caller
    }
}

impl From<Principal> for Context {
    fn from(caller: Principal) -> Self {
        Self::new(caller)
    }
}

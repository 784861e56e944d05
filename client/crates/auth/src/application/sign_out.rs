//! Sign Out Use Case
//!
//! Forgets the local session. There is no server-side logout endpoint;
//! the tokens simply stop being presented.

use std::sync::Arc;

use crate::domain::repository::CredentialStore;
use crate::error::AuthResult;

/// Sign out use case
pub struct SignOutUseCase<S>
where
    S: CredentialStore,
{
    store: Arc<S>,
}

impl<S> SignOutUseCase<S>
where
    S: CredentialStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Clear the stored session; a no-op when none exists
    pub fn execute(&self) -> AuthResult<()> {
        self.store.clear()
    }
}

//! Restore Session Use Case
//!
//! Rehydrates the persisted session at startup. The cached identity is
//! trusted as-is; the first authenticated request will find out if the
//! tokens are stale.

use std::sync::Arc;

use crate::domain::repository::CredentialStore;
use crate::domain::value_object::Identity;
use crate::error::AuthResult;

/// Restore session use case
pub struct RestoreSessionUseCase<S>
where
    S: CredentialStore,
{
    store: Arc<S>,
}

impl<S> RestoreSessionUseCase<S>
where
    S: CredentialStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Identity of the persisted session, if a complete one exists
    pub fn execute(&self) -> AuthResult<Option<Identity>> {
        let identity = self.store.load()?.map(|session| session.identity);

        match &identity {
            Some(identity) => tracing::debug!(username = %identity, "Restored session"),
            None => tracing::debug!("No persisted session"),
        }
        Ok(identity)
    }
}

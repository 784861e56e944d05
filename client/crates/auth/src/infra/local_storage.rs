//! Local Storage Credential Store
//!
//! Persists the session as three string keys on a [`KeyValueStore`],
//! the same layout a browser client keeps in local storage.
//!
//! The backend only offers independent single-key writes, so ordering
//! carries the invariant: tokens are written before the identity and the
//! identity is removed before the tokens. Whatever a crash leaves behind,
//! an identity never sits next to missing tokens, and `load` rejects any
//! incomplete triple.

use std::sync::RwLock;

use platform::KeyValueStore;

use crate::domain::entity::Session;
use crate::domain::repository::CredentialStore;
use crate::domain::value_object::{AccessToken, Identity, RefreshToken};
use crate::error::{AuthError, AuthResult};

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
pub const IDENTITY_KEY: &str = "user";

/// [`CredentialStore`] over any key/value backend
pub struct LocalCredentialStore<K: KeyValueStore> {
    backend: K,
    // Readers never observe a half-written triple from this process
    guard: RwLock<()>,
}

impl<K: KeyValueStore> LocalCredentialStore<K> {
    pub fn new(backend: K) -> Self {
        Self {
            backend,
            guard: RwLock::new(()),
        }
    }

    pub fn backend(&self) -> &K {
        &self.backend
    }

    fn read_non_empty(&self, key: &str) -> AuthResult<Option<String>> {
        Ok(self
            .backend
            .get(key)?
            .filter(|value| !value.trim().is_empty()))
    }

    fn remove_all(&self) -> AuthResult<()> {
        self.backend.remove(IDENTITY_KEY)?;
        self.backend.remove(REFRESH_TOKEN_KEY)?;
        self.backend.remove(ACCESS_TOKEN_KEY)?;
        Ok(())
    }
}

fn poisoned() -> AuthError {
    AuthError::Storage(platform::StorageError::Poisoned)
}

impl<K: KeyValueStore> CredentialStore for LocalCredentialStore<K> {
    fn load(&self) -> AuthResult<Option<Session>> {
        let _read = self.guard.read().map_err(|_| poisoned())?;

        let (Some(access), Some(refresh), Some(identity)) = (
            self.read_non_empty(ACCESS_TOKEN_KEY)?,
            self.read_non_empty(REFRESH_TOKEN_KEY)?,
            self.read_non_empty(IDENTITY_KEY)?,
        ) else {
            return Ok(None);
        };

        let identity = match Identity::from_json(&identity) {
            Ok(identity) => identity,
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable cached identity");
                return Ok(None);
            }
        };

        // Both are non-empty after the filter above
        let (Ok(access), Ok(refresh)) = (AccessToken::new(access), RefreshToken::new(refresh))
        else {
            return Ok(None);
        };

        Ok(Some(Session::new(access, refresh, identity)))
    }

    fn save(&self, session: &Session) -> AuthResult<()> {
        let _write = self.guard.write().map_err(|_| poisoned())?;
        let identity = session.identity.to_json()?;

        // A stale identity must not outlive the tokens it described
        self.backend.remove(IDENTITY_KEY)?;
        let written = self
            .backend
            .set(ACCESS_TOKEN_KEY, session.access_token.as_str())
            .and_then(|_| {
                self.backend
                    .set(REFRESH_TOKEN_KEY, session.refresh_token.as_str())
            })
            .and_then(|_| self.backend.set(IDENTITY_KEY, &identity));

        if let Err(e) = written {
            if let Err(cleanup) = self.remove_all() {
                tracing::error!(error = %cleanup, "Failed to roll back partial session write");
            }
            return Err(e.into());
        }

        tracing::debug!(username = %session.identity, "Session persisted");
        Ok(())
    }

    fn clear(&self) -> AuthResult<()> {
        let _write = self.guard.write().map_err(|_| poisoned())?;
        self.remove_all()?;
        tracing::debug!("Session cleared");
        Ok(())
    }

    fn update_access_token(&self, token: &AccessToken) -> AuthResult<bool> {
        let _write = self.guard.write().map_err(|_| poisoned())?;

        // A lone access token must never reappear in a cleared store
        if self.read_non_empty(REFRESH_TOKEN_KEY)?.is_none()
            || self.read_non_empty(IDENTITY_KEY)?.is_none()
        {
            tracing::debug!("No stored session, access token discarded");
            return Ok(false);
        }

        self.backend.set(ACCESS_TOKEN_KEY, token.as_str())?;
        Ok(true)
    }
}

//! Repository Traits
//!
//! Interfaces for session persistence. Implementation is in infrastructure layer.

use crate::domain::entity::Session;
use crate::domain::value_object::AccessToken;
use crate::error::AuthResult;

/// Credential store trait
///
/// The single source of truth for the persisted session. Calls are
/// synchronous, mirroring the key/value storage underneath.
pub trait CredentialStore: Send + Sync {
    /// Persisted session, or `None` unless all three parts are present
    fn load(&self) -> AuthResult<Option<Session>>;

    /// Persist all three parts of the session
    fn save(&self, session: &Session) -> AuthResult<()>;

    /// Remove all three parts; clearing an empty store is a no-op
    fn clear(&self) -> AuthResult<()>;

    /// Replace only the access token of the stored session
    ///
    /// Returns `false` and writes nothing when no session is stored.
    fn update_access_token(&self, token: &AccessToken) -> AuthResult<bool>;
}

impl<S: CredentialStore + ?Sized> CredentialStore for std::sync::Arc<S> {
    fn load(&self) -> AuthResult<Option<Session>> {
        (**self).load()
    }

    fn save(&self, session: &Session) -> AuthResult<()> {
        (**self).save(session)
    }

    fn clear(&self) -> AuthResult<()> {
        (**self).clear()
    }

    fn update_access_token(&self, token: &AccessToken) -> AuthResult<bool> {
        (**self).update_access_token(token)
    }
}

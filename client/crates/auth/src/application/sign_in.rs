//! Sign In Use Case
//!
//! Exchanges username and password for a token pair and persists the
//! resulting session.

use std::sync::Arc;

use platform::HttpTransport;

use crate::application::config::AuthConfig;
use crate::application::dispatcher::RequestDispatcher;
use crate::domain::entity::Session;
use crate::domain::repository::CredentialStore;
use crate::domain::value_object::{Identity, Password, UserName};
use crate::error::{AuthError, AuthResult};
use crate::infra::endpoints;

/// Sign in input
pub struct SignInInput {
    pub username: String,
    pub password: String,
}

impl Drop for SignInInput {
    fn drop(&mut self) {
        use zeroize::Zeroize;
        self.password.zeroize();
    }
}

/// Sign in use case
pub struct SignInUseCase<T, S>
where
    T: HttpTransport,
    S: CredentialStore,
{
    dispatcher: Arc<RequestDispatcher<T, S>>,
    store: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<T, S> SignInUseCase<T, S>
where
    T: HttpTransport + Send + Sync + 'static,
    S: CredentialStore + 'static,
{
    pub fn new(
        dispatcher: Arc<RequestDispatcher<T, S>>,
        store: Arc<S>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            dispatcher,
            store,
            config,
        }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<Session> {
        // Nothing the server could accept; skip the round trip
        let username = UserName::new(&input.username).map_err(|_| AuthError::InvalidCredentials)?;
        let password = Password::new(input.password.as_str()).map_err(|_| AuthError::InvalidCredentials)?;

        self.execute_validated(username, &password).await
    }

    pub(crate) async fn execute_validated(
        &self,
        username: UserName,
        password: &Password,
    ) -> AuthResult<Session> {
        let request = endpoints::login_request(&self.config, &username, password)?;
        let response = self.dispatcher.send(request).await?;
        let (access_token, refresh_token) = endpoints::parse_login_response(&response)?;

        let session = Session::new(access_token, refresh_token, Identity::new(username));
        self.store.save(&session)?;

        tracing::debug!(username = %session.identity, "Login accepted");
        Ok(session)
    }
}

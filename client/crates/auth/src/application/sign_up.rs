//! Sign Up Use Case
//!
//! Registers a new account, then signs in with the same credentials.

use std::sync::Arc;

use platform::HttpTransport;

use crate::application::config::AuthConfig;
use crate::application::dispatcher::RequestDispatcher;
use crate::application::sign_in::SignInUseCase;
use crate::domain::entity::{RegistrationForm, Session};
use crate::domain::repository::CredentialStore;
use crate::error::AuthResult;
use crate::infra::endpoints;

/// Sign up use case
pub struct SignUpUseCase<T, S>
where
    T: HttpTransport,
    S: CredentialStore,
{
    dispatcher: Arc<RequestDispatcher<T, S>>,
    sign_in: Arc<SignInUseCase<T, S>>,
    config: Arc<AuthConfig>,
}

impl<T, S> SignUpUseCase<T, S>
where
    T: HttpTransport + Send + Sync + 'static,
    S: CredentialStore + 'static,
{
    pub fn new(
        dispatcher: Arc<RequestDispatcher<T, S>>,
        sign_in: Arc<SignInUseCase<T, S>>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            dispatcher,
            sign_in,
            config,
        }
    }

    /// Validate locally, register, then auto-login
    ///
    /// A form that fails local validation never reaches the endpoint.
    pub async fn execute(&self, form: RegistrationForm) -> AuthResult<Session> {
        let registration = form.validate()?;

        let request = endpoints::register_request(&self.config, &registration)?;
        let response = self.dispatcher.send(request).await?;
        endpoints::parse_register_response(&response)?;

        tracing::info!(username = %registration.username, "Account registered");

        self.sign_in
            .execute_validated(registration.username, &registration.password)
            .await
    }
}

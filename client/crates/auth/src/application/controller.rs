//! Session Controller
//!
//! The only entry point the rest of the client uses to change
//! authentication state. Constructed explicitly and shared by handle;
//! [`SessionController::initialize`] replaces implicit startup loading.

use std::sync::{Arc, OnceLock};

use platform::HttpTransport;
use tokio::sync::watch;

use crate::application::config::AuthConfig;
use crate::application::dispatcher::RequestDispatcher;
use crate::application::restore_session::RestoreSessionUseCase;
use crate::application::sign_in::{SignInInput, SignInUseCase};
use crate::application::sign_out::SignOutUseCase;
use crate::application::sign_up::SignUpUseCase;
use crate::application::state::{AuthState, Navigator, SessionEnd, SessionSignal};
use crate::domain::entity::RegistrationForm;
use crate::domain::repository::CredentialStore;
use crate::domain::value_object::Identity;
use crate::error::AuthResult;

/// Session controller
pub struct SessionController<T, S>
where
    T: HttpTransport,
    S: CredentialStore,
{
    dispatcher: Arc<RequestDispatcher<T, S>>,
    signal: Arc<SessionSignal>,
    restore: RestoreSessionUseCase<S>,
    sign_in: Arc<SignInUseCase<T, S>>,
    sign_up: SignUpUseCase<T, S>,
    sign_out: SignOutUseCase<S>,
    initialized: OnceLock<()>,
}

impl<T, S> SessionController<T, S>
where
    T: HttpTransport + Send + Sync + 'static,
    S: CredentialStore + 'static,
{
    pub fn new(
        transport: Arc<T>,
        store: Arc<S>,
        navigator: Arc<dyn Navigator>,
        config: AuthConfig,
    ) -> Self {
        let config = Arc::new(config);
        let signal = Arc::new(SessionSignal::new(
            navigator,
            config.home_route,
            config.entry_route,
        ));
        let dispatcher = Arc::new(RequestDispatcher::new(
            transport,
            Arc::clone(&store),
            Arc::clone(&signal),
            Arc::clone(&config),
        ));
        let sign_in = Arc::new(SignInUseCase::new(
            Arc::clone(&dispatcher),
            Arc::clone(&store),
            Arc::clone(&config),
        ));
        let sign_up = SignUpUseCase::new(
            Arc::clone(&dispatcher),
            Arc::clone(&sign_in),
            Arc::clone(&config),
        );

        Self {
            dispatcher,
            signal,
            restore: RestoreSessionUseCase::new(Arc::clone(&store)),
            sign_in,
            sign_up,
            sign_out: SignOutUseCase::new(store),
            initialized: OnceLock::new(),
        }
    }

    /// Leave `Loading` by reading the persisted session
    ///
    /// Runs once; later calls just report the current state. A storage
    /// failure is logged and treated as "no session".
    pub fn initialize(&self) -> AuthState {
        self.initialized.get_or_init(|| {
            let identity = self.restore.execute().unwrap_or_else(|e| {
                e.log();
                None
            });
            self.signal.resolve(identity);
        });
        self.signal.state()
    }

    /// Log in and navigate home
    ///
    /// On failure the state is unchanged and the error is returned as-is,
    /// so a transport failure stays distinguishable from a rejection.
    pub async fn login(&self, input: SignInInput) -> AuthResult<Identity> {
        self.initialize();

        match self.sign_in.execute(input).await {
            Ok(session) => {
                let identity = session.identity;
                self.signal.signed_in(identity.clone());
                Ok(identity)
            }
            Err(e) => {
                e.log();
                Err(e)
            }
        }
    }

    /// Register, auto-login, navigate home
    pub async fn register(&self, form: RegistrationForm) -> AuthResult<Identity> {
        self.initialize();

        match self.sign_up.execute(form).await {
            Ok(session) => {
                let identity = session.identity;
                self.signal.signed_in(identity.clone());
                Ok(identity)
            }
            Err(e) => {
                e.log();
                Err(e)
            }
        }
    }

    /// Forget the session and navigate to the entry route; never fails
    pub fn logout(&self) {
        self.initialize();

        if let Err(e) = self.sign_out.execute() {
            e.log();
        }
        self.signal.ended(SessionEnd::SignedOut);
    }

    pub fn state(&self) -> AuthState {
        self.signal.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.signal.subscribe()
    }

    pub fn identity(&self) -> Option<Identity> {
        self.signal.state().identity().cloned()
    }

    /// Why the most recent session ended, if one has
    pub fn last_end(&self) -> Option<SessionEnd> {
        self.signal.last_end()
    }

    /// Dispatcher for authenticated data requests
    pub fn dispatcher(&self) -> Arc<RequestDispatcher<T, S>> {
        Arc::clone(&self.dispatcher)
    }
}

//! Request Dispatcher
//!
//! Every authenticated API call goes through [`RequestDispatcher::send`]:
//! the stored access token is attached as a bearer credential and a 401 is
//! answered with at most one refresh-and-retry cycle.
//!
//! ## Refresh coalescing
//! Refreshes are serialized behind an async mutex that also records the
//! outcome of the last refresh together with a generation counter. A
//! request remembers the generation it observed before sending; if that
//! generation has moved on by the time its 401 is handled, some other
//! request already refreshed, and the recorded outcome is reused instead
//! of issuing another refresh call.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use http::StatusCode;
use kernel::id::RequestId;
use platform::{ApiRequest, ApiResponse, CredentialMode, HttpTransport};
use tokio::sync::Mutex;

use crate::application::config::AuthConfig;
use crate::application::state::{SessionEnd, SessionSignal};
use crate::domain::repository::CredentialStore;
use crate::domain::value_object::{AccessToken, RefreshToken};
use crate::error::{AuthError, AuthResult};
use crate::infra::endpoints;

/// Where a logical request is in its retry budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attempt {
    First,
    Retried,
}

/// Result of one refresh call, shared with every request waiting on it
#[derive(Debug, Clone)]
enum RefreshOutcome {
    Refreshed(AccessToken),
    // The session was cleared while the refresh was in flight
    SignedOut,
    Expired,
}

#[derive(Debug, Default)]
struct RefreshLedger {
    generation: u64,
    last: Option<RefreshOutcome>,
}

/// Request dispatcher
pub struct RequestDispatcher<T, S>
where
    T: HttpTransport,
    S: CredentialStore,
{
    transport: Arc<T>,
    store: Arc<S>,
    signal: Arc<SessionSignal>,
    config: Arc<AuthConfig>,
    ledger: Mutex<RefreshLedger>,
    // Lock-free mirror of `ledger.generation`, read before each send
    generation: AtomicU64,
}

impl<T, S> RequestDispatcher<T, S>
where
    T: HttpTransport + Send + Sync + 'static,
    S: CredentialStore + 'static,
{
    pub fn new(
        transport: Arc<T>,
        store: Arc<S>,
        signal: Arc<SessionSignal>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            transport,
            store,
            signal,
            config,
            ledger: Mutex::new(RefreshLedger::default()),
            generation: AtomicU64::new(0),
        }
    }

    /// Send a request
    ///
    /// Returns the server's response whatever its status; only the
    /// failure to get a response, a storage failure, or a failed refresh
    /// (`SessionExpired`) are errors. A 401 that arrives after the store
    /// was cleared is returned unchanged.
    pub async fn send(&self, request: ApiRequest) -> AuthResult<ApiResponse> {
        let request_id = RequestId::new();

        if request.credentials == CredentialMode::Omit {
            let mut request = request;
            request.clear_bearer();
            tracing::debug!(
                request_id = %request_id,
                method = %request.method,
                path = %request.path,
                "Dispatching public request"
            );
            return Ok(self.transport.execute(&request).await?);
        }

        self.dispatch(request_id, request).await
    }

    async fn dispatch(&self, request_id: RequestId, mut request: ApiRequest) -> AuthResult<ApiResponse> {
        let mut attempt = Attempt::First;
        let mut observed = self.generation.load(Ordering::Acquire);

        match &self.store.load()? {
            Some(session) => request.set_bearer(&session.access_token.bearer())?,
            None => request.clear_bearer(),
        }

        loop {
            tracing::debug!(
                request_id = %request_id,
                method = %request.method,
                path = %request.path,
                retried = attempt == Attempt::Retried,
                "Dispatching request"
            );

            let response = self.transport.execute(&request).await?;

            if response.status != StatusCode::UNAUTHORIZED || attempt == Attempt::Retried {
                tracing::debug!(
                    request_id = %request_id,
                    status = response.status.as_u16(),
                    "Request completed"
                );
                return Ok(response);
            }

            // The session may have ended while the request was in flight
            let Some(current) = self.store.load()? else {
                tracing::debug!(request_id = %request_id, "401 without a session, not refreshing");
                return Ok(response);
            };

            match self.refresh(request_id, observed, &current.refresh_token).await? {
                RefreshOutcome::Refreshed(token) => {
                    request.set_bearer(&token.bearer())?;
                    attempt = Attempt::Retried;
                    observed = self.generation.load(Ordering::Acquire);
                }
                RefreshOutcome::SignedOut => {
                    tracing::debug!(request_id = %request_id, "Signed out during refresh, not retrying");
                    return Ok(response);
                }
                RefreshOutcome::Expired => return Err(AuthError::SessionExpired),
            }
        }
    }

    /// Refresh the access token, or reuse a refresh that completed after
    /// `observed` was read
    async fn refresh(
        &self,
        request_id: RequestId,
        observed: u64,
        refresh_token: &RefreshToken,
    ) -> AuthResult<RefreshOutcome> {
        let mut ledger = self.ledger.lock().await;

        if ledger.generation != observed {
            if let Some(outcome) = &ledger.last {
                tracing::debug!(request_id = %request_id, "Reusing concurrent refresh outcome");
                return Ok(outcome.clone());
            }
        }

        tracing::debug!(request_id = %request_id, "Access token rejected, refreshing");
        let request = endpoints::refresh_request(&self.config, refresh_token)?;

        let parsed = match self.transport.execute(&request).await {
            Ok(response) => endpoints::parse_refresh_response(&response),
            Err(e) => Err(AuthError::Transport(e)),
        };

        // Any refresh failure, unreachable server included, ends the session
        let outcome = match parsed {
            Ok(token) => {
                if self.store.update_access_token(&token)? {
                    tracing::info!(request_id = %request_id, "Access token refreshed");
                    RefreshOutcome::Refreshed(token)
                } else {
                    RefreshOutcome::SignedOut
                }
            }
            Err(e) => {
                e.log();
                self.expire();
                RefreshOutcome::Expired
            }
        };

        ledger.generation += 1;
        ledger.last = Some(outcome.clone());
        self.generation.store(ledger.generation, Ordering::Release);

        Ok(outcome)
    }

    /// Failed refresh: same effect as an explicit logout
    fn expire(&self) {
        if let Err(e) = self.store.clear() {
            e.log();
        }
        self.signal.ended(SessionEnd::Expired);
    }

    pub fn transport(&self) -> &Arc<T> {
        &self.transport
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }
}

impl<T, S> std::fmt::Debug for RequestDispatcher<T, S>
where
    T: HttpTransport,
    S: CredentialStore,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestDispatcher")
            .field("generation", &self.generation.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

//! Session State
//!
//! The three-state authentication machine, its observers and the
//! navigation side effect fired on transitions.

use std::sync::{Arc, Mutex};

use tokio::sync::watch;

use crate::domain::value_object::Identity;

/// Authentication state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    /// Persisted session not read yet
    Loading,
    Authenticated(Identity),
    Unauthenticated,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated(_))
    }

    pub fn identity(&self) -> Option<&Identity> {
        match self {
            AuthState::Authenticated(identity) => Some(identity),
            _ => None,
        }
    }
}

/// Navigation targets the session core knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Dashboard,
}

impl Route {
    pub fn as_str(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Dashboard => "/dashboard",
        }
    }
}

/// Why the last session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    SignedOut,
    Expired,
}

/// Navigation port
///
/// Invoked on login success, logout and session expiry. The core never
/// routes by itself.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

impl<F> Navigator for F
where
    F: Fn(Route) + Send + Sync,
{
    fn navigate(&self, route: Route) {
        self(route)
    }
}

/// Shared sink for state transitions
///
/// Owned jointly by the controller and the dispatcher so that an expiry
/// detected mid-request lands in the same state machine as an explicit
/// logout.
pub struct SessionSignal {
    state: watch::Sender<AuthState>,
    last_end: Mutex<Option<SessionEnd>>,
    navigator: Arc<dyn Navigator>,
    home_route: Route,
    entry_route: Route,
}

impl SessionSignal {
    pub fn new(navigator: Arc<dyn Navigator>, home_route: Route, entry_route: Route) -> Self {
        Self {
            state: watch::Sender::new(AuthState::Loading),
            last_end: Mutex::new(None),
            navigator,
            home_route,
            entry_route,
        }
    }

    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    pub fn last_end(&self) -> Option<SessionEnd> {
        self.last_end.lock().ok().and_then(|end| *end)
    }

    /// Leave `Loading` with whatever the store held; no navigation
    pub(crate) fn resolve(&self, identity: Option<Identity>) {
        let next = match identity {
            Some(identity) => AuthState::Authenticated(identity),
            None => AuthState::Unauthenticated,
        };
        self.state.send_replace(next);
    }

    /// Enter `Authenticated` and go to the home route
    pub(crate) fn signed_in(&self, identity: Identity) {
        tracing::info!(username = %identity, "Signed in");
        self.state.send_replace(AuthState::Authenticated(identity));
        if let Ok(mut end) = self.last_end.lock() {
            *end = None;
        }
        self.navigator.navigate(self.home_route);
    }

    /// Enter `Unauthenticated` and go to the entry route
    ///
    /// An end signalled while still `Loading` leaves the state alone;
    /// initialization resolves it from the (now empty) store.
    pub(crate) fn ended(&self, reason: SessionEnd) {
        self.state.send_if_modified(|state| match state {
            AuthState::Loading | AuthState::Unauthenticated => false,
            AuthState::Authenticated(_) => {
                *state = AuthState::Unauthenticated;
                true
            }
        });
        if let Ok(mut end) = self.last_end.lock() {
            *end = Some(reason);
        }

        match reason {
            SessionEnd::SignedOut => tracing::info!("Signed out"),
            SessionEnd::Expired => tracing::warn!("Session expired, returning to login"),
        }
        self.navigator.navigate(self.entry_route);
    }
}

impl std::fmt::Debug for SessionSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionSignal")
            .field("state", &*self.state.borrow())
            .field("last_end", &self.last_end())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::UserName;

    fn recording_navigator() -> (Arc<Mutex<Vec<Route>>>, Arc<dyn Navigator>) {
        let routes = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&routes);
        let navigator: Arc<dyn Navigator> = Arc::new(move |route: Route| {
            sink.lock().unwrap().push(route);
        });
        (routes, navigator)
    }

    fn alice() -> Identity {
        Identity::new(UserName::new("alice").unwrap())
    }

    #[test]
    fn test_starts_loading() {
        let (_, navigator) = recording_navigator();
        let signal = SessionSignal::new(navigator, Route::Dashboard, Route::Login);
        assert_eq!(signal.state(), AuthState::Loading);
    }

    #[test]
    fn test_sign_in_then_expire() {
        let (routes, navigator) = recording_navigator();
        let signal = SessionSignal::new(navigator, Route::Dashboard, Route::Login);
        signal.resolve(None);

        signal.signed_in(alice());
        assert_eq!(signal.state(), AuthState::Authenticated(alice()));

        signal.ended(SessionEnd::Expired);
        assert_eq!(signal.state(), AuthState::Unauthenticated);
        assert_eq!(signal.last_end(), Some(SessionEnd::Expired));
        assert_eq!(*routes.lock().unwrap(), vec![Route::Dashboard, Route::Login]);
    }

    #[test]
    fn test_end_during_loading_keeps_loading() {
        let (routes, navigator) = recording_navigator();
        let signal = SessionSignal::new(navigator, Route::Dashboard, Route::Login);

        signal.ended(SessionEnd::Expired);
        assert_eq!(signal.state(), AuthState::Loading);
        assert_eq!(*routes.lock().unwrap(), vec![Route::Login]);
    }

    #[tokio::test]
    async fn test_subscribers_see_transitions() {
        let (_, navigator) = recording_navigator();
        let signal = SessionSignal::new(navigator, Route::Dashboard, Route::Login);
        let mut rx = signal.subscribe();

        signal.resolve(Some(alice()));
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_authenticated());

        signal.ended(SessionEnd::SignedOut);
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), AuthState::Unauthenticated);
    }
}

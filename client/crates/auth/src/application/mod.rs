//! Application Layer
//!
//! Use cases, the request dispatcher and the session controller.

pub mod config;
pub mod controller;
pub mod dispatcher;
pub mod restore_session;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;
pub mod state;

// Re-exports
pub use config::AuthConfig;
pub use controller::SessionController;
pub use dispatcher::RequestDispatcher;
pub use restore_session::RestoreSessionUseCase;
pub use sign_in::{SignInInput, SignInUseCase};
pub use sign_out::SignOutUseCase;
pub use sign_up::SignUpUseCase;
pub use state::{AuthState, Navigator, Route, SessionEnd, SessionSignal};

//! Auth (Session) Client Module
//!
//! Clean Architecture structure:
//! - `domain/` - Session entity, value objects, credential store trait
//! - `application/` - Use cases, request dispatcher, session controller
//! - `infra/` - Local storage implementation, endpoint wire format
//!
//! ## Features
//! - Login with username + password (JWT access/refresh pair)
//! - Registration with local validation, then automatic login
//! - Bearer token on every authenticated request
//! - One-shot refresh-and-retry on 401, coalesced across concurrent requests
//! - Observable `Loading` / `Authenticated` / `Unauthenticated` state
//!
//! ## Security Model
//! - Tokens and passwords have redacted `Debug` output and are never logged
//! - Passwords are zeroized on drop
//! - Public endpoints (login, registration, refresh) never carry a token

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;


// Re-exports for convenience
pub use application::{
    AuthConfig, AuthState, Navigator, RequestDispatcher, Route, SessionController, SessionEnd,
    SignInInput,
};
pub use domain::entity::{RegistrationForm, Session};
pub use domain::repository::CredentialStore;
pub use domain::value_object::{AccessToken, Identity, RefreshToken};
pub use error::{AuthError, AuthResult, FieldErrors};
pub use infra::LocalCredentialStore;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

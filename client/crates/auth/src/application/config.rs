//! Application Configuration
//!
//! Configuration for the Auth application layer.

use crate::application::state::Route;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Login endpoint, relative to the API base URL
    pub token_path: String,
    /// Token refresh endpoint
    pub refresh_path: String,
    /// Registration endpoint
    pub register_path: String,
    /// Where to go after a successful login
    pub home_route: Route,
    /// Where to go when the session ends (logout or expiry)
    pub entry_route: Route,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_path: "token/".to_string(),
            refresh_path: "token/refresh/".to_string(),
            register_path: "register/".to_string(),
            home_route: Route::Dashboard,
            entry_route: Route::Login,
        }
    }
}

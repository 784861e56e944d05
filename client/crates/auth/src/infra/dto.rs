//! API DTOs (Data Transfer Objects)
//!
//! Wire shapes of the token and registration endpoints.

use serde::{Deserialize, Serialize};

// ============================================================================
// Token (login)
// ============================================================================

/// Login request
#[derive(Serialize)]
pub struct TokenRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Login response
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access: String,
    pub refresh: String,
}

// ============================================================================
// Token refresh
// ============================================================================

/// Refresh request
#[derive(Serialize)]
pub struct RefreshRequest<'a> {
    pub refresh: &'a str,
}

/// Refresh response
///
/// Servers that rotate refresh tokens also return a new `refresh`; it is
/// ignored and the stored refresh token is kept.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshResponse {
    pub access: String,
}

// ============================================================================
// Registration
// ============================================================================

/// Registration request
#[derive(Serialize)]
pub struct RegisterRequest<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub password2: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_register_request_shape() {
        let body = serde_json::to_value(RegisterRequest {
            username: "alice",
            email: "alice@example.com",
            password: "hunter22",
            password2: "hunter22",
        })
        .unwrap();

        assert_eq!(
            body,
            json!({
                "username": "alice",
                "email": "alice@example.com",
                "password": "hunter22",
                "password2": "hunter22",
            })
        );
    }

    #[test]
    fn test_refresh_response_ignores_rotation() {
        let response: RefreshResponse =
            serde_json::from_str(r#"{"access":"tok2","refresh":"r2"}"#).unwrap();
        assert_eq!(response.access, "tok2");
    }
}

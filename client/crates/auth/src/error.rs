//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use std::collections::BTreeMap;
use std::fmt;

use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::{StorageError, TransportError};
use thiserror::Error;

use crate::domain::entity::PASSWORD_MISMATCH_MESSAGE;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Login rejected by the server
    #[error("Invalid credentials. Please try again.")]
    InvalidCredentials,

    /// Registration password and its confirmation differ
    #[error("{}", PASSWORD_MISMATCH_MESSAGE)]
    PasswordMismatch,

    /// A form field failed local validation
    #[error("{0}")]
    InvalidInput(String),

    /// Field-level errors reported by the server
    #[error("{0}")]
    Validation(FieldErrors),

    /// Token refresh failed; the session is gone
    #[error("Your session has expired")]
    SessionExpired,

    /// No response from the server
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Unexpected HTTP status from an auth endpoint
    #[error("Server responded with HTTP {status}")]
    Server { status: u16, body: String },

    /// Local session storage failed
    #[error("Session storage error: {0}")]
    Storage(#[from] StorageError),

    /// Response body could not be decoded
    #[error("Malformed response: {0}")]
    Json(#[from] serde_json::Error),

    /// Response decoded but carried unusable values
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidCredentials => ErrorKind::Unauthorized,
            AuthError::PasswordMismatch | AuthError::InvalidInput(_) => ErrorKind::Validation,
            AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::SessionExpired => ErrorKind::SessionExpired,
            AuthError::Transport(e) => e.kind(),
            AuthError::Server { status, .. } => ErrorKind::from_status(*status),
            AuthError::Storage(e) => e.kind(),
            AuthError::Json(_) | AuthError::MalformedResponse(_) => ErrorKind::Decode,
        }
    }

    /// Whether the server was never reached
    pub fn is_transport(&self) -> bool {
        self.kind().is_transport()
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        let err = AppError::new(self.kind(), self.to_string());
        match self {
            AuthError::SessionExpired => err.with_action("Please log in again"),
            AuthError::Transport(_) => err.with_action("Check your connection and try again"),
            AuthError::Storage(_) => err.with_action("Check WEATHER_STORAGE_PATH permissions"),
            _ => err,
        }
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            AuthError::Storage(e) => {
                tracing::error!(error = %e, "Session storage error");
            }
            AuthError::Transport(e) => {
                tracing::warn!(error = %e, "Auth request did not reach the server");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::SessionExpired => {
                tracing::warn!("Session expired");
            }
            AuthError::Server { status, .. } => {
                tracing::warn!(status = *status, "Unexpected auth response");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        err.to_app_error()
    }
}

// ============================================================================
// Field errors
// ============================================================================

/// Key used when the server reports an error not tied to a field
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

/// Field name to messages, as returned by the API on 400
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// Parse an error body
    ///
    /// Accepts `{"field": ["msg", ..]}`, `{"field": "msg"}`, a bare list of
    /// messages or a bare string. Anything else yields no errors.
    pub fn from_body(body: &[u8]) -> Self {
        let mut errors = Self::new();
        let Ok(value) = serde_json::from_slice::<serde_json::Value>(body) else {
            return errors;
        };

        match value {
            serde_json::Value::Object(map) => {
                for (field, messages) in map {
                    for message in flatten_messages(messages) {
                        errors.push(field.clone(), message);
                    }
                }
            }
            other => {
                for message in flatten_messages(other) {
                    errors.push(NON_FIELD_ERRORS, message);
                }
            }
        }
        errors
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Every message joined with a single space
    pub fn message(&self) -> String {
        self.fields
            .values()
            .flatten()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn flatten_messages(value: serde_json::Value) -> Vec<String> {
    match value {
        serde_json::Value::Array(items) => items.into_iter().flat_map(flatten_messages).collect(),
        serde_json::Value::String(s) => vec![s],
        serde_json::Value::Null => Vec::new(),
        serde_json::Value::Object(map) => map.into_values().flat_map(flatten_messages).collect(),
        other => vec![other.to_string()],
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("The request was rejected. Please try again.")
        } else {
            f.write_str(&self.message())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_errors_object() {
        let body = br#"{"username":["A user with that username already exists."],"password":"This password is too common."}"#;
        let errors = FieldErrors::from_body(body);

        assert_eq!(
            errors.get("username"),
            Some(&["A user with that username already exists.".to_string()][..])
        );
        assert_eq!(
            errors.message(),
            "This password is too common. A user with that username already exists."
        );
    }

    #[test]
    fn test_field_errors_bare_list() {
        let errors = FieldErrors::from_body(br#"["Something went wrong."]"#);
        assert_eq!(
            errors.get(NON_FIELD_ERRORS),
            Some(&["Something went wrong.".to_string()][..])
        );
    }

    #[test]
    fn test_field_errors_garbage() {
        let errors = FieldErrors::from_body(b"<html>Bad Request</html>");
        assert!(errors.is_empty());
        assert_eq!(
            errors.to_string(),
            "The request was rejected. Please try again."
        );
    }

    #[test]
    fn test_kinds() {
        assert_eq!(AuthError::InvalidCredentials.kind(), ErrorKind::Unauthorized);
        assert_eq!(AuthError::PasswordMismatch.kind(), ErrorKind::Validation);
        assert_eq!(AuthError::SessionExpired.kind(), ErrorKind::SessionExpired);
        assert_eq!(
            AuthError::Transport(TransportError::Timeout).kind(),
            ErrorKind::Timeout
        );
        assert_eq!(
            AuthError::Server {
                status: 502,
                body: String::new()
            }
            .kind(),
            ErrorKind::ServerError
        );
    }

    #[test]
    fn test_transport_distinct_from_rejection() {
        assert!(AuthError::Transport(TransportError::Connect("refused".into())).is_transport());
        assert!(!AuthError::InvalidCredentials.is_transport());
    }

    #[test]
    fn test_app_error_action() {
        let app = AuthError::SessionExpired.to_app_error();
        assert_eq!(app.kind(), ErrorKind::SessionExpired);
        assert_eq!(app.action(), Some("Please log in again"));
    }
}

//! Weather Error Types
//!
//! This module provides weather-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use auth::{AuthError, FieldErrors};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::ApiResponse;
use thiserror::Error;

/// Weather-specific result type alias
pub type WeatherResult<T> = Result<T, WeatherError>;

/// Weather-specific error variants
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Dispatch failed: no response, or the session ended during refresh
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Input rejected before sending
    #[error("{0}")]
    InvalidInput(String),

    /// Server rejected the request body (HTTP 400)
    #[error("{0}")]
    Rejected(FieldErrors),

    /// Any other non-2xx response
    #[error("{message}")]
    Status { status: u16, message: String },

    /// A single-record response could not be decoded
    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl WeatherError {
    /// Classify a non-2xx response
    ///
    /// The body's messages (`{"error": ".."}`, `{"detail": ".."}` or a field
    /// map) become the displayed text when present.
    pub fn from_response(response: &ApiResponse) -> Self {
        let status = response.status.as_u16();
        let errors = FieldErrors::from_body(&response.body);

        if status == 400 && !errors.is_empty() {
            return WeatherError::Rejected(errors);
        }

        let message = match errors.message() {
            m if m.is_empty() => format!("Server responded with HTTP {status}"),
            m => m,
        };
        WeatherError::Status { status, message }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            WeatherError::Auth(e) => e.kind(),
            WeatherError::InvalidInput(_) => ErrorKind::Validation,
            WeatherError::Rejected(_) => ErrorKind::BadRequest,
            WeatherError::Status { status, .. } => ErrorKind::from_status(*status),
            WeatherError::Decode(_) => ErrorKind::Decode,
        }
    }

    /// Whether the session ended while serving this request
    pub fn is_session_expired(&self) -> bool {
        matches!(self, WeatherError::Auth(AuthError::SessionExpired))
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        match self {
            WeatherError::Auth(e) => e.to_app_error(),
            WeatherError::Status { .. } if self.kind().is_server_error() => {
                AppError::new(self.kind(), self.to_string()).with_action("Try again later")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            WeatherError::Auth(e) => e.log(),
            WeatherError::Status { status, message } if *status >= 500 => {
                tracing::error!(status = *status, message = %message, "Weather API failure");
            }
            WeatherError::Status { status, message } => {
                tracing::warn!(status = *status, message = %message, "Weather request refused");
            }
            WeatherError::Decode(e) => {
                tracing::warn!(error = %e, "Weather response could not be decoded");
            }
            _ => {
                tracing::debug!(error = %self, "Weather error");
            }
        }
    }
}

impl From<WeatherError> for AppError {
    fn from(err: WeatherError) -> Self {
        err.to_app_error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;
    use serde_json::json;

    #[test]
    fn test_from_response_not_found() {
        let response =
            ApiResponse::json_body(StatusCode::NOT_FOUND, &json!({"error": "City not found."}));
        let err = WeatherError::from_response(&response);

        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "City not found.");
    }

    #[test]
    fn test_from_response_rejected_fields() {
        let response = ApiResponse::json_body(
            StatusCode::BAD_REQUEST,
            &json!({"name": ["city with this name already exists."]}),
        );
        let err = WeatherError::from_response(&response);

        assert!(matches!(err, WeatherError::Rejected(_)));
        assert_eq!(err.to_string(), "city with this name already exists.");
    }

    #[test]
    fn test_from_response_empty_body() {
        let response = ApiResponse::new(StatusCode::INTERNAL_SERVER_ERROR, Vec::new());
        let err = WeatherError::from_response(&response);

        assert_eq!(err.to_string(), "Server responded with HTTP 500");
        assert_eq!(err.kind(), ErrorKind::ServerError);
        assert_eq!(err.to_app_error().action(), Some("Try again later"));
    }

    #[test]
    fn test_session_expired_passes_through() {
        let err = WeatherError::from(AuthError::SessionExpired);
        assert!(err.is_session_expired());
        assert_eq!(err.kind(), ErrorKind::SessionExpired);
        assert_eq!(err.to_app_error().action(), Some("Please log in again"));
    }
}

//! Auth Endpoints
//!
//! Request builders and response interpretation for the token,
//! token-refresh and registration endpoints. All three are public:
//! they never carry a bearer token and never enter the refresh cycle.

use http::StatusCode;
use platform::{ApiRequest, ApiResponse};

use crate::application::config::AuthConfig;
use crate::domain::entity::ValidRegistration;
use crate::domain::value_object::{AccessToken, Password, RefreshToken, UserName};
use crate::error::{AuthError, AuthResult, FieldErrors};
use crate::infra::dto::{RefreshRequest, RefreshResponse, RegisterRequest, TokenRequest, TokenResponse};

// ============================================================================
// Login
// ============================================================================

pub fn login_request(
    config: &AuthConfig,
    username: &UserName,
    password: &Password,
) -> AuthResult<ApiRequest> {
    let body = TokenRequest {
        username: username.as_str(),
        password: password.expose(),
    };
    Ok(ApiRequest::post(config.token_path.as_str()).json(&body)?.public())
}

pub fn parse_login_response(response: &ApiResponse) -> AuthResult<(AccessToken, RefreshToken)> {
    match response.status {
        status if status.is_success() => {
            let tokens: TokenResponse = response.json()?;
            let access = AccessToken::new(tokens.access)
                .map_err(|_| AuthError::MalformedResponse("empty access token".into()))?;
            let refresh = RefreshToken::new(tokens.refresh)
                .map_err(|_| AuthError::MalformedResponse("empty refresh token".into()))?;
            Ok((access, refresh))
        }
        StatusCode::UNAUTHORIZED => Err(AuthError::InvalidCredentials),
        StatusCode::BAD_REQUEST => Err(AuthError::Validation(FieldErrors::from_body(&response.body))),
        status => Err(unexpected(status, response)),
    }
}

// ============================================================================
// Refresh
// ============================================================================

pub fn refresh_request(config: &AuthConfig, refresh_token: &RefreshToken) -> AuthResult<ApiRequest> {
    let body = RefreshRequest {
        refresh: refresh_token.as_str(),
    };
    Ok(ApiRequest::post(config.refresh_path.as_str()).json(&body)?.public())
}

/// New access token, or the reason the refresh was refused
pub fn parse_refresh_response(response: &ApiResponse) -> AuthResult<AccessToken> {
    if !response.is_success() {
        return Err(unexpected(response.status, response));
    }
    let refreshed: RefreshResponse = response.json()?;
    AccessToken::new(refreshed.access)
        .map_err(|_| AuthError::MalformedResponse("empty access token".into()))
}

// ============================================================================
// Registration
// ============================================================================

pub fn register_request(config: &AuthConfig, form: &ValidRegistration) -> AuthResult<ApiRequest> {
    let password = form.password.expose();
    let body = RegisterRequest {
        username: form.username.as_str(),
        email: form.email.as_str(),
        password,
        password2: password,
    };
    Ok(ApiRequest::post(config.register_path.as_str()).json(&body)?.public())
}

pub fn parse_register_response(response: &ApiResponse) -> AuthResult<()> {
    match response.status {
        status if status.is_success() => Ok(()),
        StatusCode::BAD_REQUEST => Err(AuthError::Validation(FieldErrors::from_body(&response.body))),
        status => Err(unexpected(status, response)),
    }
}

fn unexpected(status: StatusCode, response: &ApiResponse) -> AuthError {
    AuthError::Server {
        status: status.as_u16(),
        body: response.text(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::CredentialMode;
    use serde_json::json;

    #[test]
    fn test_login_request_is_public() {
        let config = AuthConfig::default();
        let request = login_request(
            &config,
            &UserName::new("alice").unwrap(),
            &Password::new("hunter22").unwrap(),
        )
        .unwrap();

        assert_eq!(request.path, "token/");
        assert_eq!(request.credentials, CredentialMode::Omit);
        assert_eq!(
            request.body,
            Some(json!({"username": "alice", "password": "hunter22"}))
        );
    }

    #[test]
    fn test_parse_login_success() {
        let response =
            ApiResponse::json_body(StatusCode::OK, &json!({"access": "a1", "refresh": "r1"}));
        let (access, refresh) = parse_login_response(&response).unwrap();
        assert_eq!(access.as_str(), "a1");
        assert_eq!(refresh.as_str(), "r1");
    }

    #[test]
    fn test_parse_login_rejected() {
        let response = ApiResponse::json_body(
            StatusCode::UNAUTHORIZED,
            &json!({"detail": "No active account found with the given credentials"}),
        );
        assert!(matches!(
            parse_login_response(&response),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_parse_login_missing_field() {
        let response = ApiResponse::json_body(StatusCode::OK, &json!({"access": "a1"}));
        assert!(matches!(parse_login_response(&response), Err(AuthError::Json(_))));
    }

    #[test]
    fn test_parse_refresh() {
        let ok = ApiResponse::json_body(StatusCode::OK, &json!({"access": "tok2"}));
        assert_eq!(parse_refresh_response(&ok).unwrap().as_str(), "tok2");

        let rejected = ApiResponse::json_body(
            StatusCode::UNAUTHORIZED,
            &json!({"detail": "Token is invalid or expired"}),
        );
        assert!(matches!(
            parse_refresh_response(&rejected),
            Err(AuthError::Server { status: 401, .. })
        ));
    }

    #[test]
    fn test_parse_register_validation() {
        let response = ApiResponse::json_body(
            StatusCode::BAD_REQUEST,
            &json!({"username": ["A user with that username already exists."]}),
        );
        match parse_register_response(&response) {
            Err(AuthError::Validation(errors)) => {
                assert_eq!(errors.message(), "A user with that username already exists.");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}

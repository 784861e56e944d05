//! Registration Form
//!
//! Raw sign-up input and its local validation. Validation runs before any
//! request so a form the server would reject for an obvious reason (most
//! importantly a mismatched confirmation) never leaves the client.

use crate::domain::value_object::{Email, Password, UserName};
use crate::error::AuthError;

pub const PASSWORD_MISMATCH_MESSAGE: &str = "Passwords don't match.";

/// Unvalidated form fields as typed by the user
#[derive(Clone, Default)]
pub struct RegistrationForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

/// Form that passed local validation
#[derive(Debug)]
pub struct ValidRegistration {
    pub username: UserName,
    pub email: Email,
    pub password: Password,
}

impl RegistrationForm {
    /// Validate the form locally
    ///
    /// The confirmation check runs first so its message wins over any
    /// other field error.
    pub fn validate(self) -> Result<ValidRegistration, AuthError> {
        let password = Password::new(self.password.as_str())
            .map_err(|e| AuthError::InvalidInput(e.to_string()));
        let confirmation = Password::new(self.password_confirmation.as_str());

        let password = match (password, confirmation) {
            (Ok(p), Ok(c)) if p.matches(&c) => p,
            (Ok(_), _) | (Err(_), Ok(_)) => return Err(AuthError::PasswordMismatch),
            (Err(e), Err(_)) => return Err(e),
        };

        let username =
            UserName::new(&self.username).map_err(|e| AuthError::InvalidInput(e.to_string()))?;
        let email = Email::new(&self.email).map_err(|e| AuthError::InvalidInput(e.to_string()))?;

        Ok(ValidRegistration {
            username,
            email,
            password,
        })
    }
}

impl std::fmt::Debug for RegistrationForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationForm")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("password_confirmation", &"[REDACTED]")
            .finish()
    }
}

impl Drop for RegistrationForm {
    fn drop(&mut self) {
        use zeroize::Zeroize;
        self.password.zeroize();
        self.password_confirmation.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(password: &str, confirmation: &str) -> RegistrationForm {
        RegistrationForm {
            username: "alice".into(),
            email: "alice@example.com".into(),
            password: password.into(),
            password_confirmation: confirmation.into(),
        }
    }

    #[test]
    fn test_valid_form() {
        let valid = form("hunter22", "hunter22").validate().unwrap();
        assert_eq!(valid.username.as_str(), "alice");
        assert_eq!(valid.email.as_str(), "alice@example.com");
    }

    #[test]
    fn test_mismatch() {
        let err = form("hunter22", "hunter23").validate().unwrap_err();
        assert!(matches!(err, AuthError::PasswordMismatch));
        assert_eq!(err.to_string(), PASSWORD_MISMATCH_MESSAGE);
    }

    #[test]
    fn test_empty_confirmation_is_mismatch() {
        let err = form("hunter22", "").validate().unwrap_err();
        assert!(matches!(err, AuthError::PasswordMismatch));
    }

    #[test]
    fn test_both_empty_is_invalid_input() {
        let err = form("", "").validate().unwrap_err();
        assert!(matches!(err, AuthError::InvalidInput(_)));
    }

    #[test]
    fn test_bad_username_and_email() {
        let mut bad_user = form("hunter22", "hunter22");
        bad_user.username = "alice bob".into();
        assert!(matches!(bad_user.validate(), Err(AuthError::InvalidInput(_))));

        let mut bad_email = form("hunter22", "hunter22");
        bad_email.email = "alice".into();
        assert!(matches!(bad_email.validate(), Err(AuthError::InvalidInput(_))));
    }
}

//! Entity Module

pub mod registration;
pub mod session;

pub use registration::{PASSWORD_MISMATCH_MESSAGE, RegistrationForm, ValidRegistration};
pub use session::Session;

//! Value Object Module

pub mod email;
pub mod identity;
pub mod password;
pub mod token;
pub mod user_name;

pub use email::{Email, EmailError};
pub use identity::Identity;
pub use password::{EmptyPasswordError, Password};
pub use token::{AccessToken, EmptyTokenError, RefreshToken};
pub use user_name::{UserName, UserNameError};

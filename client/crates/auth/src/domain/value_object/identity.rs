//! Identity Value Object
//!
//! The cached descriptor of the signed-in user, shown in the UI.
//! Not authoritative: the server never re-validates it after login.

use serde::{Deserialize, Serialize};

use super::user_name::UserName;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub username: UserName,
}

impl Identity {
    pub fn new(username: UserName) -> Self {
        Self { username }
    }

    /// Serialized form kept under the identity storage key
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.username.as_str())
    }
}

//! Infrastructure Layer
//!
//! Session persistence and the wire side of the auth endpoints.

pub mod dto;
pub mod endpoints;
pub mod local_storage;

pub use local_storage::LocalCredentialStore;

//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - HTTP transport port and its reqwest adapter
//! - Synchronous key/value storage (memory and JSON file)
//! - Cancellable periodic polling
//! - Environment-driven client configuration

pub mod config;
pub mod polling;
pub mod storage;
pub mod transport;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use config::{ClientConfig, ConfigError};
pub use polling::{PollHandle, Poller};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use transport::{
    ApiRequest, ApiResponse, CredentialMode, HttpTransport, LocalHttpTransport, ReqwestTransport,
    TransportError,
};

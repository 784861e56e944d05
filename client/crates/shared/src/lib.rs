//! Shared Kernel - Cross-crate minimal core
//!
//! This crate contains the "smallest core" shared by every client crate:
//! - The user-displayable error type and result alias
//! - Error classification (HTTP status classes and local failures)
//! - Typed IDs for correlating requests and background tasks in logs
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all crates.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;

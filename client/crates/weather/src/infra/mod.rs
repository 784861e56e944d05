//! Infrastructure Layer
//!
//! Wire side of the weather endpoints.

pub mod endpoints;
pub mod normalize;

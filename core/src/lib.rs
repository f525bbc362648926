//! # Stockband Core
//!
//! Domain layer for the Stockband backend: user and refresh token entities,
//! the error taxonomy, repository interfaces and the authentication services
//! (access token issuance, refresh token rotation with replay detection and
//! authorization checks).

pub mod domain;
pub mod services;
pub mod repositories;
pub mod errors;

// Re-export commonly used types for convenience
pub use domain::*;
pub use services::*;
pub use repositories::*;
pub use errors::*;

//! Shared configuration and common types for the Stockband server
//!
//! This crate provides functionality used across all server modules:
//! - Configuration types and layered loading
//! - The `BaseResponse` result envelope and error codes

pub mod config;
pub mod errors;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CookieConfig, DatabaseConfig, Environment, JwtConfig, LogFormat, LoggingConfig,
    ServerConfig,
};
pub use errors::{error_codes, ErrorDetail};
pub use types::BaseResponse;

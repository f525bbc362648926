//! Token service module
//!
//! This module handles all token-related operations including:
//! - JWT access token issuance and verification
//! - Refresh token issuance, rotation and revocation
//! - Replay detection over rotation chains

mod config;
mod issuer;
mod service;

#[cfg(test)]
mod tests;

pub use config::{ConfigurationProvider, TokenServiceConfig};
pub use issuer::AccessTokenIssuer;
pub use service::{generate_refresh_token, hash_token, RefreshTokenService, MAX_CASCADE_ATTEMPTS};

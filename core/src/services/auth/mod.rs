//! Authentication service module
//!
//! Email/password login on top of the token services, plus the refresh and
//! revoke entry points used by the API.

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use service::AuthService;

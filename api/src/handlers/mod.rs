//! Response helpers shared by the route handlers

pub mod cookies;
pub mod error;

pub use error::{handle_domain_error, handle_validation_errors};

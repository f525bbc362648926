//! HTTP surface for Stockband authentication
//!
//! Exposed for the integration tests under `tests/` and for `main`.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

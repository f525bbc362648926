//! Authorization module

mod guard;

pub use guard::AuthorizationGuard;

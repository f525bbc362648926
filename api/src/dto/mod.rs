//! Request and response bodies

pub mod auth;

pub use auth::{
    LoginRequest, RefreshTokenRequest, RegisterRequest, RevokeTokenRequest, UpdateUserRequest,
    UserResponse,
};

//! Authentication response value object for API responses.

use serde::{Deserialize, Serialize};

use crate::domain::entities::token::TokenPair;
use crate::domain::entities::user::User;

/// Authentication response containing tokens and user metadata
///
/// Returned by login. The refresh token is only ever shown to the client here
/// and in refresh responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthResponse {
    /// JWT access token for API authentication
    pub access_token: String,

    /// Opaque refresh token for obtaining new token pairs
    pub refresh_token: String,

    /// Access token expiration time in seconds
    pub expires_in: i64,

    /// Refresh token expiration time in seconds
    pub refresh_expires_in: i64,

    /// Authenticated user id
    pub user_id: i32,

    /// Authenticated user name
    pub username: String,

    /// Role claim value ("User" or "Admin")
    pub role: String,
}

impl AuthResponse {
    /// Creates an authentication response from a token pair and the user it was issued to
    pub fn from_token_pair(token_pair: TokenPair, user: &User) -> Self {
        Self {
            access_token: token_pair.access_token,
            refresh_token: token_pair.refresh_token,
            expires_in: token_pair.access_expires_in,
            refresh_expires_in: token_pair.refresh_expires_in,
            user_id: user.id,
            username: user.username.clone(),
            role: user.role.as_str().to_string(),
        }
    }
}

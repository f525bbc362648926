//! Authenticated principal attached to a request.

use serde::{Deserialize, Serialize};

use crate::domain::entities::token::Claims;
use crate::domain::entities::user::UserRole;

/// The validated principal of the current request
///
/// Built from verified access token claims by the API middleware and passed
/// explicitly into authorization checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    /// Raw subject claim; `None` when absent or empty
    pub subject: Option<String>,

    pub username: Option<String>,

    pub email: Option<String>,

    /// Role claims carried by the principal
    pub roles: Vec<String>,
}

impl AuthContext {
    /// Creates a context with the given subject and roles
    pub fn new(subject: Option<String>, roles: Vec<String>) -> Self {
        Self {
            subject,
            username: None,
            email: None,
            roles,
        }
    }

    /// Builds a context from verified access token claims
    pub fn from_claims(claims: &Claims) -> Self {
        let non_empty = |value: &str| {
            if value.is_empty() {
                None
            } else {
                Some(value.to_string())
            }
        };

        Self {
            subject: non_empty(&claims.sub),
            username: non_empty(&claims.name),
            email: non_empty(&claims.email),
            roles: non_empty(&claims.role).into_iter().collect(),
        }
    }

    /// Checks whether the principal carries the given role claim
    pub fn is_in_role(&self, role: UserRole) -> bool {
        self.roles.iter().any(|r| r == role.as_str())
    }
}

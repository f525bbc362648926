//! Authorization checks over the authenticated principal

use crate::domain::entities::user::UserRole;
use crate::domain::value_objects::AuthContext;
use crate::errors::{AuthError, DomainError};

const SUBJECT_CLAIM: &str = "sub";

/// Predicates used to gate mutating operations
///
/// Stateless; every check reads only the `AuthContext` it is given.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthorizationGuard;

impl AuthorizationGuard {
    /// Extracts the numeric user id from the subject claim
    ///
    /// # Errors
    ///
    /// * `AuthError::ClaimMissing` - No subject claim
    /// * `AuthError::ClaimMalformed` - Subject is not an integer
    pub fn current_user_id(ctx: &AuthContext) -> Result<i32, DomainError> {
        let subject = ctx.subject.as_deref().ok_or_else(|| AuthError::ClaimMissing {
            claim: SUBJECT_CLAIM.to_string(),
        })?;

        subject.parse::<i32>().map_err(|_| {
            DomainError::Auth(AuthError::ClaimMalformed {
                claim: SUBJECT_CLAIM.to_string(),
            })
        })
    }

    /// True if the principal is the target user or an administrator
    ///
    /// Administrators pass without a subject claim; anyone else needs a
    /// well-formed one.
    pub fn is_authorized(ctx: &AuthContext, target_user_id: i32) -> Result<bool, DomainError> {
        if ctx.is_in_role(UserRole::Admin) {
            return Ok(true);
        }

        Ok(Self::current_user_id(ctx)? == target_user_id)
    }

    /// Fails unless the principal carries `role`
    pub fn require_role(ctx: &AuthContext, role: UserRole) -> Result<(), DomainError> {
        if ctx.is_in_role(role) {
            Ok(())
        } else {
            Err(DomainError::Auth(AuthError::UserUnauthorizedOperation))
        }
    }

    /// Fails with `UserUnauthorizedOperation` when `is_authorized` is false
    pub fn ensure_authorized(ctx: &AuthContext, target_user_id: i32) -> Result<(), DomainError> {
        if Self::is_authorized(ctx, target_user_id)? {
            Ok(())
        } else {
            Err(DomainError::Auth(AuthError::UserUnauthorizedOperation))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(subject: Option<&str>, roles: &[&str]) -> AuthContext {
        AuthContext::new(
            subject.map(str::to_string),
            roles.iter().map(|r| r.to_string()).collect(),
        )
    }

    #[test]
    fn test_current_user_id() {
        assert_eq!(AuthorizationGuard::current_user_id(&ctx(Some("5"), &[])), Ok(5));
    }

    #[test]
    fn test_missing_subject() {
        assert!(matches!(
            AuthorizationGuard::current_user_id(&ctx(None, &["User"])),
            Err(DomainError::Auth(AuthError::ClaimMissing { .. }))
        ));
    }

    #[test]
    fn test_malformed_subject() {
        assert!(matches!(
            AuthorizationGuard::current_user_id(&ctx(Some("abc"), &[])),
            Err(DomainError::Auth(AuthError::ClaimMalformed { .. }))
        ));
    }

    #[test]
    fn test_authorization_matrix() {
        // Owner, any role
        assert_eq!(AuthorizationGuard::is_authorized(&ctx(Some("5"), &["User"]), 5), Ok(true));
        assert_eq!(AuthorizationGuard::is_authorized(&ctx(Some("5"), &[]), 5), Ok(true));
        // Admin, any subject
        assert_eq!(AuthorizationGuard::is_authorized(&ctx(Some("9"), &["Admin"]), 5), Ok(true));
        assert_eq!(AuthorizationGuard::is_authorized(&ctx(None, &["Admin"]), 5), Ok(true));
        // Neither
        assert_eq!(AuthorizationGuard::is_authorized(&ctx(Some("9"), &["User"]), 5), Ok(false));
    }

    #[test]
    fn test_non_admin_without_subject_fails() {
        assert!(matches!(
            AuthorizationGuard::is_authorized(&ctx(None, &["User"]), 5),
            Err(DomainError::Auth(AuthError::ClaimMissing { .. }))
        ));
    }

    #[test]
    fn test_require_role() {
        let admin = ctx(Some("1"), &["Admin"]);
        let user = ctx(Some("2"), &["User"]);

        assert_eq!(AuthorizationGuard::require_role(&admin, UserRole::Admin), Ok(()));
        assert_eq!(
            AuthorizationGuard::require_role(&user, UserRole::Admin),
            Err(DomainError::Auth(AuthError::UserUnauthorizedOperation))
        );
    }

    #[test]
    fn test_ensure_authorized() {
        assert_eq!(AuthorizationGuard::ensure_authorized(&ctx(Some("5"), &[]), 5), Ok(()));
        assert_eq!(
            AuthorizationGuard::ensure_authorized(&ctx(Some("6"), &["User"]), 5),
            Err(DomainError::Auth(AuthError::UserUnauthorizedOperation))
        );
    }
}

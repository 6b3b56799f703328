/// Role checks
///
/// Todoboard has two roles. Every authenticated user may read and write
/// todos, comments and manager assignments (ownership rules are enforced by
/// the services); routes under `/v1/admin` additionally require
/// [`UserRole::Admin`].
///
/// # Example
///
/// ```
/// use todoboard_shared::auth::authorization::require_admin;
/// use todoboard_shared::auth::middleware::AuthUser;
/// use todoboard_shared::models::user::UserRole;
///
/// let admin = AuthUser::new(1, "admin@a.com", UserRole::Admin);
/// assert!(require_admin(&admin).is_ok());
///
/// let user = AuthUser::new(2, "user@a.com", UserRole::User);
/// assert!(require_admin(&user).is_err());
/// ```

use super::middleware::AuthUser;
use crate::models::user::UserRole;

/// Error type for authorization checks
#[derive(Debug, thiserror::Error)]
pub enum AuthzError {
    /// User doesn't have required role
    #[error("Insufficient permissions: requires {required}, has {actual}")]
    InsufficientRole { required: UserRole, actual: UserRole },
}

/// Fails unless the caller holds exactly `required`
pub fn require_role(auth: &AuthUser, required: UserRole) -> Result<(), AuthzError> {
    if auth.role == required {
        Ok(())
    } else {
        Err(AuthzError::InsufficientRole {
            required,
            actual: auth.role,
        })
    }
}

/// Fails unless the caller is an admin
pub fn require_admin(auth: &AuthUser) -> Result<(), AuthzError> {
    require_role(auth, UserRole::Admin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_admin() {
        let admin = AuthUser::new(1, "admin@a.com", UserRole::Admin);
        let user = AuthUser::new(2, "user@a.com", UserRole::User);

        assert!(require_admin(&admin).is_ok());

        let err = require_admin(&user).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Insufficient permissions: requires ADMIN, has USER"
        );
    }

    #[test]
    fn test_require_role_user() {
        let user = AuthUser::new(2, "user@a.com", UserRole::User);
        assert!(require_role(&user, UserRole::User).is_ok());
    }
}

//! Profile lookup, password change and admin role change

use todoboard_shared::{
    auth::password::PasswordEncoder,
    models::user::{User, UserRole, UserSummary},
    store::UserStore,
};
use tracing::info;

use crate::{
    error::{ApiError, ApiResult},
    services::auth::WRONG_PASSWORD,
};

pub const USER_NOT_FOUND: &str = "User not found";
pub const SAME_PASSWORD: &str = "New password must differ from the current password";

pub(crate) async fn require_user<S>(store: &S, user_id: i64) -> ApiResult<User>
where
    S: UserStore + ?Sized,
{
    store
        .find_user(user_id)
        .await?
        .ok_or_else(|| ApiError::not_found(USER_NOT_FOUND))
}

pub async fn get_user<S>(store: &S, user_id: i64) -> ApiResult<UserSummary>
where
    S: UserStore + ?Sized,
{
    let user = require_user(store, user_id).await?;
    Ok(UserSummary::from(&user))
}

/// Replaces the caller's password
///
/// The new password is compared against the stored hash before the old
/// password is checked, so reusing the current password is reported even
/// when `old_password` is wrong.
pub async fn change_password<S>(
    store: &S,
    passwords: &PasswordEncoder,
    user_id: i64,
    old_password: &str,
    new_password: &str,
) -> ApiResult<()>
where
    S: UserStore + ?Sized,
{
    let user = require_user(store, user_id).await?;

    if passwords.matches(new_password, &user.password_hash)? {
        return Err(ApiError::bad_request(SAME_PASSWORD));
    }

    if !passwords.matches(old_password, &user.password_hash)? {
        return Err(ApiError::bad_request(WRONG_PASSWORD));
    }

    let hash = passwords.encode(new_password)?;
    store.update_password(user.id, hash).await?;

    info!(user_id = user.id, "Password changed");
    Ok(())
}

/// Sets a user's role (admin only; the route layer enforces that)
pub async fn change_user_role<S>(store: &S, user_id: i64, role: &str) -> ApiResult<()>
where
    S: UserStore + ?Sized,
{
    let user = require_user(store, user_id).await?;
    let role: UserRole = role.parse()?;

    store.update_role(user.id, role).await?;

    info!(user_id = user.id, from = %user.role, to = %role, "User role changed");
    Ok(())
}

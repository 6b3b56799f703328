//! Signup and signin

use todoboard_shared::{
    auth::{
        jwt::{create_bearer_token, Claims},
        password::PasswordEncoder,
    },
    models::user::{CreateUser, User, UserRole},
    store::{StoreError, UserStore},
};
use tracing::{debug, info};

use crate::{
    config::JwtConfig,
    error::{ApiError, ApiResult},
};

pub const EMAIL_TAKEN: &str = "Email already registered";
pub const USER_NOT_REGISTERED: &str = "User not registered";
pub const WRONG_PASSWORD: &str = "Wrong password";

/// Issues a `Bearer <jwt>` token for `user`
pub fn issue_token(user: &User, jwt: &JwtConfig) -> ApiResult<String> {
    let claims = Claims::new(user.id, user.email.clone(), user.role, jwt.expiration());
    Ok(create_bearer_token(&claims, &jwt.secret)?)
}

/// Registers a user and returns their bearer token
pub async fn signup<S>(
    store: &S,
    passwords: &PasswordEncoder,
    jwt: &JwtConfig,
    email: &str,
    password: &str,
    user_role: &str,
) -> ApiResult<String>
where
    S: UserStore + ?Sized,
{
    let role: UserRole = user_role.parse()?;

    if store.email_exists(email).await? {
        debug!(email = %email, "Signup rejected, email taken");
        return Err(ApiError::bad_request(EMAIL_TAKEN));
    }

    let password_hash = passwords.encode(password)?;

    // A concurrent signup can still win between the check and the insert
    let user = store
        .create_user(CreateUser {
            email: email.to_string(),
            password_hash,
            role,
        })
        .await
        .map_err(|e| match e {
            StoreError::Conflict(_) => ApiError::bad_request(EMAIL_TAKEN),
            other => other.into(),
        })?;

    info!(user_id = user.id, role = %user.role, "User signed up");
    issue_token(&user, jwt)
}

/// Checks credentials and returns a fresh bearer token
pub async fn signin<S>(
    store: &S,
    passwords: &PasswordEncoder,
    jwt: &JwtConfig,
    email: &str,
    password: &str,
) -> ApiResult<String>
where
    S: UserStore + ?Sized,
{
    let user = store
        .find_user_by_email(email)
        .await?
        .ok_or_else(|| ApiError::bad_request(USER_NOT_REGISTERED))?;

    if !passwords.matches(password, &user.password_hash)? {
        debug!(user_id = user.id, "Signin rejected, wrong password");
        return Err(ApiError::Unauthorized(WRONG_PASSWORD.to_string()));
    }

    info!(user_id = user.id, "User signed in");
    issue_token(&user, jwt)
}

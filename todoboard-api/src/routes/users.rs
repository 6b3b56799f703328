/// User endpoints
///
/// - `GET /v1/users/:userId` - Look up a user's id and email
/// - `PUT /v1/users` - Change the caller's password

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::{Json, Path},
    services,
};
use axum::{extract::State, Extension};
use serde::Deserialize;
use todoboard_shared::{
    auth::{middleware::AuthUser, password::validate_password_strength},
    models::user::UserSummary,
};
use validator::Validate;

/// Change password request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "Old password is required"))]
    pub old_password: String,

    /// Must be at least 8 chars and contain a digit and an uppercase letter
    pub new_password: String,
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<UserSummary>> {
    let user = services::user::get_user(&*state.store, user_id).await?;
    Ok(Json(user))
}

/// # Errors
///
/// - `400 Bad Request`: New password equals the current one, or old password is wrong
/// - `404 Not Found`: Caller no longer exists
/// - `422 Unprocessable Entity`: New password too weak
pub async fn change_password(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(req): Json<ChangePasswordRequest>,
) -> ApiResult<()> {
    req.validate()?;

    if let Err(msg) = validate_password_strength(&req.new_password) {
        return Err(ApiError::invalid_field("newPassword", msg));
    }

    services::user::change_password(
        &*state.store,
        &state.passwords,
        auth.id,
        &req.old_password,
        &req.new_password,
    )
    .await
}

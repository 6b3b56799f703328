/// Admin endpoints
///
/// All routes here sit behind the JWT layer, the ADMIN role check and the
/// audit log layer.
///
/// - `PATCH /v1/admin/users/:userId` - Change a user's role
/// - `DELETE /v1/admin/comments/:commentId` - Remove any comment

use crate::{
    app::AppState,
    error::ApiResult,
    extract::{Json, Path},
    services,
};
use axum::{extract::State, http::StatusCode};
use serde::Deserialize;
use validator::Validate;

/// Change role request
#[derive(Debug, Deserialize, Validate)]
pub struct ChangeRoleRequest {
    /// `USER` or `ADMIN`, case-insensitive
    #[validate(length(min = 1, message = "Role is required"))]
    pub role: String,
}

pub async fn change_user_role(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(req): Json<ChangeRoleRequest>,
) -> ApiResult<()> {
    req.validate()?;
    services::user::change_user_role(&*state.store, user_id, &req.role).await
}

pub async fn delete_comment(
    State(state): State<AppState>,
    Path(comment_id): Path<i64>,
) -> ApiResult<StatusCode> {
    services::comment::delete_comment(&*state.store, comment_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

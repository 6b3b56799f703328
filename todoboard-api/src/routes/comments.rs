/// Comment endpoints
///
/// - `POST /v1/todos/:todoId/comments`
/// - `GET /v1/todos/:todoId/comments` - Oldest first
///
/// Admin removal lives in [`crate::routes::admin`].

use crate::{
    app::AppState,
    error::ApiResult,
    extract::{Json, Path},
    services,
};
use axum::{extract::State, http::StatusCode, Extension};
use serde::Deserialize;
use todoboard_shared::{auth::middleware::AuthUser, models::comment::CommentResponse};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct SaveCommentRequest {
    #[validate(length(min = 1, message = "Contents are required"))]
    pub contents: String,
}

pub async fn save_comment(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(todo_id): Path<i64>,
    Json(req): Json<SaveCommentRequest>,
) -> ApiResult<(StatusCode, Json<CommentResponse>)> {
    req.validate()?;

    let comment =
        services::comment::save_comment(&*state.store, &auth, todo_id, req.contents).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

pub async fn get_comments(
    State(state): State<AppState>,
    Path(todo_id): Path<i64>,
) -> ApiResult<Json<Vec<CommentResponse>>> {
    let comments = services::comment::get_comments(&*state.store, todo_id).await?;
    Ok(Json(comments))
}

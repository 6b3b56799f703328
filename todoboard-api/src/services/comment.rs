//! Comments on todos

use todoboard_shared::{
    auth::middleware::AuthUser,
    models::comment::{CommentResponse, CreateComment},
    store::{CommentStore, TodoStore},
};
use tracing::info;

use crate::{
    error::{ApiError, ApiResult},
    services::todo::require_todo,
};

pub const COMMENT_NOT_FOUND: &str = "Comment not found";

pub async fn save_comment<S>(
    store: &S,
    auth: &AuthUser,
    todo_id: i64,
    contents: String,
) -> ApiResult<CommentResponse>
where
    S: TodoStore + CommentStore + ?Sized,
{
    let todo = require_todo(store, todo_id).await?;

    let comment = store
        .create_comment(CreateComment {
            contents,
            todo_id: todo.id,
            user_id: auth.id,
        })
        .await?;

    info!(comment_id = comment.id, todo_id = todo.id, user_id = auth.id, "Comment saved");
    Ok(comment.into())
}

/// Oldest first. An unknown todo has no comments.
pub async fn get_comments<S>(store: &S, todo_id: i64) -> ApiResult<Vec<CommentResponse>>
where
    S: CommentStore + ?Sized,
{
    let comments = store.list_comments(todo_id).await?;
    Ok(comments.into_iter().map(CommentResponse::from).collect())
}

/// Admin-only removal
pub async fn delete_comment<S>(store: &S, comment_id: i64) -> ApiResult<()>
where
    S: CommentStore + ?Sized,
{
    if !store.delete_comment(comment_id).await? {
        return Err(ApiError::not_found(COMMENT_NOT_FOUND));
    }

    info!(comment_id, "Comment deleted");
    Ok(())
}

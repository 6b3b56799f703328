/// Comment model
///
/// Comments form a flat thread under a todo. Any authenticated user may
/// comment; only admins may delete.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::UserSummary;

/// Comment with its author resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: i64,
    pub contents: String,
    pub todo_id: i64,

    /// Author
    pub user: UserSummary,

    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

/// Input for creating a comment
#[derive(Debug, Clone)]
pub struct CreateComment {
    pub contents: String,
    pub todo_id: i64,
    pub user_id: i64,
}

/// API projection of a comment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: i64,
    pub contents: String,
    pub user: UserSummary,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            contents: comment.contents,
            user: comment.user,
        }
    }
}

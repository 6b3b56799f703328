/// Todo model
///
/// A todo belongs to the user who created it and records the weather at
/// creation time. Todos are immutable once saved.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE todos (
///     id BIGSERIAL PRIMARY KEY,
///     title VARCHAR(255) NOT NULL,
///     contents TEXT NOT NULL,
///     weather VARCHAR(64) NOT NULL,
///     user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     modified_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::UserSummary;

/// Todo with its owner resolved
///
/// Serialized as-is in API responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub contents: String,

    /// Weather snapshot taken when the todo was saved
    pub weather: String,

    /// Owning user
    pub user: UserSummary,

    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl Todo {
    /// Whether `user_id` created this todo
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.user.id == user_id
    }
}

/// Input for creating a todo
#[derive(Debug, Clone)]
pub struct CreateTodo {
    pub title: String,
    pub contents: String,
    pub weather: String,
    pub user_id: i64,
}

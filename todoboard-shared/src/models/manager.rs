/// Manager (assignee) model
///
/// A manager is a user assigned as responsible party for a todo, distinct
/// from its creator. Only the todo's creator may add or remove managers, and
/// a user can manage a given todo at most once.

use serde::{Deserialize, Serialize};

use super::user::UserSummary;

/// Manager assignment with the assignee resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manager {
    pub id: i64,
    pub todo_id: i64,

    /// Assignee
    pub user: UserSummary,
}

/// Input for creating a manager assignment
#[derive(Debug, Clone)]
pub struct CreateManager {
    pub todo_id: i64,
    pub user_id: i64,
}

/// API projection of a manager assignment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerResponse {
    pub id: i64,
    pub user: UserSummary,
}

impl From<Manager> for ManagerResponse {
    fn from(manager: Manager) -> Self {
        Self {
            id: manager.id,
            user: manager.user,
        }
    }
}

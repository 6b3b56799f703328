//! Todo managers (assignees)
//!
//! Only a todo's creator may add or remove its managers, and the creator can
//! never be one.

use todoboard_shared::{
    auth::middleware::AuthUser,
    models::manager::{CreateManager, ManagerResponse},
    store::{ManagerStore, StoreError, TodoStore, UserStore},
};
use tracing::info;

use crate::{
    error::{ApiError, ApiResult},
    services::{todo::require_todo, user::require_user},
};

pub const NOT_TODO_OWNER: &str = "Only the todo creator can assign managers";
pub const MANAGER_USER_NOT_FOUND: &str = "Manager user not found";
pub const SELF_ASSIGNMENT: &str = "Todo creator cannot assign themselves as manager";
pub const ALREADY_MANAGER: &str = "User is already a manager of this todo";
pub const NOT_TODO_OWNER_REMOVE: &str = "Only the todo creator can remove managers";
pub const MANAGER_NOT_FOUND: &str = "Manager not found";
pub const MANAGER_NOT_ON_TODO: &str = "Manager is not assigned to this todo";

pub async fn save_manager<S>(
    store: &S,
    auth: &AuthUser,
    todo_id: i64,
    manager_user_id: i64,
) -> ApiResult<ManagerResponse>
where
    S: UserStore + TodoStore + ManagerStore + ?Sized,
{
    let todo = require_todo(store, todo_id).await?;

    if !todo.is_owned_by(auth.id) {
        return Err(ApiError::bad_request(NOT_TODO_OWNER));
    }

    let assignee = store
        .find_user(manager_user_id)
        .await?
        .ok_or_else(|| ApiError::not_found(MANAGER_USER_NOT_FOUND))?;

    if todo.is_owned_by(assignee.id) {
        return Err(ApiError::bad_request(SELF_ASSIGNMENT));
    }

    if store.manager_exists(todo.id, assignee.id).await? {
        return Err(ApiError::bad_request(ALREADY_MANAGER));
    }

    let manager = store
        .create_manager(CreateManager {
            todo_id: todo.id,
            user_id: assignee.id,
        })
        .await
        .map_err(|e| match e {
            StoreError::Conflict(_) => ApiError::bad_request(ALREADY_MANAGER),
            other => other.into(),
        })?;

    info!(manager_id = manager.id, todo_id = todo.id, user_id = assignee.id, "Manager assigned");
    Ok(manager.into())
}

pub async fn get_managers<S>(store: &S, todo_id: i64) -> ApiResult<Vec<ManagerResponse>>
where
    S: TodoStore + ManagerStore + ?Sized,
{
    let todo = require_todo(store, todo_id).await?;
    let managers = store.list_managers(todo.id).await?;
    Ok(managers.into_iter().map(ManagerResponse::from).collect())
}

pub async fn delete_manager<S>(
    store: &S,
    auth: &AuthUser,
    todo_id: i64,
    manager_id: i64,
) -> ApiResult<()>
where
    S: UserStore + TodoStore + ManagerStore + ?Sized,
{
    let user = require_user(store, auth.id).await?;
    let todo = require_todo(store, todo_id).await?;

    if !todo.is_owned_by(user.id) {
        return Err(ApiError::bad_request(NOT_TODO_OWNER_REMOVE));
    }

    let manager = store
        .find_manager(manager_id)
        .await?
        .ok_or_else(|| ApiError::not_found(MANAGER_NOT_FOUND))?;

    if manager.todo_id != todo.id {
        return Err(ApiError::bad_request(MANAGER_NOT_ON_TODO));
    }

    if !store.delete_manager(manager.id).await? {
        return Err(ApiError::not_found(MANAGER_NOT_FOUND));
    }

    info!(manager_id = manager.id, todo_id = todo.id, "Manager removed");
    Ok(())
}

//! Persistence traits for Todoboard.
//!
//! Each aggregate has its own repository trait; [`Store`] bundles them so
//! application state can hold a single `Arc<dyn Store>`. Services take the
//! narrowest trait they need (`&S where S: TodoStore + ?Sized`), so both a
//! concrete backend and `dyn Store` can be passed in.
//!
//! Backends:
//! - [`postgres::PgStore`]: durable, backed by `sqlx::PgPool`
//! - [`memory::MemoryStore`]: process-local, for development and tests

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    comment::{Comment, CreateComment},
    manager::{CreateManager, Manager},
    page::{Page, PageRequest},
    todo::{CreateTodo, Todo},
    user::{CreateUser, User, UserRole},
};

pub mod memory;
pub mod postgres;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with `Conflict` when the email is taken.
    async fn create_user(&self, data: CreateUser) -> StoreResult<User>;
    async fn find_user(&self, id: i64) -> StoreResult<Option<User>>;
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;
    async fn email_exists(&self, email: &str) -> StoreResult<bool>;
    /// Fails with `NotFound` when the user does not exist.
    async fn update_password(&self, id: i64, password_hash: String) -> StoreResult<()>;
    /// Fails with `NotFound` when the user does not exist.
    async fn update_role(&self, id: i64, role: UserRole) -> StoreResult<()>;
}

#[async_trait]
pub trait TodoStore: Send + Sync {
    async fn create_todo(&self, data: CreateTodo) -> StoreResult<Todo>;
    async fn find_todo(&self, id: i64) -> StoreResult<Option<Todo>>;
    /// Newest `modified_at` first, ties broken by descending id.
    async fn list_todos(&self, request: PageRequest) -> StoreResult<Page<Todo>>;
}

#[async_trait]
pub trait CommentStore: Send + Sync {
    async fn create_comment(&self, data: CreateComment) -> StoreResult<Comment>;
    /// Oldest first.
    async fn list_comments(&self, todo_id: i64) -> StoreResult<Vec<Comment>>;
    /// Returns false when nothing was deleted.
    async fn delete_comment(&self, id: i64) -> StoreResult<bool>;
}

#[async_trait]
pub trait ManagerStore: Send + Sync {
    /// Fails with `Conflict` when the user already manages the todo.
    async fn create_manager(&self, data: CreateManager) -> StoreResult<Manager>;
    async fn find_manager(&self, id: i64) -> StoreResult<Option<Manager>>;
    async fn list_managers(&self, todo_id: i64) -> StoreResult<Vec<Manager>>;
    async fn manager_exists(&self, todo_id: i64, user_id: i64) -> StoreResult<bool>;
    /// Returns false when nothing was deleted.
    async fn delete_manager(&self, id: i64) -> StoreResult<bool>;
}

#[async_trait]
pub trait Store: UserStore + TodoStore + CommentStore + ManagerStore {
    async fn health_check(&self) -> StoreResult<()>;
    fn backend_name(&self) -> &'static str;
}

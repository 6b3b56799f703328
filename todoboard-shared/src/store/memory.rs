//! In-memory implementation of the Todoboard store.
//!
//! All tables live in `BTreeMap`s behind one `tokio::sync::RwLock`, so every
//! operation sees a consistent snapshot and foreign-key style checks run
//! under the same lock as the write they guard.
//!
//! Not durable: state is lost on restart. Used for local development
//! (`STORE_BACKEND=memory`) and for service/HTTP tests.

use super::{
    CommentStore, ManagerStore, Store, StoreError, StoreResult, TodoStore, UserStore,
};
use crate::models::{
    comment::{Comment, CreateComment},
    manager::{CreateManager, Manager},
    page::{Page, PageRequest},
    todo::{CreateTodo, Todo},
    user::{CreateUser, User, UserRole, UserSummary},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct TodoRecord {
    id: i64,
    title: String,
    contents: String,
    weather: String,
    user_id: i64,
    created_at: DateTime<Utc>,
    modified_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct CommentRecord {
    id: i64,
    contents: String,
    todo_id: i64,
    user_id: i64,
    created_at: DateTime<Utc>,
    modified_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct ManagerRecord {
    id: i64,
    todo_id: i64,
    user_id: i64,
}

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    todos: BTreeMap<i64, TodoRecord>,
    comments: BTreeMap<i64, CommentRecord>,
    managers: BTreeMap<i64, ManagerRecord>,
    last_id: i64,
}

impl Tables {
    /// Ids are unique across tables, which makes mixed-up ids show up in tests.
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn summary(&self, user_id: i64) -> StoreResult<UserSummary> {
        self.users
            .get(&user_id)
            .map(UserSummary::from)
            .ok_or_else(|| StoreError::NotFound(format!("user {}", user_id)))
    }

    fn todo(&self, record: &TodoRecord) -> StoreResult<Todo> {
        Ok(Todo {
            id: record.id,
            title: record.title.clone(),
            contents: record.contents.clone(),
            weather: record.weather.clone(),
            user: self.summary(record.user_id)?,
            created_at: record.created_at,
            modified_at: record.modified_at,
        })
    }

    fn comment(&self, record: &CommentRecord) -> StoreResult<Comment> {
        Ok(Comment {
            id: record.id,
            contents: record.contents.clone(),
            todo_id: record.todo_id,
            user: self.summary(record.user_id)?,
            created_at: record.created_at,
            modified_at: record.modified_at,
        })
    }

    fn manager(&self, record: &ManagerRecord) -> StoreResult<Manager> {
        Ok(Manager {
            id: record.id,
            todo_id: record.todo_id,
            user: self.summary(record.user_id)?,
        })
    }

    fn require_todo(&self, todo_id: i64) -> StoreResult<()> {
        if self.todos.contains_key(&todo_id) {
            Ok(())
        } else {
            Err(StoreError::NotFound(format!("todo {}", todo_id)))
        }
    }
}

/// Process-local store
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, data: CreateUser) -> StoreResult<User> {
        let mut tables = self.tables.write().await;

        if tables.users.values().any(|u| u.email == data.email) {
            return Err(StoreError::Conflict(format!(
                "email {} already exists",
                data.email
            )));
        }

        let now = Utc::now();
        let user = User {
            id: tables.next_id(),
            email: data.email,
            password_hash: data.password_hash,
            role: data.role,
            created_at: now,
            modified_at: now,
        };
        tables.users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn find_user(&self, id: i64) -> StoreResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn email_exists(&self, email: &str) -> StoreResult<bool> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().any(|u| u.email == email))
    }

    async fn update_password(&self, id: i64, password_hash: String) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        let user = tables
            .users
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(format!("user {}", id)))?;

        user.password_hash = password_hash;
        user.modified_at = Utc::now();
        Ok(())
    }

    async fn update_role(&self, id: i64, role: UserRole) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        let user = tables
            .users
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(format!("user {}", id)))?;

        user.role = role;
        user.modified_at = Utc::now();
        Ok(())
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn create_todo(&self, data: CreateTodo) -> StoreResult<Todo> {
        let mut tables = self.tables.write().await;
        tables.summary(data.user_id)?;

        let now = Utc::now();
        let record = TodoRecord {
            id: tables.next_id(),
            title: data.title,
            contents: data.contents,
            weather: data.weather,
            user_id: data.user_id,
            created_at: now,
            modified_at: now,
        };
        let todo = tables.todo(&record)?;
        tables.todos.insert(record.id, record);

        Ok(todo)
    }

    async fn find_todo(&self, id: i64) -> StoreResult<Option<Todo>> {
        let tables = self.tables.read().await;
        tables.todos.get(&id).map(|r| tables.todo(r)).transpose()
    }

    async fn list_todos(&self, request: PageRequest) -> StoreResult<Page<Todo>> {
        let tables = self.tables.read().await;

        let mut records: Vec<&TodoRecord> = tables.todos.values().collect();
        records.sort_by(|a, b| {
            b.modified_at
                .cmp(&a.modified_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        let total = records.len() as u64;
        let content = records
            .into_iter()
            .skip(request.offset() as usize)
            .take(request.size as usize)
            .map(|r| tables.todo(r))
            .collect::<StoreResult<Vec<_>>>()?;

        Ok(Page::new(content, request, total))
    }
}

#[async_trait]
impl CommentStore for MemoryStore {
    async fn create_comment(&self, data: CreateComment) -> StoreResult<Comment> {
        let mut tables = self.tables.write().await;
        tables.require_todo(data.todo_id)?;
        tables.summary(data.user_id)?;

        let now = Utc::now();
        let record = CommentRecord {
            id: tables.next_id(),
            contents: data.contents,
            todo_id: data.todo_id,
            user_id: data.user_id,
            created_at: now,
            modified_at: now,
        };
        let comment = tables.comment(&record)?;
        tables.comments.insert(record.id, record);

        Ok(comment)
    }

    async fn list_comments(&self, todo_id: i64) -> StoreResult<Vec<Comment>> {
        let tables = self.tables.read().await;
        tables
            .comments
            .values()
            .filter(|c| c.todo_id == todo_id)
            .map(|c| tables.comment(c))
            .collect()
    }

    async fn delete_comment(&self, id: i64) -> StoreResult<bool> {
        Ok(self.tables.write().await.comments.remove(&id).is_some())
    }
}

#[async_trait]
impl ManagerStore for MemoryStore {
    async fn create_manager(&self, data: CreateManager) -> StoreResult<Manager> {
        let mut tables = self.tables.write().await;
        tables.require_todo(data.todo_id)?;
        tables.summary(data.user_id)?;

        if tables
            .managers
            .values()
            .any(|m| m.todo_id == data.todo_id && m.user_id == data.user_id)
        {
            return Err(StoreError::Conflict(format!(
                "user {} already manages todo {}",
                data.user_id, data.todo_id
            )));
        }

        let record = ManagerRecord {
            id: tables.next_id(),
            todo_id: data.todo_id,
            user_id: data.user_id,
        };
        let manager = tables.manager(&record)?;
        tables.managers.insert(record.id, record);

        Ok(manager)
    }

    async fn find_manager(&self, id: i64) -> StoreResult<Option<Manager>> {
        let tables = self.tables.read().await;
        tables.managers.get(&id).map(|r| tables.manager(r)).transpose()
    }

    async fn list_managers(&self, todo_id: i64) -> StoreResult<Vec<Manager>> {
        let tables = self.tables.read().await;
        tables
            .managers
            .values()
            .filter(|m| m.todo_id == todo_id)
            .map(|m| tables.manager(m))
            .collect()
    }

    async fn manager_exists(&self, todo_id: i64, user_id: i64) -> StoreResult<bool> {
        let tables = self.tables.read().await;
        Ok(tables
            .managers
            .values()
            .any(|m| m.todo_id == todo_id && m.user_id == user_id))
    }

    async fn delete_manager(&self, id: i64) -> StoreResult<bool> {
        Ok(self.tables.write().await.managers.remove(&id).is_some())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

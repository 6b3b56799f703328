//! PostgreSQL-backed implementation of the Todoboard store.
//!
//! Queries are runtime-checked (`sqlx::query_as::<_, Row>`), so building the
//! crate does not need a live database. Rows are read into private structs
//! and converted into domain models; owner/author/assignee summaries are
//! resolved with a join in the same statement.
//!
//! Unique violations (`23505`) become [`StoreError::Conflict`]; missing
//! foreign keys (`23503`) become [`StoreError::NotFound`]. Everything else is
//! `Unexpected`.

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
use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

/// Durable store backed by a PostgreSQL pool
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    email: String,
    password_hash: String,
    role: String,
    created_at: DateTime<Utc>,
    modified_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = StoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role = row
            .role
            .parse::<UserRole>()
            .map_err(|e| StoreError::Unexpected(anyhow!(e)))?;

        Ok(User {
            id: row.id,
            email: row.email,
            password_hash: row.password_hash,
            role,
            created_at: row.created_at,
            modified_at: row.modified_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct TodoRow {
    id: i64,
    title: String,
    contents: String,
    weather: String,
    user_id: i64,
    user_email: String,
    created_at: DateTime<Utc>,
    modified_at: DateTime<Utc>,
}

impl From<TodoRow> for Todo {
    fn from(row: TodoRow) -> Self {
        Todo {
            id: row.id,
            title: row.title,
            contents: row.contents,
            weather: row.weather,
            user: UserSummary {
                id: row.user_id,
                email: row.user_email,
            },
            created_at: row.created_at,
            modified_at: row.modified_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct CommentRow {
    id: i64,
    contents: String,
    todo_id: i64,
    user_id: i64,
    user_email: String,
    created_at: DateTime<Utc>,
    modified_at: DateTime<Utc>,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Comment {
            id: row.id,
            contents: row.contents,
            todo_id: row.todo_id,
            user: UserSummary {
                id: row.user_id,
                email: row.user_email,
            },
            created_at: row.created_at,
            modified_at: row.modified_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct ManagerRow {
    id: i64,
    todo_id: i64,
    user_id: i64,
    user_email: String,
}

impl From<ManagerRow> for Manager {
    fn from(row: ManagerRow) -> Self {
        Manager {
            id: row.id,
            todo_id: row.todo_id,
            user: UserSummary {
                id: row.user_id,
                email: row.user_email,
            },
        }
    }
}

const USER_COLUMNS: &str = "id, email, password_hash, role, created_at, modified_at";

const TODO_SELECT: &str = r#"
    SELECT t.id, t.title, t.contents, t.weather, t.created_at, t.modified_at,
           u.id AS user_id, u.email AS user_email
    FROM todos t
    JOIN users u ON u.id = t.user_id
"#;

const COMMENT_SELECT: &str = r#"
    SELECT c.id, c.contents, c.todo_id, c.created_at, c.modified_at,
           u.id AS user_id, u.email AS user_email
    FROM comments c
    JOIN users u ON u.id = c.user_id
"#;

const MANAGER_SELECT: &str = r#"
    SELECT m.id, m.todo_id, u.id AS user_id, u.email AS user_email
    FROM managers m
    JOIN users u ON u.id = m.user_id
"#;

fn db_error_code(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().map(|code| code.into_owned()),
        _ => None,
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    db_error_code(err).as_deref() == Some("23505")
}

fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    db_error_code(err).as_deref() == Some("23503")
}

fn map_write_error(err: sqlx::Error, what: &str) -> StoreError {
    if is_unique_violation(&err) {
        StoreError::Conflict(format!("{} already exists", what))
    } else if is_foreign_key_violation(&err) {
        StoreError::NotFound(format!("{} references a missing row", what))
    } else {
        StoreError::Unexpected(err.into())
    }
}

fn unexpected(err: sqlx::Error) -> StoreError {
    StoreError::Unexpected(err.into())
}

#[async_trait]
impl UserStore for PgStore {
    async fn create_user(&self, data: CreateUser) -> StoreResult<User> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "INSERT INTO users (email, password_hash, role) VALUES ($1, $2, $3) RETURNING {}",
            USER_COLUMNS
        ))
        .bind(&data.email)
        .bind(data.password_hash)
        .bind(data.role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &format!("email {}", data.email)))?;

        row.try_into()
    }

    async fn find_user(&self, id: i64) -> StoreResult<Option<User>> {
        sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?
        .map(User::try_from)
        .transpose()
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?
        .map(User::try_from)
        .transpose()
    }

    async fn email_exists(&self, email: &str) -> StoreResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(unexpected)
    }

    async fn update_password(&self, id: i64, password_hash: String) -> StoreResult<()> {
        let result = sqlx::query(
            "UPDATE users SET password_hash = $2, modified_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("user {}", id)));
        }
        Ok(())
    }

    async fn update_role(&self, id: i64, role: UserRole) -> StoreResult<()> {
        let result = sqlx::query("UPDATE users SET role = $2, modified_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(role.as_str())
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("user {}", id)));
        }
        Ok(())
    }
}

#[async_trait]
impl TodoStore for PgStore {
    async fn create_todo(&self, data: CreateTodo) -> StoreResult<Todo> {
        let row = sqlx::query_as::<_, TodoRow>(
            r#"
            WITH inserted AS (
                INSERT INTO todos (title, contents, weather, user_id)
                VALUES ($1, $2, $3, $4)
                RETURNING id, title, contents, weather, user_id, created_at, modified_at
            )
            SELECT i.id, i.title, i.contents, i.weather, i.created_at, i.modified_at,
                   u.id AS user_id, u.email AS user_email
            FROM inserted i
            JOIN users u ON u.id = i.user_id
            "#,
        )
        .bind(data.title)
        .bind(data.contents)
        .bind(data.weather)
        .bind(data.user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &format!("todo owner {}", data.user_id)))?;

        Ok(row.into())
    }

    async fn find_todo(&self, id: i64) -> StoreResult<Option<Todo>> {
        let row = sqlx::query_as::<_, TodoRow>(&format!("{} WHERE t.id = $1", TODO_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?;

        Ok(row.map(Todo::from))
    }

    async fn list_todos(&self, request: PageRequest) -> StoreResult<Page<Todo>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM todos")
            .fetch_one(&self.pool)
            .await
            .map_err(unexpected)?;

        let rows = sqlx::query_as::<_, TodoRow>(&format!(
            "{} ORDER BY t.modified_at DESC, t.id DESC LIMIT $1 OFFSET $2",
            TODO_SELECT
        ))
        .bind(i64::from(request.size))
        .bind(request.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;

        let content = rows.into_iter().map(Todo::from).collect();
        Ok(Page::new(content, request, total.max(0) as u64))
    }
}

#[async_trait]
impl CommentStore for PgStore {
    async fn create_comment(&self, data: CreateComment) -> StoreResult<Comment> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            WITH inserted AS (
                INSERT INTO comments (contents, todo_id, user_id)
                VALUES ($1, $2, $3)
                RETURNING id, contents, todo_id, user_id, created_at, modified_at
            )
            SELECT i.id, i.contents, i.todo_id, i.created_at, i.modified_at,
                   u.id AS user_id, u.email AS user_email
            FROM inserted i
            JOIN users u ON u.id = i.user_id
            "#,
        )
        .bind(data.contents)
        .bind(data.todo_id)
        .bind(data.user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &format!("comment on todo {}", data.todo_id)))?;

        Ok(row.into())
    }

    async fn list_comments(&self, todo_id: i64) -> StoreResult<Vec<Comment>> {
        let rows = sqlx::query_as::<_, CommentRow>(&format!(
            "{} WHERE c.todo_id = $1 ORDER BY c.created_at ASC, c.id ASC",
            COMMENT_SELECT
        ))
        .bind(todo_id)
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(rows.into_iter().map(Comment::from).collect())
    }

    async fn delete_comment(&self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl ManagerStore for PgStore {
    async fn create_manager(&self, data: CreateManager) -> StoreResult<Manager> {
        let row = sqlx::query_as::<_, ManagerRow>(
            r#"
            WITH inserted AS (
                INSERT INTO managers (todo_id, user_id)
                VALUES ($1, $2)
                RETURNING id, todo_id, user_id
            )
            SELECT i.id, i.todo_id, u.id AS user_id, u.email AS user_email
            FROM inserted i
            JOIN users u ON u.id = i.user_id
            "#,
        )
        .bind(data.todo_id)
        .bind(data.user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_write_error(
                e,
                &format!("manager {} on todo {}", data.user_id, data.todo_id),
            )
        })?;

        Ok(row.into())
    }

    async fn find_manager(&self, id: i64) -> StoreResult<Option<Manager>> {
        let row = sqlx::query_as::<_, ManagerRow>(&format!("{} WHERE m.id = $1", MANAGER_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?;

        Ok(row.map(Manager::from))
    }

    async fn list_managers(&self, todo_id: i64) -> StoreResult<Vec<Manager>> {
        let rows = sqlx::query_as::<_, ManagerRow>(&format!(
            "{} WHERE m.todo_id = $1 ORDER BY m.id ASC",
            MANAGER_SELECT
        ))
        .bind(todo_id)
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(rows.into_iter().map(Manager::from).collect())
    }

    async fn manager_exists(&self, todo_id: i64, user_id: i64) -> StoreResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM managers WHERE todo_id = $1 AND user_id = $2)",
        )
        .bind(todo_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(unexpected)
    }

    async fn delete_manager(&self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM managers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl Store for PgStore {
    async fn health_check(&self) -> StoreResult<()> {
        crate::db::pool::health_check(&self.pool)
            .await
            .map_err(unexpected)
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}

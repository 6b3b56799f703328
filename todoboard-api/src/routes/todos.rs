/// Todo endpoints
///
/// - `POST /v1/todos` - Create a todo stamped with today's weather
/// - `GET /v1/todos?page=1&size=10` - Newest-modified first
/// - `GET /v1/todos/:todoId` - Single todo with its author

use crate::{
    app::AppState,
    error::ApiResult,
    extract::{Json, Path, Query},
    services,
};
use axum::{extract::State, http::StatusCode, Extension};
use serde::Deserialize;
use todoboard_shared::{
    auth::middleware::AuthUser,
    models::{page::Page, todo::Todo},
};
use validator::Validate;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Create todo request
#[derive(Debug, Deserialize, Validate)]
pub struct SaveTodoRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    #[validate(length(min = 1, message = "Contents are required"))]
    pub contents: String,
}

fn default_page() -> u32 {
    DEFAULT_PAGE
}

fn default_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

/// `?page&size` query, 1-based
#[derive(Debug, Deserialize, Validate)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "Page must be at least 1"))]
    pub page: u32,

    #[serde(default = "default_size")]
    #[validate(range(min = 1, max = 100, message = "Size must be between 1 and 100"))]
    pub size: u32,
}

pub async fn save_todo(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(req): Json<SaveTodoRequest>,
) -> ApiResult<(StatusCode, Json<Todo>)> {
    req.validate()?;

    let todo =
        services::todo::save_todo(&*state.store, &*state.weather, &auth, req.title, req.contents)
            .await?;

    Ok((StatusCode::CREATED, Json(todo)))
}

pub async fn get_todos(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<Page<Todo>>> {
    query.validate()?;

    let page = services::todo::get_todos(&*state.store, query.page, query.size).await?;
    Ok(Json(page))
}

pub async fn get_todo(
    State(state): State<AppState>,
    Path(todo_id): Path<i64>,
) -> ApiResult<Json<Todo>> {
    let todo = services::todo::get_todo(&*state.store, todo_id).await?;
    Ok(Json(todo))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_query_defaults() {
        let query: PageQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.page, DEFAULT_PAGE);
        assert_eq!(query.size, DEFAULT_PAGE_SIZE);
        assert!(query.validate().is_ok());
    }

    #[test]
    fn test_page_query_bounds() {
        let zero_page = PageQuery { page: 0, size: 10 };
        assert!(zero_page.validate().is_err());

        let too_large = PageQuery {
            page: 1,
            size: MAX_PAGE_SIZE + 1,
        };
        assert!(too_large.validate().is_err());
    }
}

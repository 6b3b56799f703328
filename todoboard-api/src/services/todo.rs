//! Todo creation and lookup

use todoboard_shared::{
    auth::middleware::AuthUser,
    models::{
        page::{Page, PageRequest},
        todo::{CreateTodo, Todo},
    },
    store::TodoStore,
    weather::WeatherProvider,
};
use tracing::info;

use crate::error::{ApiError, ApiResult};

pub const TODO_NOT_FOUND: &str = "Todo not found";

pub(crate) async fn require_todo<S>(store: &S, todo_id: i64) -> ApiResult<Todo>
where
    S: TodoStore + ?Sized,
{
    store
        .find_todo(todo_id)
        .await?
        .ok_or_else(|| ApiError::not_found(TODO_NOT_FOUND))
}

/// Saves a todo owned by the caller, stamped with today's weather
pub async fn save_todo<S, W>(
    store: &S,
    weather: &W,
    auth: &AuthUser,
    title: String,
    contents: String,
) -> ApiResult<Todo>
where
    S: TodoStore + ?Sized,
    W: WeatherProvider + ?Sized,
{
    let weather = weather.today_weather().await?;

    let todo = store
        .create_todo(CreateTodo {
            title,
            contents,
            weather,
            user_id: auth.id,
        })
        .await?;

    info!(todo_id = todo.id, user_id = auth.id, "Todo saved");
    Ok(todo)
}

/// Newest-modified first
pub async fn get_todos<S>(store: &S, page: u32, size: u32) -> ApiResult<Page<Todo>>
where
    S: TodoStore + ?Sized,
{
    Ok(store.list_todos(PageRequest::new(page, size)).await?)
}

pub async fn get_todo<S>(store: &S, todo_id: i64) -> ApiResult<Todo>
where
    S: TodoStore + ?Sized,
{
    require_todo(store, todo_id).await
}

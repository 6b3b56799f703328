/// Manager endpoints
///
/// - `POST /v1/todos/:todoId/managers` - Todo creator assigns a manager
/// - `GET /v1/todos/:todoId/managers`
/// - `DELETE /v1/todos/:todoId/managers/:managerId` - Todo creator removes one

use crate::{
    app::AppState,
    error::ApiResult,
    extract::{Json, Path},
    services,
};
use axum::{extract::State, http::StatusCode, Extension};
use serde::Deserialize;
use todoboard_shared::{auth::middleware::AuthUser, models::manager::ManagerResponse};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveManagerRequest {
    pub manager_user_id: i64,
}

pub async fn save_manager(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(todo_id): Path<i64>,
    Json(req): Json<SaveManagerRequest>,
) -> ApiResult<(StatusCode, Json<ManagerResponse>)> {
    let manager =
        services::manager::save_manager(&*state.store, &auth, todo_id, req.manager_user_id)
            .await?;
    Ok((StatusCode::CREATED, Json(manager)))
}

pub async fn get_managers(
    State(state): State<AppState>,
    Path(todo_id): Path<i64>,
) -> ApiResult<Json<Vec<ManagerResponse>>> {
    let managers = services::manager::get_managers(&*state.store, todo_id).await?;
    Ok(Json(managers))
}

pub async fn delete_manager(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path((todo_id, manager_id)): Path<(i64, i64)>,
) -> ApiResult<StatusCode> {
    services::manager::delete_manager(&*state.store, &auth, todo_id, manager_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

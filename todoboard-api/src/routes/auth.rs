/// Authentication endpoints
///
/// - `POST /v1/auth/signup` - Register a user and get a bearer token
/// - `POST /v1/auth/signin` - Exchange credentials for a bearer token
///
/// Both return:
///
/// ```json
/// { "bearerToken": "Bearer eyJ..." }
/// ```

use crate::{app::AppState, error::ApiResult, extract::Json, services};
use axum::{extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Signup request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    /// `USER` or `ADMIN`, case-insensitive
    #[validate(length(min = 1, message = "User role is required"))]
    pub user_role: String,
}

/// Signin request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SigninRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token response for signup and signin
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    /// `"Bearer " + jwt`, ready to send back in `Authorization`
    pub bearer_token: String,
}

/// # Errors
///
/// - `400 Bad Request`: Email already registered, or invalid role
/// - `422 Unprocessable Entity`: Validation failed
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> ApiResult<(StatusCode, Json<TokenResponse>)> {
    req.validate()?;

    let bearer_token = services::auth::signup(
        &*state.store,
        &state.passwords,
        &state.config.jwt,
        &req.email,
        &req.password,
        &req.user_role,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(TokenResponse { bearer_token })))
}

/// # Errors
///
/// - `400 Bad Request`: User not registered
/// - `401 Unauthorized`: Wrong password
/// - `422 Unprocessable Entity`: Validation failed
pub async fn signin(
    State(state): State<AppState>,
    Json(req): Json<SigninRequest>,
) -> ApiResult<Json<TokenResponse>> {
    req.validate()?;

    let bearer_token = services::auth::signin(
        &*state.store,
        &state.passwords,
        &state.config.jwt,
        &req.email,
        &req.password,
    )
    .await?;

    Ok(Json(TokenResponse { bearer_token }))
}

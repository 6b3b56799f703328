/// Audit logging for admin routes
///
/// Wraps every `/v1/admin/**` route. Before the handler runs, logs an
/// `[ADMIN-REQUEST]` line with the caller's user id, the request URI, the
/// request time and the body (absent when empty). After the handler returns,
/// logs an `[ADMIN-RESPONSE]` line with the response body. Both lines share a
/// `request_id` so they can be paired in aggregated logs. An empty body is
/// logged as `body=null`.
///
/// The response is passed through unchanged: same status, same headers,
/// same body bytes.
///
/// Must run inside the JWT auth layer so [`AuthUser`] is in the request
/// extensions.

use axum::{
    body::{to_bytes, Body},
    extract::Request,
    middleware::Next,
    response::Response,
};
use bytes::Bytes;
use chrono::Utc;
use todoboard_shared::auth::middleware::AuthUser;
use tracing::info;
use uuid::Uuid;

use crate::error::ApiError;

/// Largest body the audit layer will buffer, same as axum's `Json` limit
pub const MAX_AUDIT_BODY_BYTES: usize = 2 * 1024 * 1024;

fn body_text(bytes: &Bytes) -> Option<String> {
    if bytes.is_empty() {
        None
    } else {
        Some(String::from_utf8_lossy(bytes).into_owned())
    }
}

pub async fn admin_audit_layer(req: Request, next: Next) -> Result<Response, ApiError> {
    let request_id = Uuid::new_v4();
    let user_id = req
        .extensions()
        .get::<AuthUser>()
        .map(|auth| auth.id)
        .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))?;
    let method = req.method().clone();
    let url = req.uri().to_string();

    let (parts, body) = req.into_parts();
    let request_bytes = to_bytes(body, MAX_AUDIT_BODY_BYTES)
        .await
        .map_err(|e| ApiError::PayloadTooLarge(format!("Unreadable request body: {}", e)))?;

    info!(
        %request_id,
        user_id,
        %method,
        %url,
        time = %Utc::now().to_rfc3339(),
        body = %body_text(&request_bytes).as_deref().unwrap_or("null"),
        "[ADMIN-REQUEST]"
    );

    let response = next
        .run(Request::from_parts(parts, Body::from(request_bytes)))
        .await;

    let (parts, body) = response.into_parts();
    let response_bytes = to_bytes(body, usize::MAX)
        .await
        .map_err(|e| ApiError::InternalError(format!("Unreadable response body: {}", e)))?;

    info!(
        %request_id,
        status = parts.status.as_u16(),
        body = %body_text(&response_bytes).as_deref().unwrap_or("null"),
        "[ADMIN-RESPONSE]"
    );

    Ok(Response::from_parts(parts, Body::from(response_bytes)))
}

/// Request extractors whose rejections render as [`ApiError`]
///
/// Drop-in replacements for `axum::Json`, `axum::extract::Path` and
/// `axum::extract::Query`. A body that does not deserialize, a path segment
/// that is not a number or a bad query string answers with the usual
/// `{error, message, details?}` JSON body instead of axum's plain text.
///
/// `Json` also works as a response body.

use crate::error::ApiError;
use axum::{
    extract::{FromRequest, FromRequestParts},
    response::{IntoResponse, Response},
};
use serde::Serialize;

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct Path<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct Query<T>(pub T);

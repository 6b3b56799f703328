/// Request authentication for Axum
///
/// [`authenticate`] reads the `Authorization: Bearer <jwt>` header, validates
/// the token and produces an [`AuthUser`]. The API's auth layer inserts that
/// value into request extensions, and handlers take it with
/// `Extension<AuthUser>`.
///
/// # Example
///
/// ```no_run
/// use axum::Extension;
/// use todoboard_shared::auth::middleware::AuthUser;
///
/// async fn handler(Extension(auth): Extension<AuthUser>) -> String {
///     format!("User {} ({})", auth.id, auth.role)
/// }
/// ```

use axum::{
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use super::jwt::{substring_token, validate_token, Claims, JwtError, BEARER_PREFIX};
use crate::models::user::UserRole;

/// Authenticated caller, built from validated token claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: i64,
    pub email: String,
    pub role: UserRole,
}

impl AuthUser {
    pub fn new(id: i64, email: impl Into<String>, role: UserRole) -> Self {
        Self {
            id,
            email: email.into(),
            role,
        }
    }

    /// Builds the caller from claims, rejecting a non-numeric subject
    pub fn from_claims(claims: &Claims) -> Result<Self, JwtError> {
        Ok(Self {
            id: claims.user_id()?,
            email: claims.email.clone(),
            role: claims.user_role,
        })
    }
}

/// Error type for request authentication
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Missing authorization header
    #[error("Missing authorization header")]
    MissingCredentials,

    /// Header present but not a bearer credential
    #[error("{0}")]
    InvalidFormat(String),

    /// Token validation failed
    #[error("{0}")]
    InvalidToken(String),
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingCredentials => StatusCode::UNAUTHORIZED,
            AuthError::InvalidFormat(_) => StatusCode::BAD_REQUEST,
            AuthError::InvalidToken(_) => StatusCode::UNAUTHORIZED,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (self.status_code(), self.to_string()).into_response()
    }
}

/// Authenticates a request from its headers
///
/// - no `Authorization` header: [`AuthError::MissingCredentials`] (401)
/// - header without the `Bearer ` prefix: [`AuthError::InvalidFormat`] (400)
/// - bad signature, expired or malformed token: [`AuthError::InvalidToken`] (401)
pub fn authenticate(headers: &HeaderMap, secret: &str) -> Result<AuthUser, AuthError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingCredentials)?
        .to_str()
        .map_err(|_| AuthError::InvalidFormat("Authorization header is not valid text".to_string()))?;

    if !auth_header.starts_with(BEARER_PREFIX) {
        return Err(AuthError::InvalidFormat("Expected Bearer token".to_string()));
    }

    let token = substring_token(auth_header)
        .map_err(|_| AuthError::InvalidToken("Empty bearer token".to_string()))?;

    let claims = validate_token(token, secret).map_err(|e| match e {
        JwtError::Expired => AuthError::InvalidToken("Token expired".to_string()),
        JwtError::InvalidIssuer { .. } => AuthError::InvalidToken("Invalid issuer".to_string()),
        _ => AuthError::InvalidToken(format!("Invalid token: {}", e)),
    })?;

    AuthUser::from_claims(&claims).map_err(|e| AuthError::InvalidToken(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::create_bearer_token;
    use axum::http::HeaderValue;
    use chrono::Duration;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_authenticate_valid_token() {
        let claims = Claims::new(5, "a@a.com", UserRole::Admin, Duration::minutes(10));
        let bearer = create_bearer_token(&claims, SECRET).unwrap();

        let user = authenticate(&headers_with(&bearer), SECRET).unwrap();
        assert_eq!(user, AuthUser::new(5, "a@a.com", UserRole::Admin));
    }

    #[test]
    fn test_authenticate_missing_header() {
        let err = authenticate(&HeaderMap::new(), SECRET).unwrap_err();
        assert!(matches!(err, AuthError::MissingCredentials));
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_authenticate_without_bearer_prefix() {
        let err = authenticate(&headers_with("Token abc"), SECRET).unwrap_err();
        assert!(matches!(err, AuthError::InvalidFormat(_)));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_authenticate_expired_token() {
        let claims = Claims::new(5, "a@a.com", UserRole::User, Duration::seconds(-60));
        let bearer = create_bearer_token(&claims, SECRET).unwrap();

        let err = authenticate(&headers_with(&bearer), SECRET).unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken(ref msg) if msg == "Token expired"));
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_authenticate_wrong_secret() {
        let claims = Claims::new(5, "a@a.com", UserRole::User, Duration::minutes(10));
        let bearer = create_bearer_token(&claims, SECRET).unwrap();

        let err = authenticate(&headers_with(&bearer), "some-other-secret-of-32-bytes-or-more").unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken(_)));
    }

    #[test]
    fn test_auth_error_into_response() {
        let response = AuthError::MissingCredentials.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = AuthError::InvalidFormat("bad".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

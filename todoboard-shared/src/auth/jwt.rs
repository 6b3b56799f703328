/// JWT token generation and validation
///
/// Tokens are signed with HS256 and carry the user's id, email and role, so
/// request handling never needs a store lookup to authenticate a caller.
///
/// # Wire format
///
/// Tokens are handed to clients with a `"Bearer "` prefix and must be sent
/// back the same way in the `Authorization` header. [`create_bearer_token`]
/// adds the prefix, [`substring_token`] strips it.
///
/// # Claims
///
/// - `sub`: user id as a decimal string
/// - `email`: user email
/// - `userRole`: `"USER"` or `"ADMIN"`
/// - `iss`: always `"todoboard"`
/// - `iat` / `nbf` / `exp`: Unix timestamps
///
/// # Example
///
/// ```
/// use todoboard_shared::auth::jwt::{create_bearer_token, substring_token, validate_token, Claims};
/// use todoboard_shared::models::user::UserRole;
/// use chrono::Duration;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let secret = "a-secret-that-is-at-least-32-bytes-long";
/// let claims = Claims::new(7, "a@a.com", UserRole::User, Duration::minutes(60));
///
/// let bearer = create_bearer_token(&claims, secret)?;
/// let token = substring_token(&bearer)?;
/// let validated = validate_token(token, secret)?;
/// assert_eq!(validated.user_id()?, 7);
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::models::user::UserRole;

/// Prefix carried by every issued token and expected on every request
pub const BEARER_PREFIX: &str = "Bearer ";

const ISSUER: &str = "todoboard";

/// Error type for JWT operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Failed to create token
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Failed to validate token
    #[error("Failed to validate token: {0}")]
    ValidationError(String),

    /// Token has expired
    #[error("Token has expired")]
    Expired,

    /// Claims decoded but their contents are unusable
    #[error("Invalid token format: {0}")]
    InvalidFormat(String),

    /// Invalid issuer
    #[error("Invalid issuer: expected {expected}")]
    InvalidIssuer { expected: String },

    /// Value handed to [`substring_token`] lacks the bearer prefix
    #[error("Not Found Token")]
    TokenNotFound,
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - user id rendered as a string
    pub sub: String,

    pub email: String,

    #[serde(rename = "userRole")]
    pub user_role: UserRole,

    /// Issuer - always "todoboard"
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Not before (Unix timestamp)
    pub nbf: i64,
}

impl Claims {
    /// Creates claims that expire `expires_in` from now
    pub fn new(user_id: i64, email: impl Into<String>, role: UserRole, expires_in: Duration) -> Self {
        let now = Utc::now();
        let expiration = now + expires_in;

        Self {
            sub: user_id.to_string(),
            email: email.into(),
            user_role: role,
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            nbf: now.timestamp(),
        }
    }

    /// Parses `sub` back into a user id
    pub fn user_id(&self) -> Result<i64, JwtError> {
        self.sub
            .parse()
            .map_err(|_| JwtError::InvalidFormat(format!("subject is not a user id: {}", self.sub)))
    }
}

/// Signs claims with HS256 and returns the bare compact token.
pub fn create_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, claims, &key)
        .map_err(|e| JwtError::CreateError(format!("Token encoding failed: {}", e)))
}

/// Signs claims and prepends [`BEARER_PREFIX`]. This is what signup and
/// signin hand back to clients.
pub fn create_bearer_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    Ok(format!("{}{}", BEARER_PREFIX, create_token(claims, secret)?))
}

/// Strips [`BEARER_PREFIX`] from a header value.
///
/// Fails with [`JwtError::TokenNotFound`] when the prefix is absent or
/// nothing follows it.
pub fn substring_token(value: &str) -> Result<&str, JwtError> {
    match value.strip_prefix(BEARER_PREFIX) {
        Some(token) if !token.is_empty() => Ok(token),
        _ => Err(JwtError::TokenNotFound),
    }
}

/// Validates a bare token and extracts its claims
///
/// Verifies the signature, `exp`, `nbf` and the issuer.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.validate_exp = true;
    validation.validate_nbf = true;
    validation.leeway = 0;

    let token_data = decode::<Claims>(token, &key, &validation).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidIssuer => JwtError::InvalidIssuer {
            expected: ISSUER.to_string(),
        },
        _ => JwtError::ValidationError(format!("Token validation failed: {}", e)),
    })?;

    Ok(token_data.claims)
}

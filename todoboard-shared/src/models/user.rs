/// User model and role definitions
///
/// Users are created at signup and mutated only when their password or role
/// changes. Emails are unique across all users.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id BIGSERIAL PRIMARY KEY,
///     email VARCHAR(255) NOT NULL UNIQUE,
///     password_hash VARCHAR(255) NOT NULL,
///     role VARCHAR(16) NOT NULL DEFAULT 'USER',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     modified_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role of a user account
///
/// Serialized in upper case (`"USER"`, `"ADMIN"`) both in JWT claims and in
/// the `users.role` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    /// Regular account
    User,

    /// Administrator, may call `/admin` endpoints
    Admin,
}

/// Returned when a role name matches neither `USER` nor `ADMIN`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid user role: {0}")]
pub struct InvalidUserRole(pub String);

impl UserRole {
    /// Gets role as its canonical upper-case name
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "USER",
            UserRole::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive parse, so `"admin"`, `"Admin"` and `"ADMIN"` are equal.
impl FromStr for UserRole {
    type Err = InvalidUserRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("USER") {
            Ok(UserRole::User)
        } else if s.eq_ignore_ascii_case("ADMIN") {
            Ok(UserRole::Admin)
        } else {
            Err(InvalidUserRole(s.to_string()))
        }
    }
}

/// User account
///
/// Passwords are stored as bcrypt or Argon2id hashes, never in plaintext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Unique user ID
    pub id: i64,

    /// Email address, unique across all users
    pub email: String,

    /// Password hash (PHC or modular crypt format)
    pub password_hash: String,

    /// Account role
    pub role: UserRole,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// When the account was last modified
    pub modified_at: DateTime<Utc>,
}

/// Input for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Email address
    pub email: String,

    /// Password hash (NOT plaintext password!)
    pub password_hash: String,

    /// Initial role
    pub role: UserRole,
}

/// Public projection of a user, embedded in todo/comment/manager responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: i64,
    pub email: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
        }
    }
}

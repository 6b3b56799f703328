/// Authentication and authorization utilities
///
/// # Modules
///
/// - [`password`]: bcrypt / Argon2id password hashing and strength rules
/// - [`jwt`]: bearer token issuance and validation
/// - [`middleware`]: request authentication and the [`middleware::AuthUser`] context
/// - [`authorization`]: role checks for admin routes
///
/// # Example
///
/// ```
/// use todoboard_shared::auth::jwt::{create_bearer_token, Claims};
/// use todoboard_shared::auth::password::PasswordEncoder;
/// use todoboard_shared::models::user::UserRole;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let encoder = PasswordEncoder::default();
/// let hash = encoder.encode("Passw0rd")?;
/// assert!(encoder.matches("Passw0rd", &hash)?);
///
/// let claims = Claims::new(1, "a@a.com", UserRole::User, chrono::Duration::minutes(60));
/// let bearer = create_bearer_token(&claims, "a-secret-that-is-at-least-32-bytes-long")?;
/// assert!(bearer.starts_with("Bearer "));
/// # Ok(())
/// # }
/// ```

pub mod authorization;
pub mod jwt;
pub mod middleware;
pub mod password;

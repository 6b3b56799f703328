/// API route handlers
///
/// Handlers are thin: validate the request DTO, call into
/// [`crate::services`], shape the response.
///
/// - `health`: Health check endpoint
/// - `auth`: Signup and signin
/// - `users`: User lookup and password change
/// - `todos`: Todo creation and listing
/// - `comments`: Comments on a todo
/// - `managers`: Manager assignment on a todo
/// - `admin`: Role change and comment removal (admin only, audited)

pub mod admin;
pub mod auth;
pub mod comments;
pub mod health;
pub mod managers;
pub mod todos;
pub mod users;

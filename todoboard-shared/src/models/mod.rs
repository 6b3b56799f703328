/// Domain models for Todoboard
///
/// This module contains the entities persisted by the store and the
/// projections returned over the wire.
///
/// # Models
///
/// - `user`: User accounts and roles
/// - `todo`: Todos owned by a user
/// - `comment`: Comment threads on todos
/// - `manager`: Users assigned as responsible party for a todo
/// - `page`: 1-based pagination request/response
///
/// # Example
///
/// ```
/// use todoboard_shared::models::user::{UserRole, UserSummary};
///
/// let role: UserRole = "admin".parse().unwrap();
/// assert_eq!(role, UserRole::Admin);
///
/// let summary = UserSummary { id: 1, email: "user@example.com".to_string() };
/// assert_eq!(summary.id, 1);
/// ```

pub mod comment;
pub mod manager;
pub mod page;
pub mod todo;
pub mod user;

/// Business logic behind the HTTP handlers
///
/// Each function loads the entities it needs from the store, applies the
/// domain rules (ownership, self-assignment, duplicate email, password
/// equality) and either persists a change or returns a projection.
///
/// Services are generic over the narrowest store trait they use and accept
/// `?Sized` stores, so handlers pass `&*state.store` (a `dyn Store`) while
/// tests pass a `MemoryStore` directly.
///
/// - `auth`: signup and signin
/// - `user`: profile lookup, password change, role change
/// - `todo`: create, page and fetch todos
/// - `comment`: comment threads and admin deletion
/// - `manager`: todo assignees

pub mod auth;
pub mod comment;
pub mod manager;
pub mod todo;
pub mod user;

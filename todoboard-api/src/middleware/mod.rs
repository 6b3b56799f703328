/// Middleware for the API server
///
/// - `security`: hardening headers on every response
/// - `admin_audit`: request/response audit log for `/v1/admin` routes
///
/// Authentication and the admin role check are request-scoped and live next
/// to the router in [`crate::app`].

pub mod admin_audit;
pub mod security;

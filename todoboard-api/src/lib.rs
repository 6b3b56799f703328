//! # Todoboard API Server Library
//!
//! HTTP surface of the todo board: router, handlers, business services and
//! the error type that maps domain failures to status codes.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `extract`: `Json`, `Path` and `Query` with JSON error bodies
//! - `middleware`: Security headers and admin audit logging
//! - `routes`: API route handlers
//! - `services`: Business rules, independent of HTTP

pub mod app;
pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod services;

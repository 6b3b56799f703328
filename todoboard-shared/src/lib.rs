//! # Todoboard Shared Library
//!
//! This crate contains the domain types, authentication primitives and
//! persistence layer used by the Todoboard API server.
//!
//! ## Module Organization
//!
//! - `models`: Domain entities and wire projections (users, todos, comments, managers)
//! - `auth`: Password hashing, JWT issuance/parsing, request auth context
//! - `store`: Repository traits with PostgreSQL and in-memory backends
//! - `db`: Connection pool and embedded migrations
//! - `weather`: "Today's weather" lookup stored on every new todo

pub mod auth;
pub mod db;
pub mod models;
pub mod store;
pub mod weather;


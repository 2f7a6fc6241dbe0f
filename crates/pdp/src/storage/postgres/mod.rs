//! Networked PostgreSQL backend.
//!
//! Uses a `sqlx` connection pool. Migrations are embedded from
//! `crates/pdp/migrations` and applied when the store is opened.

mod error;
mod repository;

pub use repository::PostgresRepository;

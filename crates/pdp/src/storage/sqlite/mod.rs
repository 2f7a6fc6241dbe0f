//! Embedded SQLite backend.
//!
//! Uses `rusqlite` for the queries and `tokio-rusqlite` to run them off the
//! async runtime. The schema is derived from the entity descriptors when the
//! store is opened with `synchronize` on.

mod conversions;
mod error;
mod repository;
mod schema;

pub use repository::SqliteRepository;

//! Functional core for the pdp product lookup service.
//!
//! Everything in this crate is free of I/O: domain types, validation rules,
//! configuration resolution, cache key and value handling, and the traits
//! that the storage and cache backends in the `pdp` binary implement.

pub mod cache;
pub mod config;
pub mod product;
pub mod storage;

//! Database layer for lyub
//!
//! This module provides the storage layer using SQLite with:
//! - Schema migrations
//! - Repository pattern for categories, activities, settings and the timer

pub mod repo;
pub mod schema;

pub use repo::Database;

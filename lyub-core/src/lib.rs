//! # lyub-core
//!
//! Core library for lyub - a Lyubishchev-style personal time tracker.
//!
//! This library provides:
//! - Domain types for categories, activities and the running timer
//! - A pure derived-statistics engine (totals, percentages, streaks,
//!   calendar intensity levels)
//! - Duration formatting for a user-selectable display unit
//! - SQLite storage layer
//! - Configuration management
//! - Logging infrastructure
//!
//! ## Architecture
//!
//! The statistics engine in [`stats`] is deliberately storage-free: every
//! function is a pure computation over caller-supplied activities and
//! categories with an injected "today". Frontends load the log through
//! [`Database`], run the engine, and render its output through [`format`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use lyub_core::{Config, Database};
//!
//! let config = Config::load().expect("failed to load config");
//! let db = Database::open(&Config::database_path()).expect("failed to open database");
//! db.migrate().expect("failed to run migrations");
//! db.seed_default_categories().expect("failed to seed categories");
//! ```

// Re-export commonly used items at the crate root
pub use config::Config;
pub use db::Database;
pub use error::{Error, Result};
pub use types::*;

// Public modules
pub mod config;
pub mod db;
pub mod error;
pub mod format;
pub mod logging;
pub mod stats;
pub mod types;

//! Database schema and migrations
//!
//! Uses SQLite with embedded migrations managed via PRAGMA user_version.

use rusqlite::Connection;

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// SQL migrations, indexed by version number
const MIGRATIONS: &[&str] = &[
    // Version 1: Initial schema
    r#"
    CREATE TABLE IF NOT EXISTS categories (
        id     TEXT PRIMARY KEY,
        name   TEXT NOT NULL,
        kind   TEXT NOT NULL,
        color  TEXT NOT NULL
    );

    -- The activity log. Intervals are immutable once inserted: rows are
    -- appended or deleted, never updated. category_id is a weak reference,
    -- deliberately without a foreign key, so deleting a category leaves its
    -- activities in place.
    CREATE TABLE IF NOT EXISTS activities (
        id           TEXT PRIMARY KEY,
        category_id  TEXT NOT NULL,
        description  TEXT NOT NULL DEFAULT '',
        start_ms     INTEGER NOT NULL,
        end_ms       INTEGER NOT NULL,
        date         TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_activities_date ON activities(date);
    CREATE INDEX IF NOT EXISTS idx_activities_start ON activities(start_ms);

    -- Key-value settings: display unit preference and the serialized
    -- running timer.
    CREATE TABLE IF NOT EXISTS settings (
        key    TEXT PRIMARY KEY,
        value  TEXT NOT NULL
    );
    "#,
];

/// Run all pending migrations on this connection
pub fn run_migrations(conn: &Connection) -> crate::error::Result<()> {
    let current_version: i32 = conn
        .query_row("PRAGMA user_version", [], |r| r.get(0))
        .unwrap_or(0);

    tracing::debug!(
        current_version,
        target_version = SCHEMA_VERSION,
        "Checking database migrations"
    );

    for (i, migration) in MIGRATIONS.iter().enumerate() {
        let version = (i + 1) as i32;
        if version > current_version {
            tracing::info!(version, "Running migration");
            conn.execute_batch(migration)?;
            conn.execute(&format!("PRAGMA user_version = {}", version), [])?;
        }
    }

    Ok(())
}

/// Get the current schema version from the database
pub fn get_schema_version(conn: &Connection) -> crate::error::Result<i32> {
    let version: i32 = conn.query_row("PRAGMA user_version", [], |r| r.get(0))?;
    Ok(version)
}

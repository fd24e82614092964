//! Database repository layer
//!
//! Provides query and insert operations for categories, the activity log,
//! settings, and the persisted running timer. The statistics engine never
//! touches this layer; frontends load collections here and pass them into
//! [`crate::stats`] as plain values.

use crate::error::{Error, Result};
use crate::stats::DateRange;
use crate::types::{
    default_categories, local_date_of_ms, Activity, Category, CategoryType, TimeUnit, TimerState,
};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::PathBuf;
use std::sync::Mutex;

/// Settings key for the display unit preference.
const SETTING_TIME_UNIT: &str = "time_unit";
/// Settings key for the serialized running timer.
const SETTING_TIMER: &str = "timer";

/// Database handle (single connection guarded by a mutex)
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open or create a database at the given path
    pub fn open(path: &PathBuf) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            ",
        )?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run migrations on this database
    pub fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        super::schema::run_migrations(&conn)
    }

    /// Seed the default Lyubishchev categories when none exist yet.
    ///
    /// Returns `true` when the defaults were inserted.
    pub fn seed_default_categories(&self) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM categories", [], |r| r.get(0))?;
        if count > 0 {
            return Ok(false);
        }

        for category in default_categories() {
            conn.execute(
                "INSERT INTO categories (id, name, kind, color) VALUES (?1, ?2, ?3, ?4)",
                params![
                    category.id,
                    category.name,
                    category.kind.as_str(),
                    category.color
                ],
            )?;
        }

        tracing::info!("Seeded default categories");
        Ok(true)
    }

    // ============================================
    // Category operations
    // ============================================

    /// Insert a category
    pub fn insert_category(&self, category: &Category) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO categories (id, name, kind, color) VALUES (?1, ?2, ?3, ?4)",
            params![
                category.id,
                category.name,
                category.kind.as_str(),
                category.color
            ],
        )?;
        Ok(())
    }

    /// Get a category by ID
    pub fn get_category(&self, id: &str) -> Result<Option<Category>> {
        let conn = self.conn.lock().unwrap();
        conn.query_row(
            "SELECT id, name, kind, color FROM categories WHERE id = ?",
            [id],
            Self::row_to_category,
        )
        .optional()
        .map_err(Error::from)
    }

    /// List all categories in insertion order
    pub fn list_categories(&self) -> Result<Vec<Category>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT id, name, kind, color FROM categories")?;
        let rows = stmt.query_map([], Self::row_to_category)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Error::from)
    }

    /// Delete a category by ID.
    ///
    /// Activities keep their (now dangling) category_id; only the running
    /// timer's selection is cleared when it points at the deleted category.
    pub fn delete_category(&self, id: &str) -> Result<()> {
        let timer_points_here = self
            .timer()?
            .map(|t| t.category_id == id)
            .unwrap_or(false);

        let conn = self.conn.lock().unwrap();
        let deleted = conn.execute("DELETE FROM categories WHERE id = ?", [id])?;
        if deleted == 0 {
            return Err(Error::CategoryNotFound(id.to_string()));
        }

        if timer_points_here {
            conn.execute("DELETE FROM settings WHERE key = ?", [SETTING_TIMER])?;
            tracing::info!(category_id = id, "Cleared running timer for deleted category");
        }
        Ok(())
    }

    fn row_to_category(row: &Row) -> rusqlite::Result<Category> {
        let kind_str: String = row.get("kind")?;
        Ok(Category {
            id: row.get("id")?,
            name: row.get("name")?,
            kind: kind_str.parse().unwrap_or(CategoryType::Routine),
            color: row.get("color")?,
        })
    }

    // ============================================
    // Activity operations
    // ============================================

    /// Append an activity to the log
    pub fn insert_activity(&self, activity: &Activity) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            r#"
            INSERT INTO activities (id, category_id, description, start_ms, end_ms, date)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                activity.id,
                activity.category_id,
                activity.description,
                activity.start_ms,
                activity.end_ms,
                activity.date.format("%Y-%m-%d").to_string(),
            ],
        )?;
        Ok(())
    }

    /// Delete an activity by ID. Returns whether a row was removed.
    pub fn delete_activity(&self, id: &str) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let deleted = conn.execute("DELETE FROM activities WHERE id = ?", [id])?;
        Ok(deleted > 0)
    }

    /// List the whole activity log ordered by start time ascending
    pub fn list_activities(&self) -> Result<Vec<Activity>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, category_id, description, start_ms, end_ms, date
             FROM activities ORDER BY start_ms",
        )?;
        let rows = stmt.query_map([], Self::row_to_activity)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Error::from)
    }

    /// Activities whose date falls inside the inclusive range
    pub fn activities_in_range(&self, range: &DateRange) -> Result<Vec<Activity>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, category_id, description, start_ms, end_ms, date
             FROM activities WHERE date >= ?1 AND date <= ?2 ORDER BY start_ms",
        )?;
        let rows = stmt.query_map(
            params![
                range.start.format("%Y-%m-%d").to_string(),
                range.end.format("%Y-%m-%d").to_string(),
            ],
            Self::row_to_activity,
        )?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Error::from)
    }

    fn row_to_activity(row: &Row) -> rusqlite::Result<Activity> {
        let date_str: String = row.get("date")?;
        let start_ms: i64 = row.get("start_ms")?;

        Ok(Activity {
            id: row.get("id")?,
            category_id: row.get("category_id")?,
            description: row.get("description")?,
            start_ms,
            end_ms: row.get("end_ms")?,
            date: chrono::NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
                .unwrap_or_else(|_| local_date_of_ms(start_ms)),
        })
    }

    // ============================================
    // Settings
    // ============================================

    /// Get a raw setting value
    pub fn get_setting(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn.lock().unwrap();
        conn.query_row("SELECT value FROM settings WHERE key = ?", [key], |r| {
            r.get(0)
        })
        .optional()
        .map_err(Error::from)
    }

    /// Insert or update a setting
    pub fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            r#"
            INSERT INTO settings (key, value) VALUES (?1, ?2)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            "#,
            params![key, value],
        )?;
        Ok(())
    }

    /// The persisted display unit preference, or `default` when unset
    pub fn time_unit(&self, default: TimeUnit) -> Result<TimeUnit> {
        Ok(self
            .get_setting(SETTING_TIME_UNIT)?
            .and_then(|v| v.parse().ok())
            .unwrap_or(default))
    }

    /// Persist the display unit preference
    pub fn set_time_unit(&self, unit: TimeUnit) -> Result<()> {
        self.set_setting(SETTING_TIME_UNIT, unit.as_str())
    }

    // ============================================
    // Timer lifecycle
    // ============================================

    /// The running timer, if any
    pub fn timer(&self) -> Result<Option<TimerState>> {
        match self.get_setting(SETTING_TIMER)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Start a timer against a category.
    ///
    /// Errors when a timer is already running or the category does not exist.
    pub fn start_timer(
        &self,
        category_id: &str,
        description: &str,
        start_ms: i64,
    ) -> Result<TimerState> {
        if let Some(running) = self.timer()? {
            return Err(Error::Timer(format!(
                "a timer is already running (category {})",
                running.category_id
            )));
        }
        if self.get_category(category_id)?.is_none() {
            return Err(Error::CategoryNotFound(category_id.to_string()));
        }

        let state = TimerState {
            category_id: category_id.to_string(),
            description: description.to_string(),
            start_ms,
        };
        self.set_setting(SETTING_TIMER, &serde_json::to_string(&state)?)?;

        tracing::info!(category_id, "Timer started");
        Ok(state)
    }

    /// Stop the running timer and append the resulting activity.
    pub fn stop_timer(&self, end_ms: i64) -> Result<Activity> {
        let state = self
            .timer()?
            .ok_or_else(|| Error::Timer("no timer is running".to_string()))?;

        let activity = Activity::new(
            state.category_id,
            state.description,
            state.start_ms,
            end_ms,
        );
        self.insert_activity(&activity)?;
        self.clear_timer()?;

        tracing::info!(
            activity_id = %activity.id,
            secs = activity.duration_secs(),
            "Timer stopped, activity recorded"
        );
        Ok(activity)
    }

    /// Discard the running timer without recording an activity.
    pub fn cancel_timer(&self) -> Result<TimerState> {
        let state = self
            .timer()?
            .ok_or_else(|| Error::Timer("no timer is running".to_string()))?;
        self.clear_timer()?;
        Ok(state)
    }

    fn clear_timer(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute("DELETE FROM settings WHERE key = ?", [SETTING_TIMER])?;
        Ok(())
    }
}

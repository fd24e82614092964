//! Core domain types for lyub
//!
//! These types model Lyubishchev-style activity logging:
//!
//! | Term | Definition |
//! |------|------------|
//! | **Category** | A named, colored bucket that activities are tagged with |
//! | **CategoryType** | One of four fixed classifications used for high-level aggregation |
//! | **Activity** | One recorded, completed time interval assigned to a category |
//! | **TimerState** | The currently running (not yet recorded) interval |
//! | **TimeUnit** | The user's preferred display unit for durations |
//!
//! Activities are immutable once created: the log only grows (append) or
//! shrinks (delete), never edits in place. A category is referenced from an
//! activity by id only; deleting a category does not touch activities.

use chrono::{Local, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

// ============================================
// Category
// ============================================

/// Fixed activity classifications from Lyubishchev's method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryType {
    Creative,
    Routine,
    Rest,
    Personal,
}

impl CategoryType {
    /// All types in their canonical display order.
    pub const ALL: [CategoryType; 4] = [
        CategoryType::Creative,
        CategoryType::Routine,
        CategoryType::Rest,
        CategoryType::Personal,
    ];

    /// Returns the identifier used in database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryType::Creative => "creative",
            CategoryType::Routine => "routine",
            CategoryType::Rest => "rest",
            CategoryType::Personal => "personal",
        }
    }

    /// Returns the display label for this type
    pub fn label(&self) -> &'static str {
        match self {
            CategoryType::Creative => "Creative",
            CategoryType::Routine => "Routine",
            CategoryType::Rest => "Rest",
            CategoryType::Personal => "Personal",
        }
    }

    /// Returns the default color for this type
    pub fn default_color(&self) -> &'static str {
        match self {
            CategoryType::Creative => "#3b82f6",
            CategoryType::Routine => "#10b981",
            CategoryType::Rest => "#6b7280",
            CategoryType::Personal => "#ec4899",
        }
    }
}

impl std::fmt::Display for CategoryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for CategoryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "creative" => Ok(CategoryType::Creative),
            "routine" => Ok(CategoryType::Routine),
            "rest" => Ok(CategoryType::Rest),
            "personal" => Ok(CategoryType::Personal),
            _ => Err(format!("unknown category type: {}", s)),
        }
    }
}

/// A named bucket of a given type that activities are tagged with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: String,
    /// Human-friendly name
    pub name: String,
    /// Lyubishchev classification
    pub kind: CategoryType,
    /// Display color (hex)
    pub color: String,
}

impl Category {
    /// Create a new category with a generated id.
    ///
    /// Falls back to the type's default color when none is given.
    pub fn new(name: impl Into<String>, kind: CategoryType, color: Option<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            kind,
            color: color.unwrap_or_else(|| kind.default_color().to_string()),
        }
    }
}

/// The default category set, seeded on first run.
pub fn default_categories() -> Vec<Category> {
    let defaults = [
        ("cat-1", "Writing", CategoryType::Creative, "#3b82f6"),
        ("cat-2", "Research", CategoryType::Creative, "#8b5cf6"),
        ("cat-3", "Reading", CategoryType::Routine, "#10b981"),
        ("cat-4", "Meetings", CategoryType::Routine, "#f59e0b"),
        ("cat-5", "Rest", CategoryType::Rest, "#6b7280"),
        ("cat-6", "Interests", CategoryType::Personal, "#ec4899"),
    ];

    defaults
        .into_iter()
        .map(|(id, name, kind, color)| Category {
            id: id.to_string(),
            name: name.to_string(),
            kind,
            color: color.to_string(),
        })
        .collect()
}

// ============================================
// Activity
// ============================================

/// One recorded, completed time interval assigned to a category.
///
/// `date` is a cached copy of the local calendar date of `start_ms` and is
/// the sole grouping key for by-day aggregation. It is set once at
/// construction and never independently mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    /// Unique identifier
    pub id: String,
    /// Weak reference to a [`Category`] by id
    pub category_id: String,
    /// Free-form description
    pub description: String,
    /// Interval start, Unix timestamp in milliseconds
    pub start_ms: i64,
    /// Interval end, Unix timestamp in milliseconds
    pub end_ms: i64,
    /// Local calendar date of `start_ms`
    pub date: NaiveDate,
}

impl Activity {
    /// Create an activity from a completed interval.
    ///
    /// This is the single construction point that enforces the
    /// `date == local date of start_ms` invariant. `end_ms >= start_ms` is
    /// expected from callers and not defended against.
    pub fn new(
        category_id: impl Into<String>,
        description: impl Into<String>,
        start_ms: i64,
        end_ms: i64,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            category_id: category_id.into(),
            description: description.into(),
            start_ms,
            end_ms,
            date: local_date_of_ms(start_ms),
        }
    }

    /// Interval duration in whole seconds, rounded to nearest.
    ///
    /// Never stored; always derived from the millisecond timestamps. A
    /// malformed interval (`end < start`) propagates as a negative number.
    pub fn duration_secs(&self) -> i64 {
        ((self.end_ms - self.start_ms) as f64 / 1000.0).round() as i64
    }
}

/// Local calendar date of a Unix millisecond timestamp.
pub fn local_date_of_ms(ms: i64) -> NaiveDate {
    Local
        .timestamp_millis_opt(ms)
        .single()
        .map(|dt| dt.date_naive())
        .unwrap_or_else(|| Local::now().date_naive())
}

// ============================================
// Timer
// ============================================

/// The currently running timer, persisted so it survives process restarts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerState {
    /// Selected category id
    pub category_id: String,
    /// Description for the activity being recorded
    pub description: String,
    /// When the timer was started, Unix timestamp in milliseconds
    pub start_ms: i64,
}

impl TimerState {
    /// Whole seconds elapsed since the timer started.
    pub fn elapsed_secs(&self, now_ms: i64) -> i64 {
        (now_ms - self.start_ms) / 1000
    }
}

// ============================================
// Display unit
// ============================================

/// User-selectable display unit for durations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Seconds,
    #[default]
    Minutes,
    Hours,
}

impl TimeUnit {
    /// Returns the identifier used in settings storage
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeUnit::Seconds => "seconds",
            TimeUnit::Minutes => "minutes",
            TimeUnit::Hours => "hours",
        }
    }
}

impl std::fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TimeUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "seconds" | "sec" | "s" => Ok(TimeUnit::Seconds),
            "minutes" | "min" | "m" => Ok(TimeUnit::Minutes),
            "hours" | "hour" | "h" => Ok(TimeUnit::Hours),
            _ => Err(format!("unknown time unit: {}", s)),
        }
    }
}

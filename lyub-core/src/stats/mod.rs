//! Derived statistics over the activity log.
//!
//! This is the analytical core of lyub: pure functions that turn a raw, flat
//! log of time intervals into grouped totals, percentage breakdowns, streaks
//! and calendar intensity levels. Data flows one way:
//!
//! ```text
//! activities + categories
//!        |
//!        v
//!  aggregate (group by day/type/category, period ranges, deltas, trend)
//!        |
//!        +--> streak (consecutive-day walk)
//!        +--> calendar (intensity levels for the heatmap)
//! ```
//!
//! All outputs pass through [`crate::format`] before reaching a frontend.
//! "Now" is always an explicit parameter, so every function here is
//! deterministic and testable without a clock or storage mock. Recomputation
//! is cheap enough to run on every state change; callers may memoize but the
//! core keeps no cache.

pub mod aggregate;
pub mod calendar;
pub mod period;
pub mod streak;

pub use aggregate::{
    bar_height, daily_trend, summarize, total_secs, totals_by_category, totals_by_day,
    totals_by_type, DayTotal, PeriodSummary, TrendPoint,
};
pub use calendar::{intensity_level, month_heatmap, HeatmapDay};
pub use period::{percent_change, percent_of_total, DateRange, Period};
pub use streak::streak;

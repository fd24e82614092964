//! Grouping and reduction over the activity log.
//!
//! Every function here is a pure reduction over caller-supplied collections:
//! no storage access, no hidden state, inputs never mutated. Callers load the
//! log from the repository and pass it in, so the same inputs always produce
//! the same outputs.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::stats::period::{percent_change, DateRange, Period};
use crate::types::{Activity, Category, CategoryType};

/// Total tracked seconds for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayTotal {
    pub date: NaiveDate,
    pub total_secs: i64,
}

/// One entry of the 7-day trend series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub total_secs: i64,
}

/// Sum of durations over a set of activities.
pub fn total_secs<'a, I>(activities: I) -> i64
where
    I: IntoIterator<Item = &'a Activity>,
{
    activities.into_iter().map(|a| a.duration_secs()).sum()
}

/// Partition activities by their stored `date` field and sum durations.
///
/// Grouping uses the cached `date`, not a recomputed key, so an activity
/// always lands in exactly one bucket. Buckets appear in insertion order of
/// their first activity; callers sort for display.
pub fn totals_by_day<'a, I>(activities: I) -> Vec<DayTotal>
where
    I: IntoIterator<Item = &'a Activity>,
{
    let mut totals: Vec<DayTotal> = Vec::new();
    for activity in activities {
        match totals.iter_mut().find(|t| t.date == activity.date) {
            Some(bucket) => bucket.total_secs += activity.duration_secs(),
            None => totals.push(DayTotal {
                date: activity.date,
                total_secs: activity.duration_secs(),
            }),
        }
    }
    totals
}

/// Sum durations keyed by the resolved category's type.
///
/// Returns all four types in canonical order, zero-filled. An activity whose
/// `category_id` no longer resolves to a category contributes nothing here;
/// the raw activity still shows up in [`totals_by_category`].
pub fn totals_by_type<'a, I>(activities: I, categories: &[Category]) -> Vec<(CategoryType, i64)>
where
    I: IntoIterator<Item = &'a Activity>,
{
    let mut totals: Vec<(CategoryType, i64)> =
        CategoryType::ALL.iter().map(|&k| (k, 0)).collect();

    for activity in activities {
        let kind = categories
            .iter()
            .find(|c| c.id == activity.category_id)
            .map(|c| c.kind);
        if let Some(kind) = kind {
            if let Some(entry) = totals.iter_mut().find(|(k, _)| *k == kind) {
                entry.1 += activity.duration_secs();
            }
        }
    }
    totals
}

/// Sum durations keyed by `category_id` directly.
///
/// Dangling ids keep their own bucket; resolution to names is a display
/// concern. Buckets appear in insertion order of their first activity.
pub fn totals_by_category<'a, I>(activities: I) -> Vec<(String, i64)>
where
    I: IntoIterator<Item = &'a Activity>,
{
    let mut totals: Vec<(String, i64)> = Vec::new();
    for activity in activities {
        match totals.iter_mut().find(|(id, _)| *id == activity.category_id) {
            Some(entry) => entry.1 += activity.duration_secs(),
            None => totals.push((activity.category_id.clone(), activity.duration_secs())),
        }
    }
    totals
}

/// Fixed 7-entry series for the last seven days ending `today`, oldest first.
///
/// Days without activity are present with a zero total so the series always
/// has exactly seven entries for bar rendering.
pub fn daily_trend<'a, I>(activities: I, today: NaiveDate) -> Vec<TrendPoint>
where
    I: IntoIterator<Item = &'a Activity>,
{
    let day_totals = totals_by_day(activities);
    (0..7)
        .rev()
        .map(|back| {
            let date = today - Days::new(back);
            let total_secs = day_totals
                .iter()
                .find(|t| t.date == date)
                .map(|t| t.total_secs)
                .unwrap_or(0);
            TrendPoint { date, total_secs }
        })
        .collect()
}

/// Relative bar height in percent for trend rendering.
///
/// `100 * total / max(max_total, 1)`, floored to a minimum of 1 so zero days
/// still render a sliver.
pub fn bar_height(total_secs: i64, max_total_secs: i64) -> u8 {
    let pct = (total_secs as f64 / max_total_secs.max(1) as f64 * 100.0).round() as i64;
    pct.clamp(1, 100) as u8
}

/// Aggregate view of one period, with the previous-period delta.
#[derive(Debug, Clone, Serialize)]
pub struct PeriodSummary {
    pub period: Period,
    pub range: DateRange,
    /// Total tracked seconds in the period
    pub total_secs: i64,
    /// Total tracked seconds in the immediately preceding period
    pub previous_total_secs: i64,
    /// Rounded percent change against the previous period
    pub change_pct: i64,
    /// By-type breakdown, all four types zero-filled
    pub by_type: Vec<(CategoryType, i64)>,
    /// By-category breakdown in first-occurrence order
    pub by_category: Vec<(String, i64)>,
}

/// Compute the full summary for a period.
///
/// Pure function of `(activities, categories, period, today)`; calling it
/// twice with identical inputs yields identical outputs.
pub fn summarize(
    activities: &[Activity],
    categories: &[Category],
    period: Period,
    today: NaiveDate,
) -> PeriodSummary {
    let range = period.range(today);
    let previous = period.previous_range(today);

    let current: Vec<&Activity> = activities.iter().filter(|a| range.contains(a.date)).collect();
    let previous_total = total_secs(
        activities.iter().filter(|a| previous.contains(a.date)),
    );

    let total = total_secs(current.iter().copied());

    PeriodSummary {
        period,
        range,
        total_secs: total,
        previous_total_secs: previous_total,
        change_pct: percent_change(total, previous_total),
        by_type: totals_by_type(current.iter().copied(), categories),
        by_category: totals_by_category(current.iter().copied()),
    }
}

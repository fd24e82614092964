//! Period windows and period-over-period comparison.
//!
//! A period is a calendar window scoped to an injected `today` date so every
//! computation stays a pure function of its inputs. Ranges are inclusive date
//! ranges: the end is always `today`, never the end of the calendar period,
//! so totals read as-of-now rather than as full-period projections.

use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

/// A calendar window used to scope aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Today,
    Week,
    Month,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Today => "today",
            Period::Week => "week",
            Period::Month => "month",
        }
    }

    /// Display label for summaries.
    pub fn label(&self) -> &'static str {
        match self {
            Period::Today => "Today",
            Period::Week => "This Week",
            Period::Month => "This Month",
        }
    }

    /// Resolve this period against `today` into an inclusive date range.
    ///
    /// Week starts Monday; month starts on the 1st.
    pub fn range(&self, today: NaiveDate) -> DateRange {
        let start = match self {
            Period::Today => today,
            Period::Week => week_start(today),
            Period::Month => month_start(today),
        };
        DateRange { start, end: today }
    }

    /// The immediately preceding period of equal calendar length: yesterday,
    /// the previous Mon-Sun week, or the previous calendar month.
    ///
    /// Used only for delta comparison, never for display totals.
    pub fn previous_range(&self, today: NaiveDate) -> DateRange {
        match self {
            Period::Today => {
                let yesterday = today - Days::new(1);
                DateRange {
                    start: yesterday,
                    end: yesterday,
                }
            }
            Period::Week => {
                let start = week_start(today) - Days::new(7);
                DateRange {
                    start,
                    end: start + Days::new(6),
                }
            }
            Period::Month => {
                let end = month_start(today) - Days::new(1);
                DateRange {
                    start: month_start(end),
                    end,
                }
            }
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "today" | "day" => Ok(Period::Today),
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            _ => Err(format!("unknown period: {}", s)),
        }
    }
}

/// An inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Monday of the week containing `date`.
fn week_start(date: NaiveDate) -> NaiveDate {
    date - Days::new(date.weekday().num_days_from_monday() as u64)
}

/// First day of the month containing `date`.
fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).expect("day 1 is valid for every month")
}

/// Percent change against the previous period, rounded to the nearest whole
/// percent.
///
/// A zero previous period reads as `100` when there is any current activity
/// and `0` otherwise. Showing "+100%" instead of an undefined value is a
/// deliberate display policy.
pub fn percent_change(current: i64, previous: i64) -> i64 {
    if previous == 0 {
        if current > 0 {
            100
        } else {
            0
        }
    } else {
        ((current - previous) as f64 / previous as f64 * 100.0).round() as i64
    }
}

/// Share of `part` in `total` as a percentage; `0.0` when the total is zero.
pub fn percent_of_total(part: i64, total: i64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

//! Calendar heatmap intensity classification.
//!
//! Maps a day's total tracked duration to a discrete 0-4 level for heatmap
//! coloring. The thresholds are a fixed lookup, not a configurable scale.

use chrono::{Datelike, Days, NaiveDate};

use crate::stats::aggregate::totals_by_day;
use crate::types::Activity;

/// Intensity thresholds in seconds: start of levels 2, 3 and 4.
const ONE_HOUR: i64 = 3600;
const THREE_HOURS: i64 = 10_800;
const SIX_HOURS: i64 = 21_600;

/// Classify a day's total duration into an intensity level 0-4.
///
/// `0` no activity, `1` under an hour, `2` one to three hours, `3` three to
/// six hours, `4` six hours or more. Total and deterministic.
pub fn intensity_level(total_secs: i64) -> u8 {
    if total_secs <= 0 {
        0
    } else if total_secs < ONE_HOUR {
        1
    } else if total_secs < THREE_HOURS {
        2
    } else if total_secs < SIX_HOURS {
        3
    } else {
        4
    }
}

/// One day of the month heatmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeatmapDay {
    pub date: NaiveDate,
    pub total_secs: i64,
    pub level: u8,
}

/// Per-day intensity levels for every day of the given calendar month.
///
/// Days without activity are present with level 0 so the rendering layer can
/// lay out a full month grid.
pub fn month_heatmap(activities: &[Activity], year: i32, month: u32) -> Vec<HeatmapDay> {
    let day_totals = totals_by_day(activities);

    let mut days = Vec::new();
    let mut date = match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(d) => d,
        None => return days,
    };
    while date.month() == month {
        let total_secs = day_totals
            .iter()
            .find(|t| t.date == date)
            .map(|t| t.total_secs)
            .unwrap_or(0);
        days.push(HeatmapDay {
            date,
            total_secs,
            level: intensity_level(total_secs),
        });
        date = date + Days::new(1);
    }
    days
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intensity_thresholds() {
        assert_eq!(intensity_level(0), 0);
        assert_eq!(intensity_level(1), 1);
        assert_eq!(intensity_level(3599), 1);
        assert_eq!(intensity_level(3600), 2);
        assert_eq!(intensity_level(10799), 2);
        assert_eq!(intensity_level(10800), 3);
        assert_eq!(intensity_level(21599), 3);
        assert_eq!(intensity_level(21600), 4);
        assert_eq!(intensity_level(100_000), 4);
    }

    #[test]
    fn test_month_heatmap_covers_every_day() {
        let d = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();
        let mut a = Activity::new("cat-1", "", 0, 2 * 3600 * 1000);
        a.date = d;

        let days = month_heatmap(&[a], 2024, 2);
        assert_eq!(days.len(), 29); // 2024 is a leap year
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(days[9].level, 2);
        assert_eq!(days[0].level, 0);
    }

    #[test]
    fn test_month_heatmap_invalid_month_is_empty() {
        assert!(month_heatmap(&[], 2024, 13).is_empty());
    }
}

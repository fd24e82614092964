//! Formatting helpers shared across frontends.

use chrono::NaiveDate;

use crate::types::TimeUnit;

/// Format a duration in seconds according to the user's display unit.
///
/// Total for any non-negative input; no locale handling.
pub fn format_duration(secs: i64, unit: TimeUnit) -> String {
    match unit {
        TimeUnit::Seconds => {
            if secs < 60 {
                format!("{}s", secs)
            } else if secs < 3600 {
                format!("{}m {}s", secs / 60, secs % 60)
            } else {
                let h = secs / 3600;
                let m = (secs % 3600) / 60;
                if m > 0 {
                    format!("{}h {}m", h, m)
                } else {
                    format!("{}h", h)
                }
            }
        }
        TimeUnit::Minutes => {
            let mins = (secs as f64 / 60.0).round() as i64;
            if mins == 0 {
                "0m".to_string()
            } else if mins < 60 {
                format!("{}m", mins)
            } else {
                let h = mins / 60;
                let m = mins % 60;
                if m > 0 {
                    format!("{}h {}m", h, m)
                } else {
                    format!("{}h", h)
                }
            }
        }
        TimeUnit::Hours => format!("{:.2}h", secs as f64 / 3600.0),
    }
}

/// Format elapsed seconds as a `HH:MM:SS` clock for the running timer.
pub fn format_clock(secs: i64) -> String {
    let secs = secs.max(0);
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

/// Format a date for history display: "Today", "Yesterday", or "Mon, Jan 05".
pub fn display_date(date: NaiveDate, today: NaiveDate) -> String {
    let diff = (today - date).num_days();
    match diff {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        _ => date.format("%a, %b %d").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_seconds_unit() {
        assert_eq!(format_duration(0, TimeUnit::Seconds), "0s");
        assert_eq!(format_duration(59, TimeUnit::Seconds), "59s");
        assert_eq!(format_duration(90, TimeUnit::Seconds), "1m 30s");
        assert_eq!(format_duration(120, TimeUnit::Seconds), "2m 0s");
        assert_eq!(format_duration(3600, TimeUnit::Seconds), "1h");
        assert_eq!(format_duration(3660, TimeUnit::Seconds), "1h 1m");
    }

    #[test]
    fn test_format_minutes_unit() {
        assert_eq!(format_duration(0, TimeUnit::Minutes), "0m");
        assert_eq!(format_duration(29, TimeUnit::Minutes), "0m");
        assert_eq!(format_duration(30, TimeUnit::Minutes), "1m");
        assert_eq!(format_duration(90, TimeUnit::Minutes), "2m");
        assert_eq!(format_duration(5400, TimeUnit::Minutes), "1h 30m");
        assert_eq!(format_duration(3600, TimeUnit::Minutes), "1h");
    }

    #[test]
    fn test_format_hours_unit() {
        assert_eq!(format_duration(7200, TimeUnit::Hours), "2.00h");
        assert_eq!(format_duration(5400, TimeUnit::Hours), "1.50h");
        assert_eq!(format_duration(0, TimeUnit::Hours), "0.00h");
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "00:00:00");
        assert_eq!(format_clock(61), "00:01:01");
        assert_eq!(format_clock(3723), "01:02:03");
        // Negative elapsed (clock skew) renders as zero rather than garbage
        assert_eq!(format_clock(-5), "00:00:00");
    }

    #[test]
    fn test_display_date() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        assert_eq!(display_date(today, today), "Today");
        assert_eq!(
            display_date(NaiveDate::from_ymd_opt(2024, 1, 9).unwrap(), today),
            "Yesterday"
        );
        assert_eq!(
            display_date(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(), today),
            "Fri, Jan 05"
        );
    }
}

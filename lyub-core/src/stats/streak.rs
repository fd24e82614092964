//! Consecutive-day streak calculation.

use std::collections::HashSet;

use chrono::{Days, NaiveDate};

use crate::types::Activity;

/// Count consecutive calendar days with at least one logged activity, walking
/// backward from `today`.
///
/// The method is lenient only for "haven't logged today yet": a streak may
/// start at yesterday, but any earlier gap breaks it. If neither today nor
/// yesterday has activity, the streak is 0. Terminates after at most one step
/// per distinct logged date.
pub fn streak(activities: &[Activity], today: NaiveDate) -> u32 {
    if activities.is_empty() {
        return 0;
    }

    let dates: HashSet<NaiveDate> = activities.iter().map(|a| a.date).collect();
    let yesterday = today - Days::new(1);

    if !dates.contains(&today) && !dates.contains(&yesterday) {
        return 0;
    }

    let mut current = if dates.contains(&today) { today } else { yesterday };
    let mut count = 0;
    while dates.contains(&current) {
        count += 1;
        current = current - Days::new(1);
    }
    count
}

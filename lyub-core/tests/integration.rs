//! Integration tests for the lyub storage layer
//!
//! These exercise the SQLite repository end to end: migrations, seeding,
//! the timer lifecycle, weak category references, and range queries feeding
//! the statistics engine.

use chrono::{Days, Local, NaiveDate, TimeZone};
use lyub_core::db::Database;
use lyub_core::stats::{self, DateRange, Period};
use lyub_core::types::{Activity, Category, CategoryType, TimeUnit};
use tempfile::TempDir;

fn open_db(dir: &TempDir) -> Database {
    let path = dir.path().join("data.db");
    let db = Database::open(&path).expect("open database");
    db.migrate().expect("run migrations");
    db
}

/// Noon local time on a date, as Unix milliseconds. Noon avoids DST
/// transition ambiguity.
fn noon_ms(date: NaiveDate) -> i64 {
    Local
        .from_local_datetime(&date.and_hms_opt(12, 0, 0).unwrap())
        .single()
        .expect("noon is unambiguous")
        .timestamp_millis()
}

/// An activity of `secs` seconds starting at noon on `date`.
fn activity_on(date: NaiveDate, category_id: &str, secs: i64) -> Activity {
    let start = noon_ms(date);
    Activity::new(category_id, "", start, start + secs * 1000)
}

#[test]
fn test_open_migrate_seed() {
    let dir = TempDir::new().unwrap();
    let db = open_db(&dir);

    assert!(db.seed_default_categories().unwrap());
    // Seeding is a first-run-only operation
    assert!(!db.seed_default_categories().unwrap());

    let categories = db.list_categories().unwrap();
    assert_eq!(categories.len(), 6);
    for kind in CategoryType::ALL {
        assert!(categories.iter().any(|c| c.kind == kind));
    }
}

#[test]
fn test_category_crud() {
    let dir = TempDir::new().unwrap();
    let db = open_db(&dir);

    let category = Category::new("Deep Work", CategoryType::Creative, None);
    db.insert_category(&category).unwrap();

    let loaded = db.get_category(&category.id).unwrap().unwrap();
    assert_eq!(loaded.name, "Deep Work");
    assert_eq!(loaded.kind, CategoryType::Creative);
    assert_eq!(loaded.color, CategoryType::Creative.default_color());

    db.delete_category(&category.id).unwrap();
    assert!(db.get_category(&category.id).unwrap().is_none());

    // Deleting again reports the missing id
    assert!(db.delete_category(&category.id).is_err());
}

#[test]
fn test_timer_lifecycle() {
    let dir = TempDir::new().unwrap();
    let db = open_db(&dir);
    db.seed_default_categories().unwrap();

    let start = Local::now().timestamp_millis();

    // Unknown category refused
    assert!(db.start_timer("nope", "", start).is_err());

    db.start_timer("cat-1", "drafting", start).unwrap();
    assert!(db.timer().unwrap().is_some());

    // Only one timer at a time
    assert!(db.start_timer("cat-2", "", start).is_err());

    let activity = db.stop_timer(start + 90_000).unwrap();
    assert_eq!(activity.category_id, "cat-1");
    assert_eq!(activity.description, "drafting");
    assert_eq!(activity.duration_secs(), 90);
    assert!(db.timer().unwrap().is_none());

    // The activity was appended to the log
    let log = db.list_activities().unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].id, activity.id);

    // Stopping with no timer running is an error
    assert!(db.stop_timer(start).is_err());
}

#[test]
fn test_cancel_timer_records_nothing() {
    let dir = TempDir::new().unwrap();
    let db = open_db(&dir);
    db.seed_default_categories().unwrap();

    let start = Local::now().timestamp_millis();
    db.start_timer("cat-1", "", start).unwrap();
    db.cancel_timer().unwrap();

    assert!(db.timer().unwrap().is_none());
    assert!(db.list_activities().unwrap().is_empty());
    assert!(db.cancel_timer().is_err());
}

#[test]
fn test_deleting_category_keeps_activities_and_clears_timer() {
    let dir = TempDir::new().unwrap();
    let db = open_db(&dir);
    db.seed_default_categories().unwrap();

    let today = Local::now().date_naive();
    db.insert_activity(&activity_on(today, "cat-1", 600)).unwrap();

    let start = Local::now().timestamp_millis();
    db.start_timer("cat-1", "", start).unwrap();

    db.delete_category("cat-1").unwrap();

    // Weak reference: the activity survives with a dangling id
    let log = db.list_activities().unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].category_id, "cat-1");

    // The running timer pointed at the deleted category, so it was cleared
    assert!(db.timer().unwrap().is_none());

    // Dangling ids drop out of type totals but keep a category bucket
    let categories = db.list_categories().unwrap();
    let by_type = stats::totals_by_type(&log, &categories);
    assert!(by_type.iter().all(|(_, secs)| *secs == 0));
    let by_category = stats::totals_by_category(&log);
    assert_eq!(by_category, vec![("cat-1".to_string(), 600)]);
}

#[test]
fn test_range_query_feeds_period_summary() {
    let dir = TempDir::new().unwrap();
    let db = open_db(&dir);
    db.seed_default_categories().unwrap();

    let today = Local::now().date_naive();
    db.insert_activity(&activity_on(today, "cat-1", 3600)).unwrap();
    db.insert_activity(&activity_on(today, "cat-5", 1800)).unwrap();
    db.insert_activity(&activity_on(today - Days::new(40), "cat-1", 9999))
        .unwrap();

    let range = Period::Today.range(today);
    let in_range = db.activities_in_range(&range).unwrap();
    assert_eq!(in_range.len(), 2);

    let categories = db.list_categories().unwrap();
    let summary = stats::summarize(&in_range, &categories, Period::Today, today);
    assert_eq!(summary.total_secs, 5400);

    let creative = summary
        .by_type
        .iter()
        .find(|(k, _)| *k == CategoryType::Creative)
        .unwrap()
        .1;
    assert_eq!(creative, 3600);
}

#[test]
fn test_activities_round_trip_through_storage() {
    let dir = TempDir::new().unwrap();
    let db = open_db(&dir);

    let date = Local::now().date_naive() - Days::new(3);
    let original = activity_on(date, "cat-2", 125);
    db.insert_activity(&original).unwrap();

    let loaded = &db
        .activities_in_range(&DateRange {
            start: date,
            end: date,
        })
        .unwrap()[0];
    assert_eq!(loaded.id, original.id);
    assert_eq!(loaded.date, original.date);
    assert_eq!(loaded.start_ms, original.start_ms);
    assert_eq!(loaded.duration_secs(), 125);

    assert!(db.delete_activity(&original.id).unwrap());
    assert!(!db.delete_activity(&original.id).unwrap());
}

#[test]
fn test_time_unit_preference_persists() {
    let dir = TempDir::new().unwrap();
    let db = open_db(&dir);

    // Unset falls back to the given default
    assert_eq!(db.time_unit(TimeUnit::Minutes).unwrap(), TimeUnit::Minutes);

    db.set_time_unit(TimeUnit::Hours).unwrap();
    assert_eq!(db.time_unit(TimeUnit::Minutes).unwrap(), TimeUnit::Hours);
}

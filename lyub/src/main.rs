//! lyub - Lyubishchev-style personal time tracker
//!
//! Start and stop a timer against a category; the accumulated log is
//! summarized into daily/weekly/monthly statistics and a calendar heatmap.

mod output;

use anyhow::{bail, Context, Result};
use chrono::{Datelike, Local, NaiveDate, TimeZone};
use clap::{Parser, Subcommand};
use lyub_core::format::{display_date, format_clock, format_duration};
use lyub_core::stats::{self, Period};
use lyub_core::types::{Category, CategoryType, TimeUnit};
use lyub_core::{Config, Database};

use crate::output::{
    calendar_rows, category_name, format_change, level_glyph, percent_bar, type_label,
};

#[derive(Parser)]
#[command(name = "lyub")]
#[command(about = "Lyubishchev-style personal time tracker")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start a timer against a category (by name, name prefix, or id)
    Start {
        category: String,
        /// Optional description for the recorded activity
        description: Option<String>,
    },
    /// Stop the running timer and record the activity
    Stop,
    /// Show the running timer
    Status,
    /// Discard the running timer without recording
    Cancel,
    /// Show the activity history grouped by day, newest first
    Log {
        /// Maximum number of days to show
        #[arg(short, long, default_value_t = 14)]
        limit: usize,
    },
    /// Show statistics for a period
    Stats {
        /// Period to summarize: today, week or month
        #[arg(short, long, default_value = "today")]
        period: String,
        /// Display unit override: seconds, minutes or hours
        #[arg(short, long)]
        unit: Option<String>,
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// Show a month heatmap of tracked time
    Calendar {
        /// Month to show as YYYY-MM (defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
        /// Show a single day's breakdown as YYYY-MM-DD
        #[arg(short, long)]
        day: Option<String>,
        /// Group the day breakdown by "type" or "category"
        #[arg(long, default_value = "type")]
        group_by: String,
    },
    /// Manage categories
    Category {
        #[command(subcommand)]
        action: CategoryCommand,
    },
    /// Persist the display unit preference
    Unit {
        /// seconds, minutes or hours
        unit: String,
    },
}

#[derive(Subcommand)]
enum CategoryCommand {
    /// List categories
    List,
    /// Add a category
    Add {
        name: String,
        /// creative, routine, rest or personal
        #[arg(short, long)]
        kind: String,
        /// Hex color (defaults to the type's color)
        #[arg(short, long)]
        color: Option<String>,
    },
    /// Remove a category (activities keep their log entries)
    Remove { category: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    Config::ensure_xdg_env();

    // Load configuration
    let config = Config::load().context("failed to load configuration")?;

    // Initialize logging
    let _log_guard =
        lyub_core::logging::init(&config.logging).context("failed to initialize logging")?;

    // Open database
    let db_path = Config::database_path();
    tracing::info!(path = %db_path.display(), "Opening database");

    let db = Database::open(&db_path).context("failed to open database")?;
    db.migrate().context("failed to run database migrations")?;
    db.seed_default_categories()
        .context("failed to seed default categories")?;

    let now = Local::now();

    match cli.command {
        Command::Start {
            category,
            description,
        } => cmd_start(&db, &category, description.as_deref().unwrap_or("")),
        Command::Stop => cmd_stop(&db, &config),
        Command::Status => cmd_status(&db),
        Command::Cancel => cmd_cancel(&db),
        Command::Log { limit } => cmd_log(&db, &config, limit, now.date_naive()),
        Command::Stats {
            period,
            unit,
            format,
        } => cmd_stats(
            &db,
            &config,
            &period,
            unit.as_deref(),
            &format,
            now.date_naive(),
        ),
        Command::Calendar {
            month,
            day,
            group_by,
        } => cmd_calendar(&db, &config, month.as_deref(), day.as_deref(), &group_by, now.date_naive()),
        Command::Category { action } => cmd_category(&db, action),
        Command::Unit { unit } => cmd_unit(&db, &unit),
    }
}

/// Resolve a category argument by id, exact name, or unique name prefix.
fn resolve_category(categories: &[Category], query: &str) -> Result<Category> {
    if let Some(category) = categories.iter().find(|c| c.id == query) {
        return Ok(category.clone());
    }

    let lowered = query.to_lowercase();
    if let Some(category) = categories
        .iter()
        .find(|c| c.name.to_lowercase() == lowered)
    {
        return Ok(category.clone());
    }

    let matches: Vec<_> = categories
        .iter()
        .filter(|c| c.name.to_lowercase().starts_with(&lowered))
        .collect();
    match matches.as_slice() {
        [one] => Ok((*one).clone()),
        [] => bail!(
            "no category matches '{}'; run 'lyub category list'",
            query
        ),
        many => bail!(
            "'{}' is ambiguous: {}",
            query,
            many.iter()
                .map(|c| c.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}

fn display_unit(db: &Database, config: &Config, override_unit: Option<&str>) -> Result<TimeUnit> {
    if let Some(raw) = override_unit {
        return raw
            .parse::<TimeUnit>()
            .map_err(|e| anyhow::anyhow!(e));
    }
    Ok(db.time_unit(config.tracker.default_unit)?)
}

fn cmd_start(db: &Database, category: &str, description: &str) -> Result<()> {
    let categories = db.list_categories()?;
    let category = resolve_category(&categories, category)?;

    let state = db
        .start_timer(&category.id, description, Local::now().timestamp_millis())
        .context("failed to start timer")?;

    println!("Started '{}' ({})", category.name, category.kind.label());
    if !state.description.is_empty() {
        println!("  {}", state.description);
    }
    Ok(())
}

fn cmd_stop(db: &Database, config: &Config) -> Result<()> {
    let activity = db
        .stop_timer(Local::now().timestamp_millis())
        .context("failed to stop timer")?;

    let categories = db.list_categories()?;
    let unit = db.time_unit(config.tracker.default_unit)?;
    println!(
        "Recorded {} on '{}'",
        format_duration(activity.duration_secs(), unit),
        category_name(&categories, &activity.category_id),
    );
    Ok(())
}

fn cmd_status(db: &Database) -> Result<()> {
    match db.timer()? {
        Some(state) => {
            let categories = db.list_categories()?;
            let elapsed = state.elapsed_secs(Local::now().timestamp_millis());
            println!(
                "{}  {}",
                format_clock(elapsed),
                category_name(&categories, &state.category_id),
            );
            if !state.description.is_empty() {
                println!("  {}", state.description);
            }
        }
        None => println!("No timer running. Start one with 'lyub start <category>'."),
    }
    Ok(())
}

fn cmd_cancel(db: &Database) -> Result<()> {
    let state = db.cancel_timer().context("failed to cancel timer")?;
    let categories = db.list_categories()?;
    println!(
        "Discarded timer on '{}'",
        category_name(&categories, &state.category_id)
    );
    Ok(())
}

fn cmd_log(db: &Database, config: &Config, limit: usize, today: NaiveDate) -> Result<()> {
    let activities = db.list_activities()?;
    if activities.is_empty() {
        println!("No activities yet. Start the timer to track your time!");
        return Ok(());
    }

    let categories = db.list_categories()?;
    let unit = db.time_unit(config.tracker.default_unit)?;

    let mut days = stats::totals_by_day(&activities);
    days.sort_by(|a, b| b.date.cmp(&a.date));

    for day in days.iter().take(limit) {
        println!(
            "{}  (total {})",
            display_date(day.date, today),
            format_duration(day.total_secs, unit)
        );

        let mut day_activities: Vec<_> =
            activities.iter().filter(|a| a.date == day.date).collect();
        day_activities.sort_by_key(|a| a.start_ms);

        for activity in day_activities {
            let start = Local.timestamp_millis_opt(activity.start_ms).single();
            let end = Local.timestamp_millis_opt(activity.end_ms).single();
            let span = match (start, end) {
                (Some(s), Some(e)) => {
                    format!("{} - {}", s.format("%H:%M"), e.format("%H:%M"))
                }
                _ => "??:?? - ??:??".to_string(),
            };
            let name = category_name(&categories, &activity.category_id);
            if activity.description.is_empty() {
                println!(
                    "  {}  {:<12} {}",
                    span,
                    name,
                    format_duration(activity.duration_secs(), unit)
                );
            } else {
                println!(
                    "  {}  {:<12} {}  {}",
                    span,
                    name,
                    format_duration(activity.duration_secs(), unit),
                    activity.description
                );
            }
        }
        println!();
    }
    Ok(())
}

fn cmd_stats(
    db: &Database,
    config: &Config,
    period: &str,
    unit: Option<&str>,
    format: &str,
    today: NaiveDate,
) -> Result<()> {
    let period: Period = period.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    let unit = display_unit(db, config, unit)?;

    let activities = db.list_activities()?;
    let categories = db.list_categories()?;

    let summary = stats::summarize(&activities, &categories, period, today);
    let streak = stats::streak(&activities, today);

    match format {
        "text" => {}
        "json" => {
            let payload = serde_json::json!({
                "summary": summary,
                "streak": streak,
            });
            println!("{}", serde_json::to_string_pretty(&payload)?);
            return Ok(());
        }
        other => bail!("unknown format '{}', expected 'text' or 'json'", other),
    }

    println!(
        "{} ({} - {})",
        period.label(),
        summary.range.start,
        summary.range.end
    );
    println!(
        "Total: {}   ({} vs previous {})   Streak: {} day{}",
        format_duration(summary.total_secs, unit),
        format_change(summary.change_pct),
        period.as_str(),
        streak,
        if streak == 1 { "" } else { "s" },
    );

    if summary.total_secs == 0 {
        println!("\nNo activities recorded in this period.");
        return Ok(());
    }

    println!("\nBy type:");
    for (kind, secs) in &summary.by_type {
        let pct = stats::percent_of_total(*secs, summary.total_secs);
        println!(
            "  {:<10} {:>8}  {}  {:>5.1}%",
            type_label(*kind),
            format_duration(*secs, unit),
            percent_bar(pct, 20),
            pct
        );
    }

    println!("\nBy category:");
    let mut by_category = summary.by_category.clone();
    by_category.sort_by(|a, b| b.1.cmp(&a.1));
    for (id, secs) in &by_category {
        let pct = stats::percent_of_total(*secs, summary.total_secs);
        println!(
            "  {:<12} {:>8}  {:>5.1}%",
            category_name(&categories, id),
            format_duration(*secs, unit),
            pct
        );
    }

    println!("\nLast 7 days:");
    let trend = stats::daily_trend(&activities, today);
    let max_total = trend.iter().map(|p| p.total_secs).max().unwrap_or(0);
    for point in &trend {
        let height = stats::bar_height(point.total_secs, max_total);
        println!(
            "  {}  {:<20}  {}",
            point.date.format("%a"),
            "#".repeat((height as usize * 20 + 99) / 100),
            format_duration(point.total_secs, unit)
        );
    }
    Ok(())
}

fn cmd_calendar(
    db: &Database,
    config: &Config,
    month: Option<&str>,
    day: Option<&str>,
    group_by: &str,
    today: NaiveDate,
) -> Result<()> {
    let activities = db.list_activities()?;
    let categories = db.list_categories()?;
    let unit = db.time_unit(config.tracker.default_unit)?;

    if let Some(day) = day {
        let date = NaiveDate::parse_from_str(day, "%Y-%m-%d")
            .with_context(|| format!("invalid date '{}', expected YYYY-MM-DD", day))?;
        return day_detail(&activities, &categories, date, group_by, unit, today);
    }

    let (year, month) = match month {
        Some(raw) => {
            let date = NaiveDate::parse_from_str(&format!("{}-01", raw), "%Y-%m-%d")
                .with_context(|| format!("invalid month '{}', expected YYYY-MM", raw))?;
            (date.year(), date.month())
        }
        None => (today.year(), today.month()),
    };

    let days = stats::month_heatmap(&activities, year, month);
    if days.is_empty() {
        bail!("invalid month: {}-{:02}", year, month);
    }

    println!("{}-{:02}", year, month);
    println!(" Mo Tu We Th Fr Sa Su");
    for row in calendar_rows(&days) {
        println!("{}", row);
    }
    println!(
        "\n {} 0   {} <1h   {} 1-3h   {} 3-6h   {} 6h+",
        level_glyph(0),
        level_glyph(1),
        level_glyph(2),
        level_glyph(3),
        level_glyph(4)
    );
    Ok(())
}

fn day_detail(
    activities: &[lyub_core::types::Activity],
    categories: &[Category],
    date: NaiveDate,
    group_by: &str,
    unit: TimeUnit,
    today: NaiveDate,
) -> Result<()> {
    let day_activities: Vec<_> = activities.iter().filter(|a| a.date == date).collect();
    let total = stats::total_secs(day_activities.iter().copied());

    println!("{} ({})", display_date(date, today), date);
    if day_activities.is_empty() {
        println!("No activities recorded.");
        return Ok(());
    }
    println!("Total: {}", format_duration(total, unit));

    match group_by {
        "type" => {
            for (kind, secs) in
                stats::totals_by_type(day_activities.iter().copied(), categories)
            {
                if secs == 0 {
                    continue;
                }
                let pct = stats::percent_of_total(secs, total);
                println!(
                    "  {:<10} {:>8}  {:>5.1}%",
                    type_label(kind),
                    format_duration(secs, unit),
                    pct
                );
            }
        }
        "category" => {
            let mut by_category =
                stats::totals_by_category(day_activities.iter().copied());
            by_category.sort_by(|a, b| b.1.cmp(&a.1));
            for (id, secs) in by_category {
                let pct = stats::percent_of_total(secs, total);
                println!(
                    "  {:<12} {:>8}  {:>5.1}%",
                    category_name(categories, &id),
                    format_duration(secs, unit),
                    pct
                );
            }
        }
        other => bail!("unknown group-by '{}', expected 'type' or 'category'", other),
    }
    Ok(())
}

fn cmd_category(db: &Database, action: CategoryCommand) -> Result<()> {
    match action {
        CategoryCommand::List => {
            for category in db.list_categories()? {
                println!(
                    "{:<12} {:<10} {}  {}",
                    category.name,
                    category.kind.label(),
                    category.color,
                    category.id
                );
            }
        }
        CategoryCommand::Add { name, kind, color } => {
            let kind: CategoryType = kind.parse().map_err(|e: String| anyhow::anyhow!(e))?;
            let category = Category::new(name, kind, color);
            db.insert_category(&category)
                .context("failed to add category")?;
            println!("Added '{}' ({})", category.name, category.kind.label());
        }
        CategoryCommand::Remove { category } => {
            let categories = db.list_categories()?;
            let category = resolve_category(&categories, &category)?;
            db.delete_category(&category.id)
                .context("failed to remove category")?;
            println!(
                "Removed '{}'. Recorded activities keep their log entries.",
                category.name
            );
        }
    }
    Ok(())
}

fn cmd_unit(db: &Database, unit: &str) -> Result<()> {
    let unit: TimeUnit = unit.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    db.set_time_unit(unit)?;
    println!("Display unit set to {}", unit);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lyub_core::types::default_categories;

    #[test]
    fn test_resolve_category_by_id_name_and_prefix() {
        let categories = default_categories();
        assert_eq!(resolve_category(&categories, "cat-3").unwrap().name, "Reading");
        assert_eq!(resolve_category(&categories, "writing").unwrap().id, "cat-1");
        assert_eq!(resolve_category(&categories, "Wri").unwrap().id, "cat-1");
    }

    #[test]
    fn test_resolve_category_rejects_ambiguity_and_misses() {
        let categories = default_categories();
        // "Re" matches Research, Reading and Rest
        assert!(resolve_category(&categories, "Re").is_err());
        assert!(resolve_category(&categories, "nothing").is_err());
    }
}

//! Plain-text rendering helpers for the CLI.

use lyub_core::stats::HeatmapDay;
use lyub_core::types::{Category, CategoryType};

/// Horizontal percentage bar, e.g. `#########-----------`.
pub fn percent_bar(pct: f64, width: usize) -> String {
    let filled = (pct / 100.0 * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("{}{}", "#".repeat(filled), "-".repeat(width - filled))
}

/// Glyph for a calendar intensity level 0-4.
pub fn level_glyph(level: u8) -> char {
    match level {
        0 => '.',
        1 => '░',
        2 => '▒',
        3 => '▓',
        _ => '█',
    }
}

/// Display name for a category id, tolerating dangling references.
pub fn category_name<'a>(categories: &'a [Category], id: &'a str) -> &'a str {
    categories
        .iter()
        .find(|c| c.id == id)
        .map(|c| c.name.as_str())
        .unwrap_or("(deleted)")
}

/// Label used in by-type breakdowns.
pub fn type_label(kind: CategoryType) -> &'static str {
    kind.label()
}

/// Signed percent-change suffix, e.g. `+50%` or `-12%`.
pub fn format_change(change_pct: i64) -> String {
    if change_pct >= 0 {
        format!("+{}%", change_pct)
    } else {
        format!("{}%", change_pct)
    }
}

/// Lay a month of heatmap days out as Mon-Sun rows of glyphs.
pub fn calendar_rows(days: &[HeatmapDay]) -> Vec<String> {
    use chrono::Datelike;

    let mut rows = Vec::new();
    let mut row = String::new();

    if let Some(first) = days.first() {
        for _ in 0..first.date.weekday().num_days_from_monday() {
            row.push_str("   ");
        }
    }

    for day in days {
        row.push(' ');
        row.push(level_glyph(day.level));
        row.push(' ');
        if day.date.weekday() == chrono::Weekday::Sun {
            rows.push(std::mem::take(&mut row));
        }
    }
    if !row.trim().is_empty() {
        rows.push(row);
    }
    rows
}

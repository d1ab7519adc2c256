//! Plain-text digest of an aggregation result, for notifiers and terminals.

use std::collections::HashMap;
use std::fmt::Write;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::model::{ScheduleAggregationResult, ScheduleItem};

/// Render `result` as text with times shown in `tz`.
///
/// Conflicts and suggestions are labelled with the title of the matching
/// agenda item. Suggestions ignore the filter, so a task hidden from the
/// agenda is labelled with its id instead.
///
/// ```text
/// Agenda
///   09:00-10:00  Dentist
///   all day      School holiday
///   --:--        Buy milk
///
/// Conflicts
///   Dentist <> Standup (30 min)
///
/// Suggestions
///   Taxes: 09:00-10:00
/// ```
pub fn render_summary(result: &ScheduleAggregationResult, tz: Tz) -> String {
    if result.is_empty() {
        return "Nothing scheduled.\n".to_string();
    }

    let titles: HashMap<&str, &str> = result
        .items
        .iter()
        .map(|item| (item.id.as_str(), item.title.as_str()))
        .collect();
    let title_of = |id: &str| titles.get(id).copied().unwrap_or(id).to_string();

    let mut out = String::new();

    out.push_str("Agenda\n");
    if result.items.is_empty() {
        out.push_str("  (no items)\n");
    }
    for item in &result.items {
        let _ = writeln!(out, "  {:<11}  {}", item_time(item, tz), item.title);
    }

    if !result.conflicts.is_empty() {
        out.push_str("\nConflicts\n");
        for conflict in &result.conflicts {
            let _ = writeln!(
                out,
                "  {} <> {} ({} min)",
                title_of(&conflict.first_id),
                title_of(&conflict.second_id),
                conflict.overlap_minutes
            );
        }
    }

    if !result.suggestions.is_empty() {
        out.push_str("\nSuggestions\n");
        for suggestion in &result.suggestions {
            let _ = writeln!(
                out,
                "  {}: {}",
                title_of(&suggestion.task_id),
                time_range(suggestion.start, suggestion.end, tz)
            );
        }
    }

    out
}

fn item_time(item: &ScheduleItem, tz: Tz) -> String {
    if item.all_day {
        return "all day".to_string();
    }
    match (item.start, item.end) {
        (Some(start), Some(end)) => time_range(start, end, tz),
        (Some(start), None) => format!("{}", start.with_timezone(&tz).format("%H:%M")),
        _ => "--:--".to_string(),
    }
}

fn time_range(start: DateTime<Utc>, end: DateTime<Utc>, tz: Tz) -> String {
    format!(
        "{}-{}",
        start.with_timezone(&tz).format("%H:%M"),
        end.with_timezone(&tz).format("%H:%M")
    )
}

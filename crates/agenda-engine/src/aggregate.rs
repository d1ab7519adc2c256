//! Build the unified agenda and run the full aggregation pipeline.
//!
//! The pipeline is strictly sequential: normalize → filter → sort → detect
//! conflicts → suggest slots. Each step takes the previous step's output and
//! returns a new value; nothing is mutated in place and nothing is cached.

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;

use crate::config::SuggestionConfig;
use crate::conflict::find_conflicts;
use crate::model::{
    Event, ItemSource, Priority, ScheduleAggregationResult, ScheduleFilter, ScheduleItem, Task,
};
use crate::suggest::suggest;

/// Convert every event and task into a [`ScheduleItem`], events first.
pub fn normalize(events: &[Event], tasks: &[Task]) -> Vec<ScheduleItem> {
    events
        .iter()
        .map(ScheduleItem::from_event)
        .chain(tasks.iter().map(ScheduleItem::from_task))
        .collect()
}

/// Whether `item` passes the person, MUST-only and now-window filters.
pub fn matches_filter(item: &ScheduleItem, filter: &ScheduleFilter, now: DateTime<Utc>) -> bool {
    matches_person(item, filter)
        && matches_must(item, filter)
        && matches_now_window(item, filter, now)
}

fn matches_person(item: &ScheduleItem, filter: &ScheduleFilter) -> bool {
    let Some(person_id) = filter.person_id.as_deref() else {
        return true;
    };
    let named = item.person_ids.contains(person_id);

    // Unassigned events may be shown; a task must always name the person.
    match item.source() {
        ItemSource::Event => filter.include_unassigned_events || named,
        ItemSource::Task => named,
    }
}

fn matches_must(item: &ScheduleItem, filter: &ScheduleFilter) -> bool {
    if !filter.must_only {
        return true;
    }
    match item.source() {
        ItemSource::Event => true,
        ItemSource::Task => item.priority == Some(Priority::Must),
    }
}

fn matches_now_window(item: &ScheduleItem, filter: &ScheduleFilter, now: DateTime<Utc>) -> bool {
    let (Some(window), Some(start)) = (filter.now_window_minutes, item.start) else {
        return true;
    };
    let Some(span) = Duration::try_minutes(window) else {
        // Wider than chrono can represent: every timed item is inside.
        return window > 0;
    };
    // A bound past the representable range leaves that side open.
    let after_lower = now.checked_sub_signed(span).is_none_or(|lower| start >= lower);
    let before_upper = now.checked_add_signed(span).is_none_or(|upper| start <= upper);
    after_lower && before_upper
}

/// Order items for display: timed items by start, then untimed items by
/// priority rank and case-insensitive title. Both sorts are stable.
pub fn sort_items(items: Vec<ScheduleItem>) -> Vec<ScheduleItem> {
    let (mut timed, mut untimed): (Vec<_>, Vec<_>) =
        items.into_iter().partition(|item| item.start.is_some());

    timed.sort_by_key(|item| item.start);
    untimed.sort_by_cached_key(|item| {
        (Priority::rank_of(item.priority), item.title.to_lowercase())
    });

    timed.extend(untimed);
    timed
}

/// Normalize, filter and sort events and tasks into the visible agenda.
pub fn build_agenda(
    events: &[Event],
    tasks: &[Task],
    filter: &ScheduleFilter,
    now: DateTime<Utc>,
) -> Vec<ScheduleItem> {
    let visible: Vec<ScheduleItem> = normalize(events, tasks)
        .into_iter()
        .filter(|item| matches_filter(item, filter, now))
        .collect();

    sort_items(visible)
}

/// Aggregate a snapshot of events and tasks into an agenda, its conflicts and
/// slot suggestions for flexible tasks, using the default suggestion config
/// with the given daily load cap.
///
/// The result depends only on the arguments: the same inputs always produce
/// the same result.
///
/// # Arguments
///
/// * `events` — Concrete event instances (recurrence already expanded).
/// * `tasks` — All tasks, scheduled or not.
/// * `filter` — Restricts which items appear in the agenda. Suggestions ignore it.
/// * `now` — The current instant; never read from the system clock.
/// * `tz` — Time zone that defines "today" and the local slot grid.
/// * `daily_load_cap` — Max MUST/SHOULD placements per day ([`crate::config::DEFAULT_DAILY_LOAD_CAP`]).
pub fn aggregate(
    events: &[Event],
    tasks: &[Task],
    filter: &ScheduleFilter,
    now: DateTime<Utc>,
    tz: Tz,
    daily_load_cap: u32,
) -> ScheduleAggregationResult {
    let config = SuggestionConfig::with_daily_load_cap(daily_load_cap);
    aggregate_with_config(events, tasks, filter, now, tz, &config)
}

/// Same as [`aggregate`] with an explicit [`SuggestionConfig`].
pub fn aggregate_with_config(
    events: &[Event],
    tasks: &[Task],
    filter: &ScheduleFilter,
    now: DateTime<Utc>,
    tz: Tz,
    config: &SuggestionConfig,
) -> ScheduleAggregationResult {
    let items = build_agenda(events, tasks, filter, now);
    let conflicts = find_conflicts(&items);
    // Suggestions look at the unfiltered snapshot: a hidden event still blocks time.
    let suggestions = suggest(events, tasks, now, tz, config);

    tracing::debug!(
        events = events.len(),
        tasks = tasks.len(),
        items = items.len(),
        conflicts = conflicts.len(),
        suggestions = suggestions.len(),
        "aggregation finished"
    );

    ScheduleAggregationResult {
        items,
        conflicts,
        suggestions,
    }
}

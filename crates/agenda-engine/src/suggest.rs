//! Slot suggestions for flexible tasks.
//!
//! For every open task without a scheduled start, a grid of candidate slots
//! is laid over today's local day window (07:00–20:00 by default, every 30
//! minutes). Each slot gets a cost from four terms:
//!
//! - **energy**: distance from the anchor minute for the task's energy level
//! - **routine**: distance from the anchor minute for the task's priority
//! - **due**: a flat penalty once the slot starts at or after the due instant,
//!   otherwise the remaining lead time in `due_divisor_minutes` units
//! - **conflict**: a large penalty per busy interval the slot overlaps
//!
//! Conflict-free slots are preferred whenever any exist, and the cheapest
//! `suggestions_per_task` are kept. MUST and SHOULD tasks stop receiving
//! suggestions once today's load reaches the daily cap.

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;

use crate::config::SuggestionConfig;
use crate::day::{local_date, local_day_bounds, local_instant};
use crate::model::{Event, Priority, ScheduleSuggestion, Task};

/// A `[start, end)` interval that is already taken today.
pub type BusyInterval = (DateTime<Utc>, DateTime<Utc>);

/// Open tasks without a scheduled start, by priority rank then due instant.
/// Tasks without a due instant sort last within their rank.
pub fn candidate_tasks(tasks: &[Task]) -> Vec<&Task> {
    let mut candidates: Vec<&Task> = tasks
        .iter()
        .filter(|task| task.is_open() && task.is_flexible())
        .collect();

    candidates.sort_by_key(|task| (task.priority.rank(), task.due.is_none(), task.due));
    candidates
}

/// Busy intervals for the local day `[day_start, day_end)`: events starting
/// that day and tasks whose scheduled start and end both fall within it.
pub fn busy_intervals(
    events: &[Event],
    tasks: &[Task],
    day_start: DateTime<Utc>,
    day_end: DateTime<Utc>,
) -> Vec<BusyInterval> {
    let in_day = |instant: DateTime<Utc>| instant >= day_start && instant < day_end;

    let event_busy = events
        .iter()
        .filter(|event| in_day(event.start))
        .map(|event| (event.start, event.end));

    let task_busy = tasks.iter().filter_map(|task| {
        let (start, end) = task.scheduled_start.zip(task.scheduled_end)?;
        (in_day(start) && end <= day_end).then_some((start, end))
    });

    event_busy.chain(task_busy).collect()
}

/// Open MUST/SHOULD tasks already scheduled to start within `[day_start, day_end)`.
pub fn committed_load(tasks: &[Task], day_start: DateTime<Utc>, day_end: DateTime<Utc>) -> u32 {
    let count = tasks
        .iter()
        .filter(|task| task.is_open() && task.priority.counts_toward_load())
        .filter(|task| {
            task.scheduled_start
                .is_some_and(|start| start >= day_start && start < day_end)
        })
        .count();
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// Cost of placing `task` at `[start, end)`, where `offset_minutes` is the
/// slot's distance from the day-window start. Lower is better.
pub fn slot_cost(
    task: &Task,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    offset_minutes: i64,
    busy: &[BusyInterval],
    config: &SuggestionConfig,
) -> i64 {
    let energy_anchor = config.energy_anchors.for_energy(task.energy);
    let routine_anchor = config.routine_anchors.for_priority(task.priority);

    // Weights come from caller config, so the sum saturates instead of wrapping.
    let energy_penalty =
        distance(offset_minutes, energy_anchor).saturating_mul(config.energy_weight);
    let routine_penalty =
        distance(offset_minutes, routine_anchor).saturating_mul(config.routine_weight);
    let due_penalty = due_penalty(task.due, start, config);
    let conflict_penalty = overlap_count(start, end, busy).saturating_mul(config.conflict_penalty);

    energy_penalty
        .saturating_add(routine_penalty)
        .saturating_add(due_penalty)
        .saturating_add(conflict_penalty)
}

fn distance(minute: i64, anchor: i64) -> i64 {
    i64::try_from(minute.abs_diff(anchor)).unwrap_or(i64::MAX)
}

fn due_penalty(due: Option<DateTime<Utc>>, start: DateTime<Utc>, config: &SuggestionConfig) -> i64 {
    match due {
        None => 0,
        Some(due) if due <= start => config.overdue_penalty,
        // Integer division rounds down for the positive lead time.
        Some(due) => (due - start).num_minutes() / config.due_divisor_minutes.max(1),
    }
}

fn overlap_count(start: DateTime<Utc>, end: DateTime<Utc>, busy: &[BusyInterval]) -> i64 {
    let count = busy
        .iter()
        .filter(|(busy_start, busy_end)| start < *busy_end && *busy_start < end)
        .count();
    i64::try_from(count).unwrap_or(i64::MAX)
}

struct Candidate {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    cost: i64,
    conflict_free: bool,
}

/// Suggest slots today for each flexible open task.
///
/// Suggestions are grouped per task in candidate order (priority, then due).
/// A task whose duration does not fit the day window, or a MUST/SHOULD task
/// arriving after the daily cap is reached, gets no suggestions.
pub fn suggest(
    events: &[Event],
    tasks: &[Task],
    now: DateTime<Utc>,
    tz: Tz,
    config: &SuggestionConfig,
) -> Vec<ScheduleSuggestion> {
    let (day_start, day_end) = local_day_bounds(now, tz);
    let today = local_date(now, tz);
    let window_start = local_instant(tz, today, i64::from(config.day_start_hour.min(24)) * 60);
    let window_end = local_instant(tz, today, i64::from(config.day_end_hour.min(24)) * 60);
    // Absolute minutes, so a DST day has a shorter or longer window.
    let window_minutes = (window_end - window_start).num_minutes();

    let busy = busy_intervals(events, tasks, day_start, day_end);
    let mut load = committed_load(tasks, day_start, day_end);
    let step = config.slot_step_minutes.max(1);

    tracing::debug!(
        %today,
        busy = busy.len(),
        committed = load,
        cap = config.daily_load_cap,
        "suggesting slots"
    );

    let mut suggestions = Vec::new();

    for task in candidate_tasks(tasks) {
        if !within_cap(task.priority, load, config) {
            tracing::trace!(task = %task.id, load, "daily load cap reached, skipping task");
            continue;
        }

        // Zero or negative durations become one grid step.
        let minutes = if task.duration_minutes > 0 {
            task.duration_minutes
        } else {
            step
        };

        // The grid is walked in whole minutes; only in-window offsets become instants.
        let mut candidates = Vec::new();
        let mut offset = 0;
        while minutes <= window_minutes - offset {
            let start = window_start + Duration::minutes(offset);
            let end = start + Duration::minutes(minutes);
            candidates.push(Candidate {
                start,
                end,
                cost: slot_cost(task, start, end, offset, &busy, config),
                conflict_free: overlap_count(start, end, &busy) == 0,
            });
            let Some(next) = offset.checked_add(step) else {
                break;
            };
            offset = next;
        }

        if candidates.is_empty() {
            tracing::trace!(
                task = %task.id,
                minutes = task.duration_minutes,
                "task does not fit the day window"
            );
            continue;
        }

        if candidates.iter().any(|c| c.conflict_free) {
            candidates.retain(|c| c.conflict_free);
        }
        // Stable: equal costs keep the earlier slot first.
        candidates.sort_by_key(|c| c.cost);

        let before = suggestions.len();
        suggestions.extend(
            candidates
                .into_iter()
                .take(config.suggestions_per_task)
                .map(|c| ScheduleSuggestion {
                    task_id: task.id.clone(),
                    start: c.start,
                    end: c.end,
                    cost: c.cost,
                }),
        );

        // Alternatives for one task count once toward the cap.
        if suggestions.len() > before && task.priority.counts_toward_load() {
            load += 1;
        }
    }

    suggestions
}

/// Whether a task of `priority` may still be placed with `load` already committed.
/// NICE tasks are never capped.
pub fn within_cap(priority: Priority, load: u32, config: &SuggestionConfig) -> bool {
    !priority.counts_toward_load() || load < config.daily_load_cap
}

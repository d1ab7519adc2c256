//! Detect overlapping items in an agenda.
//!
//! Performs pairwise comparison over the timed items of a single list.
//! Adjacent items (where one ends exactly when another starts) are NOT conflicts.

use crate::model::{ScheduleConflict, ScheduleItem};

/// Find all pairwise conflicts among items that have both a start and an end.
///
/// Two items overlap when `a.start < b.end && b.start < a.end`. Pairs are
/// reported in examination order: for timed items `i < j`, `(i, j)` comes
/// before `(i, j + 1)` and before `(i + 1, _)`. Untimed items are ignored.
pub fn find_conflicts(items: &[ScheduleItem]) -> Vec<ScheduleConflict> {
    let timed: Vec<_> = items
        .iter()
        .filter_map(|item| item.interval().map(|interval| (item, interval)))
        .collect();

    let mut conflicts = Vec::new();

    for (i, (a, (a_start, a_end))) in timed.iter().enumerate() {
        for (b, (b_start, b_end)) in &timed[i + 1..] {
            if a_start < b_end && b_start < a_end {
                let overlap_start = (*a_start).max(*b_start);
                let overlap_end = (*a_end).min(*b_end);

                conflicts.push(ScheduleConflict {
                    first_id: a.id.clone(),
                    second_id: b.id.clone(),
                    overlap_minutes: (overlap_end - overlap_start).num_minutes(),
                });
            }
        }
    }

    tracing::debug!(
        timed = timed.len(),
        conflicts = conflicts.len(),
        "conflict scan finished"
    );

    conflicts
}

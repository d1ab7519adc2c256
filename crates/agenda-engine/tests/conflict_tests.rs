//! Tests for conflict detection over agenda items.

use agenda_engine::{find_conflicts, Event, Priority, ScheduleItem, Task};
use chrono::{TimeZone, Utc};

/// Helper to create an event item from hour/minute ranges on a fixed day.
fn event(id: &str, start_hour: u32, start_min: u32, end_hour: u32, end_min: u32) -> ScheduleItem {
    ScheduleItem::from_event(&Event::new(
        id,
        id,
        Utc.with_ymd_and_hms(2026, 3, 1, start_hour, start_min, 0)
            .unwrap(),
        Utc.with_ymd_and_hms(2026, 3, 1, end_hour, end_min, 0)
            .unwrap(),
    ))
}

fn flexible_task(id: &str) -> ScheduleItem {
    ScheduleItem::from_task(&Task {
        priority: Priority::Must,
        ..Task::new(id, id)
    })
}

#[test]
fn two_overlapping_items_detected() {
    // 09:00-10:00 and 09:30-10:30 → 30-min overlap
    let items = vec![event("a", 9, 0, 10, 0), event("b", 9, 30, 10, 30)];

    let conflicts = find_conflicts(&items);

    assert_eq!(conflicts.len(), 1, "should detect exactly one conflict");
    assert_eq!(conflicts[0].first_id, "a");
    assert_eq!(conflicts[0].second_id, "b");
    assert_eq!(conflicts[0].overlap_minutes, 30);
}

#[test]
fn identical_intervals_conflict_and_touching_boundary_does_not() {
    let items = vec![
        event("a", 10, 0, 11, 0),
        event("b", 10, 0, 11, 0),
        event("c", 11, 0, 12, 0),
    ];

    let conflicts = find_conflicts(&items);

    assert_eq!(conflicts.len(), 1);
    assert!(conflicts[0].involves("a", "b"));
    assert!(!conflicts.iter().any(|c| c.first_id == "c" || c.second_id == "c"));
}

#[test]
fn non_overlapping_items_no_conflict() {
    let items = vec![event("a", 9, 0, 10, 0), event("b", 11, 0, 12, 0)];
    assert!(find_conflicts(&items).is_empty());
}

#[test]
fn fully_contained_item_reports_inner_duration() {
    let items = vec![event("outer", 9, 0, 12, 0), event("inner", 10, 0, 11, 0)];

    let conflicts = find_conflicts(&items);

    assert_eq!(conflicts.len(), 1);
    assert_eq!(
        conflicts[0].overlap_minutes, 60,
        "overlap should be the duration of the contained item"
    );
}

#[test]
fn pairs_are_reported_in_examination_order() {
    let items = vec![
        event("a", 9, 0, 12, 0),
        event("b", 9, 30, 11, 0),
        event("c", 10, 0, 10, 30),
    ];

    let pairs: Vec<(String, String)> = find_conflicts(&items)
        .into_iter()
        .map(|c| (c.first_id, c.second_id))
        .collect();

    assert_eq!(
        pairs,
        vec![
            ("a".to_string(), "b".to_string()),
            ("a".to_string(), "c".to_string()),
            ("b".to_string(), "c".to_string()),
        ]
    );
}

#[test]
fn untimed_items_are_ignored() {
    let items = vec![event("a", 9, 0, 10, 0), flexible_task("t"), event("b", 9, 0, 10, 0)];

    let conflicts = find_conflicts(&items);

    assert_eq!(conflicts.len(), 1);
    assert!(conflicts[0].involves("a", "b"));
}

#[test]
fn empty_list_no_conflicts() {
    assert!(find_conflicts(&[]).is_empty());
}

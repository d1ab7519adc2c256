//! Input and output types for the agenda engine.
//!
//! [`Event`] and [`Task`] are owned by the caller's store and only read here.
//! [`ScheduleItem`] is the unified view of both, and the remaining types make up
//! a [`ScheduleAggregationResult`].

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A concrete calendar event instance (recurrence already expanded by the caller).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default)]
    pub all_day: bool,
    /// People this event affects.
    #[serde(default)]
    pub person_ids: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    #[default]
    Open,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Must,
    #[default]
    Should,
    Nice,
}

impl Priority {
    /// Sort rank: MUST sorts first.
    pub fn rank(self) -> u8 {
        match self {
            Priority::Must => 0,
            Priority::Should => 1,
            Priority::Nice => 2,
        }
    }

    /// Rank for an optional priority; items without one sort after NICE.
    pub fn rank_of(priority: Option<Priority>) -> u8 {
        priority.map_or(3, Priority::rank)
    }

    /// MUST and SHOULD count toward the daily load cap, NICE does not.
    pub fn counts_toward_load(self) -> bool {
        self != Priority::Nice
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Energy {
    Low,
    #[default]
    Medium,
    High,
}

/// A to-do item. Without a `scheduled_start` it is flexible and eligible for
/// slot suggestions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub energy: Energy,
    #[serde(default)]
    pub scheduled_start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub scheduled_end: Option<DateTime<Utc>>,
    #[serde(default)]
    pub due: Option<DateTime<Utc>>,
    #[serde(default = "default_duration_minutes")]
    pub duration_minutes: i64,
    #[serde(default)]
    pub assigned_to_person_id: Option<String>,
    #[serde(default)]
    pub affected_person_ids: Vec<String>,
}

fn default_duration_minutes() -> i64 {
    30
}

impl Task {
    /// An open, unscheduled SHOULD task of medium energy and default duration.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            status: TaskStatus::Open,
            priority: Priority::default(),
            energy: Energy::default(),
            scheduled_start: None,
            scheduled_end: None,
            due: None,
            duration_minutes: default_duration_minutes(),
            assigned_to_person_id: None,
            affected_person_ids: Vec::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.status == TaskStatus::Open
    }

    pub fn is_flexible(&self) -> bool {
        self.scheduled_start.is_none()
    }
}

impl Event {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            start,
            end,
            all_day: false,
            person_ids: Vec::new(),
        }
    }
}

/// Which kind of record a [`ScheduleItem`] was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemSource {
    Event,
    Task,
}

/// Back-reference to the record a [`ScheduleItem`] was built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", content = "original", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemOrigin {
    Event(Event),
    Task(Task),
}

/// An event or task in the unified agenda.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleItem {
    pub id: String,
    pub title: String,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub all_day: bool,
    pub priority: Option<Priority>,
    pub energy: Option<Energy>,
    pub person_ids: BTreeSet<String>,
    /// True only for tasks with no scheduled start.
    pub flexible: bool,
    #[serde(flatten)]
    pub origin: ItemOrigin,
}

impl ScheduleItem {
    pub fn from_event(event: &Event) -> Self {
        Self {
            id: event.id.clone(),
            title: event.title.clone(),
            start: Some(event.start),
            end: Some(event.end),
            all_day: event.all_day,
            priority: None,
            energy: None,
            person_ids: event.person_ids.iter().cloned().collect(),
            flexible: false,
            origin: ItemOrigin::Event(event.clone()),
        }
    }

    pub fn from_task(task: &Task) -> Self {
        let person_ids = task
            .assigned_to_person_id
            .iter()
            .chain(task.affected_person_ids.iter())
            .cloned()
            .collect();

        Self {
            id: task.id.clone(),
            title: task.title.clone(),
            start: task.scheduled_start,
            end: task.scheduled_end,
            all_day: false,
            priority: Some(task.priority),
            energy: Some(task.energy),
            person_ids,
            flexible: task.is_flexible(),
            origin: ItemOrigin::Task(task.clone()),
        }
    }

    pub fn source(&self) -> ItemSource {
        match self.origin {
            ItemOrigin::Event(_) => ItemSource::Event,
            ItemOrigin::Task(_) => ItemSource::Task,
        }
    }

    pub fn original_event(&self) -> Option<&Event> {
        match &self.origin {
            ItemOrigin::Event(event) => Some(event),
            ItemOrigin::Task(_) => None,
        }
    }

    pub fn original_task(&self) -> Option<&Task> {
        match &self.origin {
            ItemOrigin::Task(task) => Some(task),
            ItemOrigin::Event(_) => None,
        }
    }

    /// Start and end, when both are known.
    pub fn interval(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        self.start.zip(self.end)
    }
}

/// Which items the agenda should show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScheduleFilter {
    /// Only show items affecting this person.
    pub person_id: Option<String>,
    /// Hide tasks that are not MUST priority. Events are unaffected.
    pub must_only: bool,
    /// With a `person_id` set, still show events that do not name that person.
    pub include_unassigned_events: bool,
    /// Only show timed items starting within this many minutes of now.
    pub now_window_minutes: Option<i64>,
}

impl Default for ScheduleFilter {
    fn default() -> Self {
        Self {
            person_id: None,
            must_only: false,
            include_unassigned_events: true,
            now_window_minutes: None,
        }
    }
}

/// Two agenda items whose `[start, end)` intervals overlap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleConflict {
    pub first_id: String,
    pub second_id: String,
    pub overlap_minutes: i64,
}

impl ScheduleConflict {
    /// True when this conflict pairs `a` and `b`, in either order.
    pub fn involves(&self, a: &str, b: &str) -> bool {
        (self.first_id == a && self.second_id == b) || (self.first_id == b && self.second_id == a)
    }
}

/// A proposed `[start, end)` placement for a flexible task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSuggestion {
    pub task_id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Slot cost; lower is better.
    pub cost: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleAggregationResult {
    pub items: Vec<ScheduleItem>,
    pub conflicts: Vec<ScheduleConflict>,
    pub suggestions: Vec<ScheduleSuggestion>,
}

impl ScheduleAggregationResult {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.conflicts.is_empty() && self.suggestions.is_empty()
    }
}

//! # agenda-engine
//!
//! Deterministic agenda aggregation for family calendars.
//!
//! Given a snapshot of calendar events and tasks, the engine produces a
//! filtered, ordered agenda, the time overlaps among its timed items, and
//! ranked slot suggestions for tasks that have not been placed yet. It is a
//! pure function of its inputs: no I/O, no system clock, no cached state.
//!
//! ## Modules
//!
//! - [`model`] — Events, tasks, agenda items and result types
//! - [`aggregate`] — Normalize, filter and sort; the [`aggregate`](aggregate::aggregate) entry point
//! - [`conflict`] — Detect overlapping agenda items
//! - [`suggest`] — Score candidate slots for flexible tasks under a daily load cap
//! - [`config`] — Slot grid, weights and anchors for suggestion
//! - [`day`] — Local-day bounds and DST-aware wall-clock resolution
//! - [`request`] — JSON request shape shared by the CLI and WASM bindings
//! - [`summary`] — Plain-text digest of a result
//! - [`error`] — Error types

pub mod aggregate;
pub mod config;
pub mod conflict;
pub mod day;
pub mod error;
pub mod model;
pub mod request;
pub mod suggest;
pub mod summary;

pub use aggregate::{aggregate, aggregate_with_config, build_agenda};
pub use config::{SuggestionConfig, DEFAULT_DAILY_LOAD_CAP};
pub use conflict::find_conflicts;
pub use error::AgendaError;
pub use model::{
    Energy, Event, ItemOrigin, ItemSource, Priority, ScheduleAggregationResult, ScheduleConflict,
    ScheduleFilter, ScheduleItem, ScheduleSuggestion, Task, TaskStatus,
};
pub use request::AggregateRequest;
pub use suggest::suggest;
pub use summary::render_summary;

//! A self-contained aggregation request, as passed across JSON boundaries.
//!
//! The CLI and the WASM bindings both accept this shape:
//!
//! ```json
//! {
//!   "events": [{"id": "e1", "title": "Dentist", "start": "2026-03-16T09:00:00Z", "end": "2026-03-16T10:00:00Z"}],
//!   "tasks": [{"id": "t1", "title": "Taxes", "priority": "MUST", "energy": "HIGH", "durationMinutes": 60}],
//!   "filter": {"personId": "alice"},
//!   "now": "2026-03-16T08:00:00Z",
//!   "timeZone": "Europe/Berlin",
//!   "dailyLoadCap": 3
//! }
//! ```

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::aggregate::aggregate_with_config;
use crate::config::SuggestionConfig;
use crate::error::{AgendaError, Result};
use crate::model::{Event, ScheduleAggregationResult, ScheduleFilter, Task};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateRequest {
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub filter: ScheduleFilter,
    pub now: DateTime<Utc>,
    /// IANA time zone name, e.g. "America/Los_Angeles".
    pub time_zone: String,
    /// Overrides `config.dailyLoadCap` when present.
    #[serde(default)]
    pub daily_load_cap: Option<u32>,
    #[serde(default)]
    pub config: Option<SuggestionConfig>,
}

impl AggregateRequest {
    /// Parse a request from JSON.
    ///
    /// # Errors
    /// Returns `AgendaError::InvalidRequest` if the JSON is malformed or misses
    /// a required field (`now`, `timeZone`).
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| AgendaError::InvalidRequest(e.to_string()))
    }

    /// The request's time zone.
    ///
    /// # Errors
    /// Returns `AgendaError::InvalidTimezone` if the name is not a known IANA zone.
    pub fn time_zone(&self) -> Result<Tz> {
        self.time_zone
            .parse()
            .map_err(|_| AgendaError::InvalidTimezone(self.time_zone.clone()))
    }

    /// The config to run with: the embedded config (or the default), with
    /// `daily_load_cap` applied on top.
    ///
    /// # Errors
    /// Returns `AgendaError::InvalidConfig` if the result fails validation.
    pub fn resolved_config(&self) -> Result<SuggestionConfig> {
        let mut config = self.config.clone().unwrap_or_default();
        if let Some(cap) = self.daily_load_cap {
            config.daily_load_cap = cap;
        }
        config.validate()?;
        Ok(config)
    }

    /// Validate the request and run the aggregation.
    ///
    /// # Errors
    /// Returns `AgendaError::InvalidTimezone` or `AgendaError::InvalidConfig`.
    pub fn run(&self) -> Result<ScheduleAggregationResult> {
        let tz = self.time_zone()?;
        let config = self.resolved_config()?;
        Ok(aggregate_with_config(
            &self.events,
            &self.tasks,
            &self.filter,
            self.now,
            tz,
            &config,
        ))
    }
}

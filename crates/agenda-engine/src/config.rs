//! Tunable parameters for slot suggestion.
//!
//! Every field has a default, and a partial JSON document only overrides the
//! fields it names:
//!
//! ```
//! use agenda_engine::SuggestionConfig;
//!
//! let config: SuggestionConfig = serde_json::from_str(r#"{"dailyLoadCap": 3}"#).unwrap();
//! assert_eq!(config.daily_load_cap, 3);
//! assert_eq!(config.day_start_hour, 7);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{AgendaError, Result};
use crate::model::{Energy, Priority};

/// Default cap on MUST/SHOULD placements per day.
pub const DEFAULT_DAILY_LOAD_CAP: u32 = 5;

/// Target minute (from the day-window start) per energy level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnergyAnchors {
    pub high: i64,
    pub medium: i64,
    pub low: i64,
}

impl Default for EnergyAnchors {
    fn default() -> Self {
        Self {
            high: 120,
            medium: 360,
            low: 540,
        }
    }
}

impl EnergyAnchors {
    pub fn for_energy(&self, energy: Energy) -> i64 {
        match energy {
            Energy::High => self.high,
            Energy::Medium => self.medium,
            Energy::Low => self.low,
        }
    }
}

/// Target minute (from the day-window start) per priority tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoutineAnchors {
    pub must: i64,
    pub should: i64,
    pub nice: i64,
}

impl Default for RoutineAnchors {
    fn default() -> Self {
        Self {
            must: 120,
            should: 300,
            nice: 540,
        }
    }
}

impl RoutineAnchors {
    pub fn for_priority(&self, priority: Priority) -> i64 {
        match priority {
            Priority::Must => self.must,
            Priority::Should => self.should,
            Priority::Nice => self.nice,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SuggestionConfig {
    /// Local hour the candidate grid starts at.
    pub day_start_hour: u32,
    /// Local hour no candidate slot may end after.
    pub day_end_hour: u32,
    pub slot_step_minutes: i64,
    /// Best slots kept per task.
    pub suggestions_per_task: usize,
    /// Max MUST/SHOULD placements per day, counting tasks already scheduled today.
    pub daily_load_cap: u32,
    pub energy_weight: i64,
    pub routine_weight: i64,
    /// Flat cost for a slot that starts at or after the task's due instant.
    pub overdue_penalty: i64,
    pub due_divisor_minutes: i64,
    /// Cost per busy interval the slot overlaps.
    pub conflict_penalty: i64,
    pub energy_anchors: EnergyAnchors,
    pub routine_anchors: RoutineAnchors,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            day_start_hour: 7,
            day_end_hour: 20,
            slot_step_minutes: 30,
            suggestions_per_task: 2,
            daily_load_cap: DEFAULT_DAILY_LOAD_CAP,
            energy_weight: 1,
            routine_weight: 1,
            overdue_penalty: 8000,
            due_divisor_minutes: 30,
            conflict_penalty: 10_000,
            energy_anchors: EnergyAnchors::default(),
            routine_anchors: RoutineAnchors::default(),
        }
    }
}

impl SuggestionConfig {
    /// Default config with a different daily load cap.
    pub fn with_daily_load_cap(daily_load_cap: u32) -> Self {
        Self {
            daily_load_cap,
            ..Self::default()
        }
    }

    /// Reject configs that would make the slot grid meaningless.
    ///
    /// # Errors
    /// Returns `AgendaError::InvalidConfig` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.day_end_hour > 24 {
            return Err(AgendaError::InvalidConfig(format!(
                "dayEndHour must be at most 24, got {}",
                self.day_end_hour
            )));
        }
        if self.day_start_hour >= self.day_end_hour {
            return Err(AgendaError::InvalidConfig(format!(
                "dayStartHour ({}) must be before dayEndHour ({})",
                self.day_start_hour, self.day_end_hour
            )));
        }
        if self.slot_step_minutes <= 0 {
            return Err(AgendaError::InvalidConfig(format!(
                "slotStepMinutes must be positive, got {}",
                self.slot_step_minutes
            )));
        }
        if self.due_divisor_minutes <= 0 {
            return Err(AgendaError::InvalidConfig(format!(
                "dueDivisorMinutes must be positive, got {}",
                self.due_divisor_minutes
            )));
        }
        Ok(())
    }
}

//! Placement of new sessions onto the day's timeline.
//!
//! The scheduler validates user input and delegates placement to the
//! store's chained append. Preset breaks carry fixed parameters and
//! skip text validation.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::schedule::{Priority, Session, SessionCategory, SessionStore};

/// Longest accepted session, in minutes. The timeline covers one day.
pub const MAX_SESSION_MIN: i64 = 24 * 60;

/// Preset break kinds with fixed parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreakKind {
    Water,
    Food,
}

impl BreakKind {
    /// Label shown on the schedule.
    pub fn task_label(&self) -> &'static str {
        match self {
            BreakKind::Water => "Water Break",
            BreakKind::Food => "Food Break",
        }
    }

    /// Fixed duration in minutes.
    pub fn duration_min(&self) -> i64 {
        match self {
            BreakKind::Water => 5,
            BreakKind::Food => 30,
        }
    }
}

/// Validates new activities and appends them to the session store.
#[derive(Debug, Clone)]
pub struct Scheduler {
    store: Arc<SessionStore>,
}

impl Scheduler {
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self { store }
    }

    /// Validate and place a study session at the end of the timeline.
    ///
    /// The task label is trimmed before storage. Fails on a blank label
    /// or a duration outside `1..=MAX_SESSION_MIN`; the store is left
    /// untouched on failure.
    pub fn add_session(
        &self,
        task: &str,
        duration_min: i64,
        priority: Priority,
    ) -> Result<Session, ValidationError> {
        let task = task.trim();
        if task.is_empty() {
            return Err(ValidationError::EmptyField {
                field: "task".into(),
            });
        }
        ValidationError::check_minutes("duration_min", duration_min, MAX_SESSION_MIN)?;
        Ok(self
            .store
            .append_chained(task, duration_min, priority, SessionCategory::Study))
    }

    /// Place a preset break at the end of the timeline.
    ///
    /// Break parameters are fixed and always valid; the `Result` is for
    /// surface symmetry with [`Scheduler::add_session`].
    pub fn add_preset_break(&self, kind: BreakKind) -> Result<Session, ValidationError> {
        Ok(self.store.append_chained(
            kind.task_label(),
            kind.duration_min(),
            Priority::High,
            SessionCategory::Break,
        ))
    }

    /// Where the next session would be placed.
    pub fn calculate_start_time(&self) -> DateTime<Utc> {
        self.store.next_start_time()
    }

    /// Drop the entire schedule.
    pub fn clear_schedule(&self) {
        self.store.clear();
    }
}

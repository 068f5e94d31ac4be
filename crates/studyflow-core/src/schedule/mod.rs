//! Session types for the daily schedule.
//!
//! A [`Session`] is one placed block on the day's timeline. Sessions
//! are built by the scheduling path, held by [`SessionStore`], and
//! handed to callers only as owned copies.

mod store;

pub use store::SessionStore;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Priority of a scheduled session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

/// Category of a scheduled session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionCategory {
    /// Focused study block
    Study,
    /// Rest block (water, food)
    Break,
}

/// One placed activity on the day's timeline.
///
/// Immutable once stored; `end` is always `start + duration_min`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Duration in minutes.
    pub duration_min: i64,
    pub task: String,
    pub priority: Priority,
    pub category: SessionCategory,
}

impl Session {
    /// Build a session starting at `start` and ending `duration_min`
    /// later.
    pub(crate) fn new(
        start: DateTime<Utc>,
        task: String,
        duration_min: i64,
        priority: Priority,
        category: SessionCategory,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            start,
            end: start + Duration::minutes(duration_min),
            duration_min,
            task,
            priority,
            category,
        }
    }

    /// Start time formatted for a schedule table ("HH:MM").
    pub fn time_label(&self) -> String {
        self.start.format("%H:%M").to_string()
    }

    /// Duration formatted for a schedule table.
    pub fn duration_label(&self) -> String {
        format!("{} min", self.duration_min)
    }
}

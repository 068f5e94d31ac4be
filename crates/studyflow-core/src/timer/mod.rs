//! Concurrent countdown timers.
//!
//! ## State Transitions
//!
//! ```text
//! Running -> (Completed | Cancelled)
//! ```
//!
//! A timer is runnable the moment it is created. Both terminal states
//! are final: reaching one removes the timer from the manager's
//! registry.

mod manager;

pub use manager::{TimerManager, MAX_TIMER_MIN};

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a countdown timer.
///
/// Monotonically assigned, stable for the timer's lifetime, never
/// reused.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct TimerId(pub u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a countdown timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Running,
    Completed,
    Cancelled,
}

/// One running or finished countdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timer {
    pub id: TimerId,
    /// Absolute completion deadline.
    pub end_time: DateTime<Utc>,
    /// Requested duration in minutes.
    pub duration_min: i64,
    pub state: TimerState,
}

/// Read snapshot of a running timer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveTimer {
    pub id: TimerId,
    /// Whole seconds until the deadline, never negative.
    pub remaining_seconds: i64,
}

impl ActiveTimer {
    /// Remaining time formatted for display ("MM:SS").
    pub fn remaining_label(&self) -> String {
        format!(
            "{:02}:{:02}",
            self.remaining_seconds / 60,
            self.remaining_seconds % 60
        )
    }
}

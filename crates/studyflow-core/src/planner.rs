//! Facade over the scheduling and timer subsystems.
//!
//! A presentation layer holds one [`DayPlanner`] and reaches every
//! engine operation through it; the underlying components stay behind
//! accessor methods and are never handed out raw.

use std::sync::Arc;

use crate::error::ValidationError;
use crate::progress::ProgressTracker;
use crate::schedule::{Priority, Session, SessionStore};
use crate::scheduler::{BreakKind, Scheduler};
use crate::timer::{ActiveTimer, TimerId, TimerManager};

/// Single entry point for one day of planning.
pub struct DayPlanner {
    store: Arc<SessionStore>,
    scheduler: Scheduler,
    progress: ProgressTracker,
    timers: TimerManager,
}

impl Default for DayPlanner {
    fn default() -> Self {
        Self::new()
    }
}

impl DayPlanner {
    pub fn new() -> Self {
        let store = Arc::new(SessionStore::new());
        Self {
            scheduler: Scheduler::new(Arc::clone(&store)),
            progress: ProgressTracker::new(),
            timers: TimerManager::new(),
            store,
        }
    }

    /// Place a study session at the end of the timeline.
    pub fn add_session(
        &self,
        task: &str,
        duration_min: i64,
        priority: Priority,
    ) -> Result<Session, ValidationError> {
        self.scheduler.add_session(task, duration_min, priority)
    }

    /// Place a preset break at the end of the timeline.
    pub fn add_preset_break(&self, kind: BreakKind) -> Result<Session, ValidationError> {
        self.scheduler.add_preset_break(kind)
    }

    /// Drop the entire schedule.
    pub fn clear_schedule(&self) {
        self.scheduler.clear_schedule();
    }

    /// Schedule snapshot sorted by start time.
    pub fn list_sessions(&self) -> Vec<Session> {
        self.store.sorted_by_start()
    }

    /// Study-goal coverage percent for the current schedule.
    pub fn progress(&self) -> f64 {
        self.progress.percent(&self.store.all())
    }

    /// Start a countdown timer. See [`TimerManager::start`].
    pub fn start_timer(&self, minutes: i64) -> Result<TimerId, ValidationError> {
        self.timers.start(minutes)
    }

    /// Cancel a countdown timer; idempotent.
    pub fn cancel_timer(&self, id: TimerId) {
        self.timers.cancel(id);
    }

    /// Snapshot of running countdowns.
    pub fn active_timers(&self) -> Vec<ActiveTimer> {
        self.timers.active_timers()
    }

    /// Register the alarm handler for timer completions.
    pub fn on_alarm(&self, callback: impl Fn(TimerId, String) + Send + Sync + 'static) {
        self.timers.on_alarm(callback);
    }
}

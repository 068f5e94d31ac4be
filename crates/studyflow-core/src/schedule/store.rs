//! In-memory session log with chained placement.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Timelike, Utc};

use super::{Priority, Session, SessionCategory};

/// Owns the ordered log of scheduled sessions.
///
/// All mutation goes through `&self` methods serialized behind a single
/// writer lock; readers get owned snapshots, so an in-progress read can
/// never observe a half-applied append. The raw collection is never
/// exposed.
#[derive(Debug, Default)]
pub struct SessionStore {
    log: RwLock<Vec<Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new session chained after the current latest end time.
    ///
    /// Placement and insertion happen under the same write lock, so the
    /// chaining invariant holds for any interleaving of callers: each
    /// session starts exactly where the latest-ending one stops, and the
    /// timeline stays contiguous and overlap-free without any conflict
    /// detection.
    pub fn append_chained(
        &self,
        task: impl Into<String>,
        duration_min: i64,
        priority: Priority,
        category: SessionCategory,
    ) -> Session {
        let mut log = self.write();
        let start = chain_start(&log);
        let session = Session::new(start, task.into(), duration_min, priority, category);
        log.push(session.clone());
        session
    }

    /// Where the next session would start: the maximum `end` across the
    /// log, or the current minute when the log is empty.
    ///
    /// Advisory read; the append path recomputes under the write lock.
    pub fn next_start_time(&self) -> DateTime<Utc> {
        chain_start(&self.read())
    }

    /// Snapshot of the log in insertion order.
    pub fn all(&self) -> Vec<Session> {
        self.read().clone()
    }

    /// Snapshot of the log sorted by start time, for display.
    pub fn sorted_by_start(&self) -> Vec<Session> {
        let mut sessions = self.all();
        sessions.sort_by_key(|s| s.start);
        sessions
    }

    /// Remove every session. Irreversible.
    pub fn clear(&self) {
        self.write().clear();
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Session>> {
        self.log.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Session>> {
        self.log.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn chain_start(log: &[Session]) -> DateTime<Utc> {
    log.iter().map(|s| s.end).max().unwrap_or_else(current_minute)
}

/// Current wall-clock time truncated to the whole minute.
fn current_minute() -> DateTime<Utc> {
    let now = Utc::now();
    now.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(now)
}

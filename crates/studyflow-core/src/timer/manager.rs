//! Timer lifecycle management and watcher tasks.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration as StdDuration;

use chrono::{Duration, Utc};
use tokio::time::{self, MissedTickBehavior};

use crate::error::ValidationError;

use super::{ActiveTimer, Timer, TimerId, TimerState};

/// Longest accepted countdown, in minutes.
pub const MAX_TIMER_MIN: i64 = 24 * 60;

type AlarmHandler = Arc<dyn Fn(TimerId, String) + Send + Sync>;

/// Runs any number of independent countdowns.
///
/// Each started timer gets its own watcher task that polls at a fixed
/// cadence until the countdown completes or is cancelled, so one slow
/// timer can never delay another's completion. The registry is the
/// single shared collection; every read and every state transition
/// takes its lock.
pub struct TimerManager {
    registry: Arc<Mutex<HashMap<TimerId, Timer>>>,
    alarm: Arc<Mutex<Option<AlarmHandler>>>,
    next_id: AtomicU64,
    poll_interval: StdDuration,
}

impl Default for TimerManager {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerManager {
    /// Manager with the default 1-second watcher cadence.
    pub fn new() -> Self {
        Self::with_poll_interval(StdDuration::from_secs(1))
    }

    /// Manager with a custom watcher cadence.
    ///
    /// The domain needs no better than one second; sub-second cadences
    /// exist for tests that drive a full timer lifecycle quickly.
    pub fn with_poll_interval(poll_interval: StdDuration) -> Self {
        Self {
            registry: Arc::new(Mutex::new(HashMap::new())),
            alarm: Arc::new(Mutex::new(None)),
            next_id: AtomicU64::new(0),
            poll_interval,
        }
    }

    /// Register the alarm handler, replacing any previous registration.
    ///
    /// The handler is invoked exactly once per completed timer, from
    /// that timer's watcher task, with no registry lock held.
    pub fn on_alarm(&self, callback: impl Fn(TimerId, String) + Send + Sync + 'static) {
        *lock(&self.alarm) = Some(Arc::new(callback));
    }

    /// Start a countdown of `minutes`.
    ///
    /// Returns the new timer's id immediately; completion is reported
    /// through the alarm handler. Must be called from within a Tokio
    /// runtime, since each timer runs on its own spawned watcher task.
    pub fn start(&self, minutes: i64) -> Result<TimerId, ValidationError> {
        ValidationError::check_minutes("minutes", minutes, MAX_TIMER_MIN)?;
        Ok(self.start_with_duration(Duration::minutes(minutes), minutes))
    }

    /// Request cancellation of a running timer.
    ///
    /// Idempotent: unknown or already-terminal ids are a no-op. The
    /// watcher observes the flag at its next poll and exits without
    /// firing the alarm.
    pub fn cancel(&self, id: TimerId) {
        let mut timers = lock(&self.registry);
        if let Some(timer) = timers.get_mut(&id) {
            if timer.state == TimerState::Running {
                timer.state = TimerState::Cancelled;
            }
        }
    }

    /// Snapshot of running timers, ordered by id.
    pub fn active_timers(&self) -> Vec<ActiveTimer> {
        let now = Utc::now();
        let timers = lock(&self.registry);
        let mut active: Vec<ActiveTimer> = timers
            .values()
            .filter(|t| t.state == TimerState::Running)
            .map(|t| ActiveTimer {
                id: t.id,
                remaining_seconds: (t.end_time - now).num_seconds().max(0),
            })
            .collect();
        active.sort_by_key(|t| t.id);
        active
    }

    fn start_with_duration(&self, duration: Duration, duration_min: i64) -> TimerId {
        let id = TimerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let timer = Timer {
            id,
            end_time: Utc::now() + duration,
            duration_min,
            state: TimerState::Running,
        };
        lock(&self.registry).insert(id, timer);
        self.spawn_watcher(id);
        id
    }

    /// One watcher per timer. Polls until the countdown reaches its
    /// deadline or the cancellation flag; either way it removes the
    /// timer from the registry and exits.
    fn spawn_watcher(&self, id: TimerId) {
        let registry = Arc::clone(&self.registry);
        let alarm = Arc::clone(&self.alarm);
        let poll_interval = self.poll_interval;

        tokio::spawn(async move {
            let mut ticker = time::interval(poll_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;

                let completed_min = {
                    let mut timers = lock(&registry);
                    let (state, end_time) = match timers.get(&id) {
                        None => return,
                        Some(timer) => (timer.state, timer.end_time),
                    };
                    if state == TimerState::Cancelled {
                        timers.remove(&id);
                        return;
                    }
                    if Utc::now() >= end_time {
                        // Transition and removal are one step under the
                        // lock: a racing cancel can no longer win here.
                        timers.remove(&id).map(|t| t.duration_min)
                    } else {
                        None
                    }
                };

                if let Some(minutes) = completed_min {
                    let handler = lock(&alarm).clone();
                    if let Some(handler) = handler {
                        handler(id, format!("Timer completed! {minutes} minutes elapsed."));
                    }
                    return;
                }
            }
        });
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    /// Fast cadence so a full lifecycle fits in a test run.
    const TICK: StdDuration = StdDuration::from_millis(20);

    fn counting_handler(manager: &TimerManager) -> Arc<AtomicUsize> {
        let fired = Arc::new(AtomicUsize::new(0));
        let count = Arc::clone(&fired);
        manager.on_alarm(move |_, _| {
            count.fetch_add(1, Ordering::SeqCst);
        });
        fired
    }

    #[tokio::test]
    async fn completed_timer_fires_one_alarm_and_leaves_registry() {
        let manager = TimerManager::with_poll_interval(TICK);
        let messages: Arc<Mutex<Vec<(TimerId, String)>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&messages);
        manager.on_alarm(move |id, message| {
            lock(&sink).push((id, message));
        });

        let id = manager.start_with_duration(Duration::milliseconds(60), 2);
        tokio::time::sleep(StdDuration::from_millis(300)).await;

        let fired = lock(&messages).clone();
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].0, id);
        assert_eq!(fired[0].1, "Timer completed! 2 minutes elapsed.");
        assert!(manager.active_timers().is_empty());
    }

    #[tokio::test]
    async fn timers_complete_independently() {
        let manager = TimerManager::with_poll_interval(TICK);
        let fired = counting_handler(&manager);

        let short = manager.start_with_duration(Duration::milliseconds(60), 1);
        let long = manager.start_with_duration(Duration::milliseconds(600), 2);
        tokio::time::sleep(StdDuration::from_millis(250)).await;

        // The short timer is done, the long one keeps running.
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        let active = manager.active_timers();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, long);
        assert_ne!(short, long);
    }

    #[tokio::test]
    async fn cancelled_timer_never_fires() {
        let manager = TimerManager::with_poll_interval(TICK);
        let fired = counting_handler(&manager);

        let id = manager.start_with_duration(Duration::milliseconds(120), 1);
        manager.cancel(id);

        // Gone from the listing at once; the watcher reaps the entry.
        assert!(manager.active_timers().is_empty());
        tokio::time::sleep(StdDuration::from_millis(300)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        assert!(lock(&manager.registry).is_empty());
    }

    #[tokio::test]
    async fn cancel_is_idempotent() {
        let manager = TimerManager::with_poll_interval(TICK);
        let fired = counting_handler(&manager);

        let id = manager.start(5).unwrap();
        manager.cancel(id);
        manager.cancel(id);
        manager.cancel(TimerId(9999));
        tokio::time::sleep(StdDuration::from_millis(100)).await;

        assert_eq!(fired.load(Ordering::SeqCst), 0);
        assert!(manager.active_timers().is_empty());
    }

    #[tokio::test]
    async fn ids_are_monotonic_and_never_reused() {
        let manager = TimerManager::with_poll_interval(TICK);
        counting_handler(&manager);

        let a = manager.start_with_duration(Duration::milliseconds(40), 1);
        tokio::time::sleep(StdDuration::from_millis(150)).await;
        // First timer has completed and left the registry; the next id
        // still moves forward.
        let b = manager.start(5).unwrap();
        assert!(b > a);
        manager.cancel(b);
    }

    #[tokio::test]
    async fn start_rejects_non_positive_minutes() {
        let manager = TimerManager::with_poll_interval(TICK);
        assert!(matches!(
            manager.start(0),
            Err(ValidationError::InvalidValue { .. })
        ));
        assert!(matches!(
            manager.start(-10),
            Err(ValidationError::InvalidValue { .. })
        ));
        assert!(manager.active_timers().is_empty());
    }

    #[tokio::test]
    async fn remaining_seconds_counts_down_from_request() {
        let manager = TimerManager::with_poll_interval(TICK);
        let id = manager.start(2).unwrap();

        let active = manager.active_timers();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, id);
        assert!(active[0].remaining_seconds <= 120);
        assert!(active[0].remaining_seconds > 110);
        manager.cancel(id);
    }

    #[tokio::test]
    async fn registering_a_new_handler_replaces_the_old_one() {
        let manager = TimerManager::with_poll_interval(TICK);
        let first = counting_handler(&manager);
        let second = counting_handler(&manager);

        manager.start_with_duration(Duration::milliseconds(40), 1);
        tokio::time::sleep(StdDuration::from_millis(200)).await;

        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }
}

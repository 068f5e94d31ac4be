//! Daily study-goal progress aggregation.

use std::collections::HashMap;

use crate::schedule::{Session, SessionCategory};

/// Daily study goal in minutes (6 hours).
pub const DAILY_GOAL_MIN: i64 = 6 * 60;

/// Derives goal coverage from a snapshot of the session log.
///
/// Stateless: every figure is recomputed from the slice it is given.
#[derive(Debug, Clone)]
pub struct ProgressTracker {
    goal_min: i64,
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self {
            goal_min: DAILY_GOAL_MIN,
        }
    }
}

impl ProgressTracker {
    /// Tracker against the standard 6-hour daily goal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracker against a custom goal (minutes).
    pub fn with_goal_min(goal_min: i64) -> Self {
        Self { goal_min }
    }

    /// Total scheduled study minutes. Breaks do not count.
    pub fn study_minutes(&self, sessions: &[Session]) -> i64 {
        sessions
            .iter()
            .filter(|s| s.category == SessionCategory::Study)
            .map(|s| s.duration_min)
            .sum()
    }

    /// Goal coverage in percent, clamped to `0.0..=100.0`.
    pub fn percent(&self, sessions: &[Session]) -> f64 {
        let total = self.study_minutes(sessions) as f64;
        (total / self.goal_min as f64 * 100.0).min(100.0)
    }

    /// Scheduled minutes per category, for time-distribution displays.
    pub fn category_minutes(&self, sessions: &[Session]) -> HashMap<SessionCategory, i64> {
        let mut by_category = HashMap::new();
        for session in sessions {
            *by_category.entry(session.category).or_insert(0) += session.duration_min;
        }
        by_category
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{Priority, SessionStore};
    use proptest::prelude::*;

    fn store_with(sessions: &[(i64, SessionCategory)]) -> SessionStore {
        let store = SessionStore::new();
        for (minutes, category) in sessions {
            store.append_chained("block", *minutes, Priority::Medium, *category);
        }
        store
    }

    #[test]
    fn empty_schedule_is_zero_percent() {
        let tracker = ProgressTracker::new();
        assert_eq!(tracker.percent(&[]), 0.0);
    }

    #[test]
    fn quarter_goal() {
        let tracker = ProgressTracker::new();
        let store = store_with(&[(90, SessionCategory::Study)]);
        assert_eq!(tracker.percent(&store.all()), 25.0);
    }

    #[test]
    fn breaks_do_not_count() {
        let tracker = ProgressTracker::new();
        let store = store_with(&[
            (60, SessionCategory::Study),
            (30, SessionCategory::Break),
        ]);
        assert_eq!(tracker.study_minutes(&store.all()), 60);
    }

    #[test]
    fn clamps_at_one_hundred() {
        let tracker = ProgressTracker::new();
        // 10 x 60 min = 600 min against a 360 min goal.
        let sessions: Vec<_> = (0..10).map(|_| (60, SessionCategory::Study)).collect();
        let store = store_with(&sessions);
        assert_eq!(tracker.percent(&store.all()), 100.0);
    }

    #[test]
    fn custom_goal_scales() {
        let tracker = ProgressTracker::with_goal_min(120);
        let store = store_with(&[(60, SessionCategory::Study)]);
        assert_eq!(tracker.percent(&store.all()), 50.0);
    }

    #[test]
    fn category_minutes_aggregates() {
        let tracker = ProgressTracker::new();
        let store = store_with(&[
            (45, SessionCategory::Study),
            (5, SessionCategory::Break),
            (60, SessionCategory::Study),
        ]);
        let by_category = tracker.category_minutes(&store.all());
        assert_eq!(by_category[&SessionCategory::Study], 105);
        assert_eq!(by_category[&SessionCategory::Break], 5);
    }

    proptest! {
        #[test]
        fn percent_is_monotonic_and_bounded(
            durations in proptest::collection::vec(1i64..=240, 0..20)
        ) {
            let tracker = ProgressTracker::new();
            let store = SessionStore::new();
            let mut last = 0.0_f64;
            for d in durations {
                store.append_chained("task", d, Priority::Medium, SessionCategory::Study);
                let pct = tracker.percent(&store.all());
                prop_assert!(pct >= last);
                prop_assert!((0.0..=100.0).contains(&pct));
                last = pct;
            }
        }
    }
}

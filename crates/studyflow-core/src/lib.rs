//! # Studyflow Core Library
//!
//! This library provides the scheduling and timer engine for the
//! Studyflow day planner: a single user lays out one day of sequential,
//! non-overlapping study and break blocks and runs independent
//! countdown timers that notify on completion. Presentation (forms,
//! charts, clock face, sound) is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Session store**: the ordered in-memory log of placed sessions;
//!   single-writer mutation, snapshot reads. The schedule is
//!   deliberately ephemeral -- it describes one day and dies with the
//!   process.
//! - **Scheduler**: validates input and places each new session at the
//!   current latest end time ("chaining"), which keeps the timeline
//!   contiguous and overlap-free by construction.
//! - **Progress**: stateless aggregation of scheduled study minutes
//!   against the 6-hour daily goal.
//! - **Timers**: one watcher task per running countdown, polling at a
//!   1-second cadence; completion fires the registered alarm callback
//!   exactly once.
//!
//! ## Key Components
//!
//! - [`DayPlanner`]: single entry point for a presentation layer
//! - [`Scheduler`]: session placement and presets
//! - [`TimerManager`]: countdown lifecycle and alarms

pub mod error;
pub mod planner;
pub mod progress;
pub mod schedule;
pub mod scheduler;
pub mod timer;

pub use error::{CoreError, Result, ValidationError};
pub use planner::DayPlanner;
pub use progress::{ProgressTracker, DAILY_GOAL_MIN};
pub use schedule::{Priority, Session, SessionCategory, SessionStore};
pub use scheduler::{BreakKind, Scheduler, MAX_SESSION_MIN};
pub use timer::{ActiveTimer, Timer, TimerId, TimerManager, TimerState, MAX_TIMER_MIN};

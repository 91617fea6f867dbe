//! # Wellspring Core Library
//!
//! Goal tracking for the Wellspring journaling app. The front ends (CLI,
//! desktop) are thin layers over this crate.
//!
//! ## Architecture
//!
//! - **Streak Engine**: a pure function deciding what "mark done for today"
//!   does to a goal, given the goal and an explicit calendar day
//! - **Tracker**: owns the session's goal collection and applies toggles in
//!   order
//! - **Storage**: SQLite goal storage and TOML-based configuration
//!
//! ## Key Components
//!
//! - [`toggle_completion`]: the streak state machine
//! - [`CalendarDay`]: the date type every comparison is made on
//! - [`GoalTracker`]: in-memory collection plus persistence
//! - [`GoalDb`]: SQLite-backed [`GoalStore`]
//! - [`Config`]: application configuration management

pub mod day;
pub mod error;
pub mod events;
pub mod goal;
pub mod storage;
pub mod summary;
pub mod tracker;

pub use day::{CalendarDay, DayBoundary};
pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use events::GoalEvent;
pub use goal::{
    toggle_completion, toggle_with_outcome, Frequency, Goal, GoalDraft, GoalEdit, GoalState,
    StreakRule, TimePeriod, Transition, KNOWN_CATEGORIES,
};
pub use storage::{Config, GoalDb, GoalStore, MemoryStore};
pub use summary::GoalSummary;
pub use tracker::GoalTracker;

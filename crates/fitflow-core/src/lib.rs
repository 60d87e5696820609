//! # FitFlow Core Library
//!
//! Core business logic for FitFlow, a personal fitness tracker. The
//! library follows a CLI-first philosophy: every operation is available
//! through the standalone CLI binary, and any GUI layer is a thin shell
//! over this crate.
//!
//! ## Architecture
//!
//! - **Workout timer**: a tick-driven clock, threshold notifier, and
//!   session state machine; the caller invokes `tick()` once per second
//! - **XP accounting**: pure functions mapping awards to levels and streaks
//! - **Habits**: presence-flip completion toggles with a fixed XP reward
//! - **Backend**: record-oriented CRUD client for the hosted data service,
//!   which owns all durable records
//! - **Storage**: TOML configuration and a local SQLite kv store for
//!   client-side state (shortcut tiles, parked session, signed-in user)
//!
//! ## Key Components
//!
//! - [`WorkoutSession`]: session lifecycle state machine
//! - [`PeriodicNotifier`]: hydration/motivation reminders
//! - [`leveling::award_xp`]: the XP accountant
//! - [`HabitTracker`]: habit toggle executor
//! - [`BackendClient`]: hosted backend collaborator

pub mod auth;
pub mod backend;
pub mod error;
pub mod events;
pub mod habits;
pub mod journal;
pub mod leveling;
pub mod model;
pub mod progress;
pub mod shortcuts;
pub mod storage;
pub mod timer;

pub use auth::{AuthSession, AuthState};
pub use backend::BackendClient;
pub use error::{BackendError, ConfigError, CoreError, DatabaseError, ValidationError};
pub use events::Event;
pub use habits::{HabitTracker, ToggleAction};
pub use leveling::XpAward;
pub use model::{Habit, HabitLog, JournalEntry, Mood, Profile};
pub use shortcuts::{AppShortcut, ShortcutStore};
pub use storage::{Config, Database};
pub use timer::{
    NotificationSink, PeriodicNotifier, Reminder, SessionState, WorkoutClock, WorkoutSession,
};

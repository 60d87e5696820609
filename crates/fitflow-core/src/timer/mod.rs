mod clock;
mod notifier;
mod session;

pub use clock::{format_hms, WorkoutClock};
pub use notifier::{
    NotificationSink, PeriodicNotifier, Reminder, DEFAULT_MOTIVATIONS,
    HYDRATION_INTERVAL_SECS, MOTIVATION_INTERVAL_SECS,
};
pub use session::{SessionState, WorkoutSession, FINISH_GRACE_SECS};

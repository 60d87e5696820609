use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::SessionState;

/// Every session state change produces an Event. The CLI prints them;
/// a GUI layer would poll for them. Reminders travel separately as
/// [`crate::timer::Reminder`] through the notification sink.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    SessionStarted {
        at: DateTime<Utc>,
    },
    SessionPaused {
        elapsed_secs: u64,
        at: DateTime<Utc>,
    },
    SessionResumed {
        elapsed_secs: u64,
        at: DateTime<Utc>,
    },
    /// Finish requested; the captured duration is final but the session
    /// lingers in a short display-only grace period.
    SessionFinishing {
        duration_secs: u64,
        grace_secs: u64,
        at: DateTime<Utc>,
    },
    SessionFinished {
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    SessionCancelled {
        elapsed_secs: u64,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: SessionState,
        elapsed_secs: u64,
        at: DateTime<Utc>,
    },
}

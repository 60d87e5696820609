//! Elapsed-seconds counter for a workout session.
//!
//! The clock has no internal thread -- the caller drives it by calling
//! `tick()` once per real-time second, matching platform timer jitter at
//! worst. Pausing only clears the `active` flag; the count is kept.

use serde::{Deserialize, Serialize};

/// Monotonically increasing seconds counter, pausable and resumable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkoutClock {
    seconds: u64,
    active: bool,
}

impl WorkoutClock {
    /// A fresh, inactive clock at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin counting from 0.
    pub fn start(&mut self) {
        self.seconds = 0;
        self.active = true;
    }

    pub fn pause(&mut self) {
        self.active = false;
    }

    pub fn resume(&mut self) {
        self.active = true;
    }

    /// Advance by one second if active.
    pub fn tick(&mut self) {
        if self.active {
            self.seconds += 1;
        }
    }

    /// Freeze the count and return it.
    pub fn stop(&mut self) -> u64 {
        self.active = false;
        self.seconds
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.seconds
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// Render seconds as `H:MM:SS`, or `MM:SS` under an hour.
pub fn format_hms(total_seconds: u64) -> String {
    let h = total_seconds / 3600;
    let m = (total_seconds % 3600) / 60;
    let s = total_seconds % 60;
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m:02}:{s:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_accumulate_while_active() {
        let mut clock = WorkoutClock::new();
        clock.start();
        for _ in 0..42 {
            clock.tick();
        }
        clock.pause();
        assert_eq!(clock.elapsed_secs(), 42);
    }

    #[test]
    fn paused_ticks_do_not_count() {
        let mut clock = WorkoutClock::new();
        clock.start();
        for _ in 0..10 {
            clock.tick();
        }
        clock.pause();
        for _ in 0..5 {
            clock.tick();
        }
        assert_eq!(clock.elapsed_secs(), 10);
        clock.resume();
        clock.tick();
        assert_eq!(clock.elapsed_secs(), 11);
    }

    #[test]
    fn stop_freezes_and_returns_count() {
        let mut clock = WorkoutClock::new();
        clock.start();
        clock.tick();
        clock.tick();
        assert_eq!(clock.stop(), 2);
        clock.tick();
        assert_eq!(clock.elapsed_secs(), 2);
    }

    #[test]
    fn start_resets_to_zero() {
        let mut clock = WorkoutClock::new();
        clock.start();
        clock.tick();
        clock.start();
        assert_eq!(clock.elapsed_secs(), 0);
        assert!(clock.is_active());
    }

    #[test]
    fn formats_hours_minutes_seconds() {
        assert_eq!(format_hms(0), "00:00");
        assert_eq!(format_hms(65), "01:05");
        assert_eq!(format_hms(3600), "1:00:00");
        assert_eq!(format_hms(3725), "1:02:05");
    }
}

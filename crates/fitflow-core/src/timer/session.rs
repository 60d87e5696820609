//! Workout session lifecycle.
//!
//! A state machine over the clock. No internal threads -- the caller calls
//! `tick()` once per second, same contract as the clock.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running <-> Paused -> Finishing -> Finished
//!            |           |
//!            +-----------+--> Cancelled
//! ```
//!
//! Finishing is a display-only grace period: the duration is already
//! captured, and after [`FINISH_GRACE_SECS`] ticks the session lands in
//! Finished, where the duration is reported exactly once via
//! [`WorkoutSession::take_report`]. Cancelling reports nothing.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::clock::WorkoutClock;
use crate::events::Event;

/// Display-only celebration window between "finish" and the final report.
pub const FINISH_GRACE_SECS: u64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Idle,
    Running,
    Paused,
    Finishing,
    Finished,
    Cancelled,
}

impl SessionState {
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionState::Finished | SessionState::Cancelled)
    }
}

/// One timed workout interval. Ephemeral: only the final duration survives,
/// folded into an XP award by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutSession {
    clock: WorkoutClock,
    state: SessionState,
    #[serde(default)]
    grace_remaining: u64,
    #[serde(default)]
    final_duration: Option<u64>,
    #[serde(default)]
    reported: bool,
}

impl Default for WorkoutSession {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkoutSession {
    pub fn new() -> Self {
        Self {
            clock: WorkoutClock::new(),
            state: SessionState::Idle,
            grace_remaining: 0,
            final_duration: None,
            reported: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.clock.elapsed_secs()
    }

    /// The clock is accumulating: ticks will advance the elapsed count.
    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            state: self.state,
            elapsed_secs: self.elapsed_secs(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Idle -> Running; the clock starts at 0. Ignored elsewhere.
    pub fn start(&mut self) -> Option<Event> {
        match self.state {
            SessionState::Idle => {
                self.clock.start();
                self.state = SessionState::Running;
                Some(Event::SessionStarted { at: Utc::now() })
            }
            _ => None,
        }
    }

    pub fn pause(&mut self) -> Option<Event> {
        match self.state {
            SessionState::Running => {
                self.clock.pause();
                self.state = SessionState::Paused;
                Some(Event::SessionPaused {
                    elapsed_secs: self.elapsed_secs(),
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    pub fn resume(&mut self) -> Option<Event> {
        match self.state {
            SessionState::Paused => {
                self.clock.resume();
                self.state = SessionState::Running;
                Some(Event::SessionResumed {
                    elapsed_secs: self.elapsed_secs(),
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    /// Running|Paused -> Finishing. Stops the clock and captures the final
    /// duration; the grace countdown is driven by subsequent ticks.
    /// Ignored from Idle or a terminal state.
    pub fn finish(&mut self) -> Option<Event> {
        match self.state {
            SessionState::Running | SessionState::Paused => {
                let duration = self.clock.stop();
                self.final_duration = Some(duration);
                self.grace_remaining = FINISH_GRACE_SECS;
                self.state = SessionState::Finishing;
                Some(Event::SessionFinishing {
                    duration_secs: duration,
                    grace_secs: FINISH_GRACE_SECS,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    /// Running|Paused -> Cancelled. Terminal; nothing is reported and no
    /// XP is awarded. Ignored from Idle or a terminal state.
    pub fn cancel(&mut self) -> Option<Event> {
        match self.state {
            SessionState::Running | SessionState::Paused => {
                let elapsed = self.clock.stop();
                self.state = SessionState::Cancelled;
                Some(Event::SessionCancelled {
                    elapsed_secs: elapsed,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    /// Call once per second. Advances the clock while Running and the grace
    /// countdown while Finishing; returns the Finished event when the grace
    /// period lapses.
    pub fn tick(&mut self) -> Option<Event> {
        match self.state {
            SessionState::Running => {
                self.clock.tick();
                None
            }
            SessionState::Finishing => {
                self.grace_remaining = self.grace_remaining.saturating_sub(1);
                if self.grace_remaining == 0 {
                    self.state = SessionState::Finished;
                    return Some(Event::SessionFinished {
                        duration_secs: self.final_duration.unwrap_or(0),
                        at: Utc::now(),
                    });
                }
                None
            }
            _ => None,
        }
    }

    /// The captured duration, delivered exactly once after Finished.
    pub fn take_report(&mut self) -> Option<u64> {
        if self.state == SessionState::Finished && !self.reported {
            self.reported = true;
            self.final_duration
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_ticks(session: &mut WorkoutSession, n: u64) -> Option<Event> {
        let mut last = None;
        for _ in 0..n {
            if let Some(ev) = session.tick() {
                last = Some(ev);
            }
        }
        last
    }

    #[test]
    fn start_pause_resume_accumulates_only_while_running() {
        let mut s = WorkoutSession::new();
        assert_eq!(s.state(), SessionState::Idle);

        assert!(s.start().is_some());
        run_ticks(&mut s, 10);
        assert!(s.pause().is_some());
        run_ticks(&mut s, 5);
        assert_eq!(s.elapsed_secs(), 10);

        assert!(s.resume().is_some());
        run_ticks(&mut s, 2);
        assert_eq!(s.elapsed_secs(), 12);
    }

    #[test]
    fn finish_captures_duration_then_grace_then_report_once() {
        let mut s = WorkoutSession::new();
        s.start();
        run_ticks(&mut s, 720);

        let ev = s.finish().unwrap();
        assert!(matches!(ev, Event::SessionFinishing { duration_secs: 720, .. }));
        assert_eq!(s.state(), SessionState::Finishing);

        // Nothing reported until the grace period lapses.
        assert_eq!(s.take_report(), None);
        assert!(s.tick().is_none());
        assert!(s.tick().is_none());
        let done = s.tick().unwrap();
        assert!(matches!(done, Event::SessionFinished { duration_secs: 720, .. }));
        assert_eq!(s.state(), SessionState::Finished);

        assert_eq!(s.take_report(), Some(720));
        assert_eq!(s.take_report(), None);
    }

    #[test]
    fn grace_ticks_do_not_extend_the_duration() {
        let mut s = WorkoutSession::new();
        s.start();
        run_ticks(&mut s, 45);
        s.finish();
        run_ticks(&mut s, FINISH_GRACE_SECS);
        assert_eq!(s.elapsed_secs(), 45);
        assert_eq!(s.take_report(), Some(45));
    }

    #[test]
    fn cancel_is_terminal_and_reports_nothing() {
        let mut s = WorkoutSession::new();
        s.start();
        run_ticks(&mut s, 30);
        let ev = s.cancel().unwrap();
        assert!(matches!(ev, Event::SessionCancelled { elapsed_secs: 30, .. }));
        assert_eq!(s.state(), SessionState::Cancelled);

        assert!(s.tick().is_none());
        assert_eq!(s.take_report(), None);
        // Terminal: no restart, no finish.
        assert!(s.start().is_none());
        assert!(s.finish().is_none());
    }

    #[test]
    fn cancel_from_paused_is_allowed() {
        let mut s = WorkoutSession::new();
        s.start();
        s.tick();
        s.pause();
        assert!(s.cancel().is_some());
        assert_eq!(s.state(), SessionState::Cancelled);
    }

    #[test]
    fn finish_and_cancel_from_idle_are_noops() {
        let mut s = WorkoutSession::new();
        assert!(s.finish().is_none());
        assert!(s.cancel().is_none());
        assert_eq!(s.state(), SessionState::Idle);
    }

    #[test]
    fn finished_session_ignores_further_commands() {
        let mut s = WorkoutSession::new();
        s.start();
        s.tick();
        s.finish();
        run_ticks(&mut s, FINISH_GRACE_SECS);
        assert_eq!(s.state(), SessionState::Finished);
        assert!(s.start().is_none());
        assert!(s.pause().is_none());
        assert!(s.cancel().is_none());
    }

    #[test]
    fn serde_roundtrip_preserves_mid_session_state() {
        let mut s = WorkoutSession::new();
        s.start();
        run_ticks(&mut s, 5);
        s.pause();

        let json = serde_json::to_string(&s).unwrap();
        let mut back: WorkoutSession = serde_json::from_str(&json).unwrap();
        assert_eq!(back.state(), SessionState::Paused);
        assert_eq!(back.elapsed_secs(), 5);
        back.resume();
        back.tick();
        assert_eq!(back.elapsed_secs(), 6);
    }
}

//! Threshold-crossing reminders driven by the session clock.
//!
//! The notifier inspects each new elapsed-seconds value and yields the
//! reminders due at that second: a hydration prompt every 15 minutes and a
//! motivational quote rotation every 5 minutes. At t = 900 both are due and
//! both fire. Re-observing the same second yields nothing, so a caller
//! looping while the clock is paused cannot re-fire a threshold.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Quote rotation interval.
pub const MOTIVATION_INTERVAL_SECS: u64 = 300;

/// Hydration prompt interval.
pub const HYDRATION_INTERVAL_SECS: u64 = 900;

/// Built-in motivational quotes; config may override the list.
pub const DEFAULT_MOTIVATIONS: [&str; 4] = [
    "Pain is temporary. Glory is forever.",
    "Don't stop when you're tired. Stop when you're done.",
    "Your body can stand almost anything. It's your mind that you have to convince.",
    "Sweat is just fat crying.",
];

/// A reminder due at some elapsed second.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reminder {
    /// Blocking-style "drink water" interruption.
    Hydration,
    /// Rotate the displayed quote.
    Motivation { quote: String },
}

/// Synchronous "interrupt the user with a message" capability.
pub trait NotificationSink {
    fn notify(&mut self, reminder: &Reminder);
}

/// Watches elapsed seconds and produces [`Reminder`]s at thresholds.
pub struct PeriodicNotifier<R: Rng = rand::rngs::ThreadRng> {
    quotes: Vec<String>,
    last_seen: Option<u64>,
    rng: R,
}

impl PeriodicNotifier<rand::rngs::ThreadRng> {
    /// Build a notifier over the given quote list. An empty list falls back
    /// to [`DEFAULT_MOTIVATIONS`] so a quote is always available.
    pub fn new(quotes: Vec<String>) -> Self {
        Self::with_rng(quotes, rand::thread_rng())
    }
}

impl<R: Rng> PeriodicNotifier<R> {
    pub fn with_rng(quotes: Vec<String>, rng: R) -> Self {
        let quotes = if quotes.is_empty() {
            DEFAULT_MOTIVATIONS.iter().map(|q| q.to_string()).collect()
        } else {
            quotes
        };
        Self {
            quotes,
            last_seen: None,
            rng,
        }
    }

    /// Inspect elapsed second `t` and return the reminders due at it.
    ///
    /// Each second is observed at most once; feeding the same `t` again
    /// (e.g. while paused) yields nothing.
    pub fn observe(&mut self, t: u64) -> Vec<Reminder> {
        if self.last_seen == Some(t) {
            return Vec::new();
        }
        self.last_seen = Some(t);

        let mut due = Vec::new();
        if t > 0 && t % HYDRATION_INTERVAL_SECS == 0 {
            due.push(Reminder::Hydration);
        }
        if t > 0 && t % MOTIVATION_INTERVAL_SECS == 0 {
            due.push(Reminder::Motivation {
                quote: self.pick_quote(),
            });
        }
        due
    }

    /// Uniformly random quote from the configured list.
    pub fn pick_quote(&mut self) -> String {
        self.quotes
            .choose(&mut self.rng)
            .cloned()
            .unwrap_or_default()
    }

    pub fn quotes(&self) -> &[String] {
        &self.quotes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_pcg::Pcg64;
    use rand::SeedableRng;

    fn notifier() -> PeriodicNotifier<Pcg64> {
        PeriodicNotifier::with_rng(Vec::new(), Pcg64::seed_from_u64(7))
    }

    #[test]
    fn fires_motivation_and_hydration_at_expected_seconds() {
        let mut n = notifier();
        let mut motivation_at = Vec::new();
        let mut hydration_at = Vec::new();
        for t in 1..=900 {
            for reminder in n.observe(t) {
                match reminder {
                    Reminder::Motivation { .. } => motivation_at.push(t),
                    Reminder::Hydration => hydration_at.push(t),
                }
            }
        }
        assert_eq!(motivation_at, vec![300, 600, 900]);
        assert_eq!(hydration_at, vec![900]);
    }

    #[test]
    fn both_fire_at_nine_hundred() {
        let mut n = notifier();
        let due = n.observe(900);
        assert_eq!(due.len(), 2);
        assert_eq!(due[0], Reminder::Hydration);
        assert!(matches!(due[1], Reminder::Motivation { .. }));
    }

    #[test]
    fn same_second_fires_at_most_once() {
        let mut n = notifier();
        assert_eq!(n.observe(300).len(), 1);
        assert!(n.observe(300).is_empty());
        assert!(n.observe(300).is_empty());
    }

    #[test]
    fn zero_is_never_a_threshold() {
        let mut n = notifier();
        assert!(n.observe(0).is_empty());
    }

    #[test]
    fn empty_quote_list_falls_back_to_defaults() {
        let mut n = notifier();
        let quote = n.pick_quote();
        assert!(DEFAULT_MOTIVATIONS.contains(&quote.as_str()));
    }

    #[test]
    fn quotes_come_from_the_configured_list() {
        let mut n = PeriodicNotifier::with_rng(
            vec!["one more rep".to_string()],
            Pcg64::seed_from_u64(1),
        );
        assert_eq!(n.pick_quote(), "one more rep");
    }
}

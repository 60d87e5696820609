//! Habit completion tracking.
//!
//! Completion for a day is the presence of a log row for (habit, date).
//! [`plan_toggle`] is the pure decision; [`HabitTracker`] executes it
//! against the backend, re-fetching today's logs immediately before acting
//! so a rapid double-toggle cannot produce a duplicate (habit, day) row.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::auth::AuthState;
use crate::backend::BackendClient;
use crate::error::Result;
use crate::leveling::HABIT_COMPLETION_XP;
use crate::model::{Habit, HabitLog, NewHabit};
use crate::progress::{grant_xp, GrantedXp};

/// What a toggle will do, decided solely by log presence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ToggleAction {
    /// No log today: create one (completing the habit).
    Create,
    /// A log exists: delete it (un-completing the habit).
    Delete { log_id: String },
}

/// Decide the toggle action for `habit_id` given today's logs.
pub fn plan_toggle(habit_id: &str, today_logs: &[HabitLog]) -> ToggleAction {
    match today_logs.iter().find(|log| log.habit_id == habit_id) {
        Some(log) => ToggleAction::Delete {
            log_id: log.id.clone(),
        },
        None => ToggleAction::Create,
    }
}

/// The set of habit ids completed today. A set lookup instead of a scan;
/// scale here is tiny, so this is a style choice.
pub fn completed_ids(today_logs: &[HabitLog]) -> HashSet<&str> {
    today_logs.iter().map(|log| log.habit_id.as_str()).collect()
}

pub fn is_completed(habit_id: &str, today_logs: &[HabitLog]) -> bool {
    today_logs.iter().any(|log| log.habit_id == habit_id)
}

/// The bootstrap default set.
pub fn default_habits() -> Vec<NewHabit> {
    [
        ("Gym Visit", "dumbbell"),
        ("Drink 3L Water", "droplet"),
        ("Clean Diet", "utensils"),
        ("Journal", "book"),
    ]
    .into_iter()
    .map(|(title, icon)| NewHabit {
        title: title.to_string(),
        icon: icon.to_string(),
        target_count: 1,
    })
    .collect()
}

/// Result of an executed toggle.
#[derive(Debug)]
pub struct ToggleOutcome {
    pub habit_id: String,
    pub completed: bool,
    /// Present only when the toggle completed the habit.
    pub granted: Option<GrantedXp>,
}

/// Backend-composed toggle executor.
pub struct HabitTracker<'a> {
    client: &'a BackendClient,
    auth: &'a AuthState,
}

impl<'a> HabitTracker<'a> {
    pub fn new(client: &'a BackendClient, auth: &'a AuthState) -> Self {
        Self { client, auth }
    }

    /// Flip today's completion for `habit_id`.
    ///
    /// Returns `Ok(None)` when logged out (mutations without an identity
    /// are no-ops). Today's logs are fetched fresh here, never taken from a
    /// cache, which keeps (habit_id, date) unique even under repeated
    /// invocation.
    pub async fn toggle(
        &self,
        habit_id: &str,
        today: NaiveDate,
    ) -> Result<Option<ToggleOutcome>> {
        let Some(user_id) = self.auth.user_id() else {
            return Ok(None);
        };

        let logs = self.client.logs_for_day(user_id, today).await?;
        match plan_toggle(habit_id, &logs) {
            ToggleAction::Delete { log_id } => {
                self.client.delete_habit_log(&log_id).await?;
                Ok(Some(ToggleOutcome {
                    habit_id: habit_id.to_string(),
                    completed: false,
                    granted: None,
                }))
            }
            ToggleAction::Create => {
                self.client
                    .create_habit_log(user_id, habit_id, today)
                    .await?;
                let granted =
                    grant_xp(self.client, self.auth, HABIT_COMPLETION_XP, today).await?;
                Ok(Some(ToggleOutcome {
                    habit_id: habit_id.to_string(),
                    completed: true,
                    granted,
                }))
            }
        }
    }

    /// Create the default habit set when the user has none yet.
    /// Returns the user's habits afterwards.
    pub async fn bootstrap_defaults(&self) -> Result<Option<Vec<Habit>>> {
        let Some(user_id) = self.auth.user_id() else {
            return Ok(None);
        };

        let existing = self.client.list_habits(user_id).await?;
        if !existing.is_empty() {
            return Ok(Some(existing));
        }
        let mut created = Vec::new();
        for habit in default_habits() {
            created.push(self.client.create_habit(user_id, &habit).await?);
        }
        Ok(Some(created))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log(id: &str, habit_id: &str) -> HabitLog {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "habit_id": habit_id,
            "user_id": "u1",
            "date_logged": "2026-08-07",
        }))
        .unwrap()
    }

    #[test]
    fn toggle_plan_depends_only_on_presence() {
        let logs = vec![log("l1", "h1")];
        assert_eq!(
            plan_toggle("h1", &logs),
            ToggleAction::Delete { log_id: "l1".into() }
        );
        assert_eq!(plan_toggle("h2", &logs), ToggleAction::Create);
        assert_eq!(plan_toggle("h1", &[]), ToggleAction::Create);
    }

    #[test]
    fn toggle_twice_round_trips() {
        // Create, apply, toggle again: the plan inverts.
        let mut logs: Vec<HabitLog> = Vec::new();
        assert_eq!(plan_toggle("h1", &logs), ToggleAction::Create);
        logs.push(log("l1", "h1"));
        let ToggleAction::Delete { log_id } = plan_toggle("h1", &logs) else {
            panic!("expected delete");
        };
        logs.retain(|l| l.id != log_id);
        assert_eq!(plan_toggle("h1", &logs), ToggleAction::Create);
        assert!(logs.is_empty());
    }

    #[test]
    fn completed_set_derivation() {
        let logs = vec![log("l1", "h1"), log("l2", "h3")];
        let done = completed_ids(&logs);
        assert!(done.contains("h1"));
        assert!(!done.contains("h2"));
        assert!(is_completed("h3", &logs));
        assert!(!is_completed("h2", &logs));
    }

    #[test]
    fn default_set_matches_bootstrap() {
        let defaults = default_habits();
        assert_eq!(defaults.len(), 4);
        assert_eq!(defaults[0].title, "Gym Visit");
        assert!(defaults.iter().all(|h| h.target_count == 1));
    }
}

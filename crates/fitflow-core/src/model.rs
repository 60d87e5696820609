//! Record types shared between the backend client and the domain services.
//!
//! These mirror the four record kinds the hosted backend stores: profiles,
//! habits, habit logs, and journal entries. The client holds cached copies;
//! the backend owns the durable rows.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::leveling;

/// A user profile. Owned by the backend; mutated locally only through
/// XP-award calls and replaced wholesale on refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub xp: u64,
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default)]
    pub current_streak: u32,
    #[serde(default)]
    pub last_activity_date: Option<NaiveDate>,
}

fn default_level() -> u32 {
    1
}

impl Profile {
    /// Fraction of the way to the next level, 0.0 .. 1.0.
    pub fn level_progress(&self) -> f64 {
        (self.xp % leveling::XP_PER_LEVEL) as f64 / leveling::XP_PER_LEVEL as f64
    }

    /// Display name, falling back to a generic handle.
    pub fn display_name(&self) -> &str {
        self.username.as_deref().unwrap_or("Athlete")
    }
}

/// A recurring task definition. Created by the user or the bootstrap
/// default set; never mutated in this core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Habit {
    pub id: String,
    pub user_id: String,
    pub title: String,
    #[serde(default)]
    pub icon: String,
    /// Declared per-day target. Completion is tracked as row presence, so
    /// this field is carried but not consulted by the toggle logic.
    #[serde(default = "default_target_count")]
    pub target_count: u32,
}

fn default_target_count() -> u32 {
    1
}

/// Payload for creating a habit; the backend assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewHabit {
    pub title: String,
    pub icon: String,
    pub target_count: u32,
}

/// Existence of a row for (habit, date) means "completed that day".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitLog {
    pub id: String,
    pub habit_id: String,
    pub user_id: String,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    pub date_logged: NaiveDate,
}

/// Mood symbol attached to a journal entry. Closed set; the backend stores
/// the raw symbol string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Mood {
    Pumped,
    Strong,
    Neutral,
    Tired,
    Sore,
}

impl Mood {
    pub const ALL: [Mood; 5] = [
        Mood::Pumped,
        Mood::Strong,
        Mood::Neutral,
        Mood::Tired,
        Mood::Sore,
    ];

    /// The symbol the backend stores.
    pub fn symbol(&self) -> &'static str {
        match self {
            Mood::Pumped => "\u{1F525}",  // fire
            Mood::Strong => "\u{1F4AA}",  // flexed biceps
            Mood::Neutral => "\u{1F610}", // neutral face
            Mood::Tired => "\u{1F634}",   // sleeping face
            Mood::Sore => "\u{1F915}",    // face with head-bandage
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mood::Pumped => "pumped",
            Mood::Strong => "strong",
            Mood::Neutral => "neutral",
            Mood::Tired => "tired",
            Mood::Sore => "sore",
        }
    }
}

impl std::str::FromStr for Mood {
    type Err = String;

    /// Accepts both the label ("tired") and the stored symbol.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mood::ALL
            .iter()
            .find(|m| m.label() == s || m.symbol() == s)
            .copied()
            .ok_or_else(|| format!("unknown mood '{s}'"))
    }
}

impl TryFrom<String> for Mood {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Mood> for String {
    fn from(mood: Mood) -> Self {
        mood.symbol().to_string()
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Free-text note plus mood symbol. Append-only, owned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: String,
    pub user_id: String,
    pub content: String,
    pub mood: Mood,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mood_roundtrips_through_symbol() {
        for mood in Mood::ALL {
            let json = serde_json::to_string(&mood).unwrap();
            let back: Mood = serde_json::from_str(&json).unwrap();
            assert_eq!(mood, back);
        }
    }

    #[test]
    fn mood_parses_labels_and_symbols() {
        assert_eq!("strong".parse::<Mood>().unwrap(), Mood::Strong);
        assert_eq!("\u{1F525}".parse::<Mood>().unwrap(), Mood::Pumped);
        assert!("grumpy".parse::<Mood>().is_err());
    }

    #[test]
    fn profile_defaults_fill_missing_fields() {
        let p: Profile = serde_json::from_str(r#"{"id":"u1"}"#).unwrap();
        assert_eq!(p.level, 1);
        assert_eq!(p.xp, 0);
        assert_eq!(p.display_name(), "Athlete");
    }

    #[test]
    fn level_progress_wraps_per_hundred() {
        let p: Profile = serde_json::from_str(r#"{"id":"u1","xp":250,"level":3}"#).unwrap();
        assert!((p.level_progress() - 0.5).abs() < f64::EPSILON);
    }
}

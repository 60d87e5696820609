//! XP accounting and level derivation.
//!
//! Pure functions, no storage or network concern: callers fetch the profile,
//! run the accountant, and persist the result themselves. XP only ever
//! increases; levels never decrease.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::model::Profile;

/// XP required per level.
pub const XP_PER_LEVEL: u64 = 100;

/// Flat reward for completing a habit.
pub const HABIT_COMPLETION_XP: i64 = 10;

/// Floor for a finished workout session's reward.
pub const MIN_SESSION_XP: i64 = 10;

/// Outcome of applying an XP award to a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct XpAward {
    pub new_xp: u64,
    pub new_level: u32,
    pub leveled_up: bool,
}

/// Level derived from cumulative XP: `floor(xp / 100) + 1`.
pub fn level_for_xp(xp: u64) -> u32 {
    (xp / XP_PER_LEVEL) as u32 + 1
}

/// Apply an XP award.
///
/// `amount` must be non-negative; negative input is rejected here rather
/// than silently dropped. Zero is accepted as a no-op award.
pub fn award_xp(profile: &Profile, amount: i64) -> Result<XpAward, ValidationError> {
    if amount < 0 {
        return Err(ValidationError::InvalidValue {
            field: "amount".into(),
            message: format!("XP award must be non-negative, got {amount}"),
        });
    }
    let new_xp = profile.xp + amount as u64;
    let new_level = level_for_xp(new_xp);
    Ok(XpAward {
        new_xp,
        new_level,
        leveled_up: new_level > profile.level,
    })
}

/// XP earned for a finished session: 1 XP per full minute, floor of
/// [`MIN_SESSION_XP`].
pub fn session_award(duration_secs: u64) -> i64 {
    MIN_SESSION_XP.max((duration_secs / 60) as i64)
}

/// Advance the activity streak for an award landing on `today`.
///
/// Same-day activity keeps the streak, a consecutive day extends it, and a
/// gap (or no prior activity) restarts it at 1.
pub fn advance_streak(
    current_streak: u32,
    last_activity: Option<NaiveDate>,
    today: NaiveDate,
) -> (u32, NaiveDate) {
    let streak = match last_activity {
        Some(last) if last == today => current_streak.max(1),
        Some(last) if last.succ_opt() == Some(today) => current_streak + 1,
        _ => 1,
    };
    (streak, today)
}

//! Applying XP awards to the stored profile.
//!
//! The accountant in [`crate::leveling`] stays pure; this module is the
//! one place that folds an award (and the streak it implies) into the
//! backend-owned profile row.

use chrono::NaiveDate;
use serde_json::json;

use crate::auth::AuthState;
use crate::backend::BackendClient;
use crate::error::Result;
use crate::leveling::{advance_streak, award_xp, XpAward};
use crate::model::Profile;

/// An applied award: the fresh profile copy plus what changed.
#[derive(Debug)]
pub struct GrantedXp {
    pub profile: Profile,
    pub award: XpAward,
    pub amount: i64,
}

/// Grant `amount` XP to the signed-in user and persist the result.
///
/// Returns `Ok(None)` when logged out. The profile is fetched (created on
/// first sight), run through the accountant, patched on the backend, and
/// the cached copy replaced wholesale with the reply.
pub async fn grant_xp(
    client: &BackendClient,
    auth: &AuthState,
    amount: i64,
    today: NaiveDate,
) -> Result<Option<GrantedXp>> {
    let Some(user_id) = auth.user_id() else {
        return Ok(None);
    };

    let profile = client.ensure_profile(user_id, None).await?;
    let award = award_xp(&profile, amount)?;
    let (streak, last_activity) =
        advance_streak(profile.current_streak, profile.last_activity_date, today);

    let fresh = client
        .update_profile(
            user_id,
            &json!({
                "xp": award.new_xp,
                "level": award.new_level,
                "current_streak": streak,
                "last_activity_date": last_activity.to_string(),
            }),
        )
        .await?;

    Ok(Some(GrantedXp {
        profile: fresh,
        award,
        amount,
    }))
}

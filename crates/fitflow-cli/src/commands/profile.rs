use clap::Subcommand;
use serde_json::json;

use fitflow_core::storage::Database;

use super::{print_json, runtime, signed_client, CliResult};

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show XP, level and streak
    Show,
}

pub fn run(action: ProfileAction) -> CliResult {
    let db = Database::open()?;
    let (client, auth) = signed_client(&db)?;

    match action {
        ProfileAction::Show => {
            let Some(user_id) = auth.user_id() else {
                return print_json(&json!({ "note": "not signed in" }));
            };
            let rt = runtime()?;
            let profile = rt.block_on(client.ensure_profile(user_id, None))?;
            print_json(&json!({
                "username": profile.display_name(),
                "xp": profile.xp,
                "level": profile.level,
                "level_progress": profile.level_progress(),
                "current_streak": profile.current_streak,
                "last_activity_date": profile.last_activity_date,
            }))?;
        }
    }
    Ok(())
}

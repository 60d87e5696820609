use clap::Subcommand;
use serde_json::json;

use fitflow_core::habits::{completed_ids, HabitTracker};
use fitflow_core::model::NewHabit;
use fitflow_core::storage::Database;

use super::{print_json, runtime, signed_client, today, CliResult};

#[derive(Subcommand)]
pub enum HabitAction {
    /// List habits with today's completion state
    List,
    /// Flip today's completion for a habit
    Toggle {
        /// Habit id
        habit_id: String,
    },
    /// Create a habit
    Add {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "dumbbell")]
        icon: String,
        #[arg(long, default_value = "1")]
        target_count: u32,
    },
    /// Create the default habit set if none exist yet
    Bootstrap,
}

pub fn run(action: HabitAction) -> CliResult {
    let db = Database::open()?;
    let (client, auth) = signed_client(&db)?;
    let rt = runtime()?;

    match action {
        HabitAction::List => {
            let Some(user_id) = auth.user_id() else {
                return not_signed_in();
            };
            let (habits, logs) = rt.block_on(async {
                let habits = client.list_habits(user_id).await?;
                let logs = client.logs_for_day(user_id, today()).await?;
                Ok::<_, fitflow_core::CoreError>((habits, logs))
            })?;
            let done = completed_ids(&logs);
            let rows: Vec<_> = habits
                .iter()
                .map(|h| {
                    json!({
                        "id": h.id,
                        "title": h.title,
                        "icon": h.icon,
                        "completed": done.contains(h.id.as_str()),
                    })
                })
                .collect();
            print_json(&rows)?;
        }
        HabitAction::Toggle { habit_id } => {
            let tracker = HabitTracker::new(&client, &auth);
            match rt.block_on(tracker.toggle(&habit_id, today()))? {
                Some(outcome) => {
                    let mut out = json!({
                        "habit_id": outcome.habit_id,
                        "completed": outcome.completed,
                    });
                    if let Some(granted) = &outcome.granted {
                        out["xp_awarded"] = json!(granted.amount);
                        out["new_xp"] = json!(granted.award.new_xp);
                        out["new_level"] = json!(granted.award.new_level);
                        out["leveled_up"] = json!(granted.award.leveled_up);
                    }
                    print_json(&out)?;
                }
                None => return not_signed_in(),
            }
        }
        HabitAction::Add {
            title,
            icon,
            target_count,
        } => {
            let Some(user_id) = auth.user_id() else {
                return not_signed_in();
            };
            let habit = rt.block_on(client.create_habit(
                user_id,
                &NewHabit {
                    title,
                    icon,
                    target_count,
                },
            ))?;
            print_json(&habit)?;
        }
        HabitAction::Bootstrap => {
            let tracker = HabitTracker::new(&client, &auth);
            match rt.block_on(tracker.bootstrap_defaults())? {
                Some(habits) => print_json(&habits)?,
                None => return not_signed_in(),
            }
        }
    }
    Ok(())
}

fn not_signed_in() -> CliResult {
    print_json(&json!({ "note": "not signed in; nothing changed" }))
}

use clap::Subcommand;
use serde_json::json;

use fitflow_core::journal;
use fitflow_core::model::Mood;
use fitflow_core::storage::Database;

use super::{print_json, runtime, signed_client, CliResult};

#[derive(Subcommand)]
pub enum JournalAction {
    /// Save an entry
    Add {
        /// Entry text
        content: String,
        /// Mood: pumped, strong, neutral, tired or sore (symbol also works)
        #[arg(long, default_value = "strong")]
        mood: String,
    },
    /// List recent entries, newest first
    List {
        #[arg(long, default_value = "10")]
        limit: u32,
    },
}

pub fn run(action: JournalAction) -> CliResult {
    let db = Database::open()?;
    let (client, auth) = signed_client(&db)?;
    let rt = runtime()?;

    match action {
        JournalAction::Add { content, mood } => {
            let mood: Mood = mood.parse().map_err(|e: String| -> Box<dyn std::error::Error> { e.into() })?;
            match rt.block_on(journal::save_entry(&client, &auth, &content, mood))? {
                Some(entry) => print_json(&entry)?,
                None => print_json(&json!({ "note": "not signed in; nothing saved" }))?,
            }
        }
        JournalAction::List { limit } => {
            let entries = rt.block_on(journal::recent(&client, &auth, limit))?;
            print_json(&entries)?;
        }
    }
    Ok(())
}

use clap::Subcommand;
use serde_json::json;

use fitflow_core::storage::Database;
use fitflow_core::{AppShortcut, ShortcutStore};

use super::{print_json, CliResult};

#[derive(Subcommand)]
pub enum ShortcutAction {
    /// List the shortcut tiles
    List,
    /// Add a tile, or replace one by passing its id
    Set {
        #[arg(long)]
        name: String,
        #[arg(long)]
        url: String,
        #[arg(long, default_value = "link")]
        icon: String,
        #[arg(long, default_value = "blue")]
        color: String,
        /// Existing tile id to replace
        #[arg(long)]
        id: Option<String>,
    },
    /// Remove a tile by id
    Remove { id: String },
    /// Restore the default grid
    Reset,
}

pub fn run(action: ShortcutAction) -> CliResult {
    let db = Database::open()?;
    let store = ShortcutStore::new(&db);

    match action {
        ShortcutAction::List => {
            print_json(&store.load()?)?;
        }
        ShortcutAction::Set {
            name,
            url,
            icon,
            color,
            id,
        } => {
            let shortcut = match id {
                Some(id) => AppShortcut {
                    id,
                    name,
                    icon,
                    url,
                    color,
                },
                None => AppShortcut::new(&name, &icon, &url, &color),
            };
            print_json(&store.upsert(shortcut)?)?;
        }
        ShortcutAction::Remove { id } => {
            let removed = store.remove(&id)?;
            print_json(&json!({ "removed": removed }))?;
        }
        ShortcutAction::Reset => {
            print_json(&store.reset()?)?;
        }
    }
    Ok(())
}

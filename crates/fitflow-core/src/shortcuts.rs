//! Customizable deep-link shortcut tiles.
//!
//! The one piece of state the spec keeps local: a small list of app links
//! stored as JSON under a single key in the kv store. Unset means the
//! default grid.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;
use crate::storage::Database;

const SHORTCUTS_KEY: &str = "app_shortcuts";

/// One tile in the launcher grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppShortcut {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub url: String,
    pub color: String,
}

impl AppShortcut {
    pub fn new(name: &str, icon: &str, url: &str, color: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            icon: icon.to_string(),
            url: url.to_string(),
            color: color.to_string(),
        }
    }
}

/// The stock grid.
pub fn default_shortcuts() -> Vec<AppShortcut> {
    [
        ("1", "Cult Fit", "dumbbell", "cultfit://", "orange"),
        ("2", "Hevy", "activity", "hevy://", "blue"),
        ("3", "Music", "music", "music://", "cyan"),
        ("4", "Notion", "file-text", "notion://", "black"),
        ("5", "ChatGPT", "message-square", "https://chat.openai.com", "green"),
        ("6", "Insta Cam", "camera", "instagram://camera", "pink"),
    ]
    .into_iter()
    .map(|(id, name, icon, url, color)| AppShortcut {
        id: id.to_string(),
        name: name.to_string(),
        icon: icon.to_string(),
        url: url.to_string(),
        color: color.to_string(),
    })
    .collect()
}

/// kv-backed shortcut list.
pub struct ShortcutStore<'a> {
    db: &'a Database,
}

impl<'a> ShortcutStore<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// The stored list, or the defaults when nothing was saved yet.
    pub fn load(&self) -> Result<Vec<AppShortcut>> {
        match self.db.kv_get(SHORTCUTS_KEY)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(default_shortcuts()),
        }
    }

    pub fn save(&self, shortcuts: &[AppShortcut]) -> Result<()> {
        self.db
            .kv_set(SHORTCUTS_KEY, &serde_json::to_string(shortcuts)?)
    }

    /// Insert or replace by id.
    pub fn upsert(&self, shortcut: AppShortcut) -> Result<Vec<AppShortcut>> {
        let mut shortcuts = self.load()?;
        match shortcuts.iter_mut().find(|s| s.id == shortcut.id) {
            Some(slot) => *slot = shortcut,
            None => shortcuts.push(shortcut),
        }
        self.save(&shortcuts)?;
        Ok(shortcuts)
    }

    /// Remove by id. Returns whether anything was removed.
    pub fn remove(&self, id: &str) -> Result<bool> {
        let mut shortcuts = self.load()?;
        let before = shortcuts.len();
        shortcuts.retain(|s| s.id != id);
        let removed = shortcuts.len() != before;
        if removed {
            self.save(&shortcuts)?;
        }
        Ok(removed)
    }

    /// Back to the stock grid.
    pub fn reset(&self) -> Result<Vec<AppShortcut>> {
        self.db.kv_delete(SHORTCUTS_KEY)?;
        Ok(default_shortcuts())
    }
}

//! TOML-based application configuration.
//!
//! Stores the hosted backend coordinates and notification preferences.
//! Configuration is stored at `~/.config/fitflow/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::{ConfigError, Result};

/// Hosted backend coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_backend_url")]
    pub url: String,
    /// Public (anon) API key sent with every request.
    #[serde(default)]
    pub anon_key: String,
}

/// Notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Override for the motivational quote rotation. Empty means use the
    /// built-in list.
    #[serde(default)]
    pub motivational_quotes: Vec<String>,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/fitflow/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
}

fn default_backend_url() -> String {
    "http://localhost:54321".into()
}

fn default_true() -> bool {
    true
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
            anon_key: String::new(),
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            motivational_quotes: Vec::new(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            notifications: NotificationsConfig::default(),
        }
    }
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk, writing and returning the default when absent.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config =
                    toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                        path: path.to_path_buf(),
                        message: e.to_string(),
                    })?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key, in memory only.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json)?;
        Ok(())
    }

    /// Set a config value by key and persist. Errors on unknown keys.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.set_value(key, value)?;
        self.save()
    }
}

fn get_json_value_by_path<'a>(
    root: &'a serde_json::Value,
    key: &str,
) -> Option<&'a serde_json::Value> {
    if key.is_empty() {
        return None;
    }
    let mut current = root;
    for part in key.split('.') {
        current = current.get(part)?;
    }
    Some(current)
}

fn set_json_value_by_path(
    root: &mut serde_json::Value,
    key: &str,
    value: &str,
) -> Result<()> {
    let mut current = root;
    let parts: Vec<&str> = key.split('.').collect();
    for part in &parts[..parts.len().saturating_sub(1)] {
        current = current
            .get_mut(*part)
            .ok_or_else(|| ConfigError::MissingKey(key.to_string()))?;
    }
    let last = parts
        .last()
        .ok_or_else(|| ConfigError::MissingKey(key.to_string()))?;
    let slot = current
        .get_mut(*last)
        .ok_or_else(|| ConfigError::MissingKey(key.to_string()))?;

    // Coerce the string to the slot's existing JSON type.
    *slot = match slot {
        serde_json::Value::Bool(_) => serde_json::Value::Bool(value.parse().map_err(|_| {
            ConfigError::ParseFailed(format!("expected true/false for '{key}'"))
        })?),
        serde_json::Value::Number(_) => {
            serde_json::Value::Number(value.parse::<i64>().map_err(|_| {
                ConfigError::ParseFailed(format!("expected a number for '{key}'"))
            })?.into())
        }
        serde_json::Value::Array(_) => serde_json::from_str(value)
            .map_err(|_| ConfigError::ParseFailed(format!("expected a JSON array for '{key}'")))?,
        _ => serde_json::Value::String(value.to_string()),
    };
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let cfg = Config::default();
        assert_eq!(cfg.backend.url, "http://localhost:54321");
        assert!(cfg.notifications.enabled);
        assert!(cfg.notifications.motivational_quotes.is_empty());
    }

    #[test]
    fn dot_path_get_and_set() {
        let mut cfg = Config::default();
        cfg.set_value("backend.url", "https://example.supabase.co")
            .unwrap();
        assert_eq!(
            cfg.get("backend.url").unwrap(),
            "https://example.supabase.co"
        );

        cfg.set_value("notifications.enabled", "false").unwrap();
        assert!(!cfg.notifications.enabled);

        assert!(cfg.set_value("no.such.key", "x").is_err());
        assert!(cfg.get("no.such.key").is_none());
    }

    #[test]
    fn quote_override_parses_as_json_array() {
        let mut cfg = Config::default();
        cfg.set_value(
            "notifications.motivational_quotes",
            r#"["one more rep", "go"]"#,
        )
        .unwrap();
        assert_eq!(cfg.notifications.motivational_quotes.len(), 2);
    }

    #[test]
    fn load_writes_default_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(cfg.backend.url, Config::default().backend.url);

        // And a saved config round-trips.
        let mut cfg2 = cfg;
        cfg2.backend.anon_key = "anon".into();
        cfg2.save_to(&path).unwrap();
        let back = Config::load_from(&path).unwrap();
        assert_eq!(back.backend.anon_key, "anon");
    }
}

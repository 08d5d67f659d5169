//! Application settings persistence.
//!
//! A single JSON file in the configuration directory holding small string
//! values (the recent-projects list among them). Unknown keys are preserved
//! so newer versions can add settings without older versions dropping them.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{MixboardError, Result};

/// Settings file name inside the configuration directory.
pub const SETTINGS_FILE: &str = "settings.json";

/// Key under which the recent-projects string is stored.
pub const RECENT_PROJECTS_KEY: &str = "recentprojects";

/// String key/value settings backed by a JSON file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(flatten)]
    general: BTreeMap<String, String>,

    #[serde(skip)]
    path: PathBuf,
}

impl Settings {
    /// Load settings from `config_dir/settings.json`.
    ///
    /// A missing file yields defaults; the file is created on the first
    /// [`Settings::save`].
    pub fn load(config_dir: &Path) -> Result<Self> {
        let path = config_dir.join(SETTINGS_FILE);
        if !path.exists() {
            debug!("[SETTINGS] no settings file at {}, using defaults", path.display());
            return Ok(Self {
                general: BTreeMap::new(),
                path,
            });
        }

        let content = fs::read_to_string(&path).map_err(|e| MixboardError::FileReadError {
            path: path.clone(),
            source: e,
        })?;
        let mut settings: Settings = serde_json::from_str(&content)?;
        settings.path = path;
        Ok(settings)
    }

    /// Persist settings, creating the configuration directory if needed.
    pub fn save(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir).map_err(|e| MixboardError::DirectoryCreateError {
                    path: dir.to_path_buf(),
                    source: e,
                })?;
            }
        }
        let json = serde_json::to_string_pretty(&self.general)?;
        fs::write(&self.path, json).map_err(|e| MixboardError::FileWriteError {
            path: self.path.clone(),
            source: e,
        })
    }

    /// Get a setting.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.general.get(key).map(String::as_str)
    }

    /// Set a setting. Not persisted until [`Settings::save`].
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.general.insert(key.into(), value.into());
    }

    /// The stored recent-projects string, empty if unset.
    pub fn recent_projects(&self) -> &str {
        self.get(RECENT_PROJECTS_KEY).unwrap_or("")
    }

    /// Replace the stored recent-projects string.
    pub fn set_recent_projects(&mut self, serialized: impl Into<String>) {
        self.set(RECENT_PROJECTS_KEY, serialized);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(dir.path()).unwrap();
        assert_eq!(settings.recent_projects(), "");
        assert!(settings.get("anything").is_none());
    }

    #[test]
    fn test_settings_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = Settings::load(dir.path()).unwrap();
        settings.set_recent_projects("/tmp/a.mix|A");
        settings.set("theme", "dark");
        settings.save().unwrap();

        let reloaded = Settings::load(dir.path()).unwrap();
        assert_eq!(reloaded.recent_projects(), "/tmp/a.mix|A");
        assert_eq!(reloaded.get("theme"), Some("dark"));
    }

    #[test]
    fn test_save_creates_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("config").join("mixboard");
        let mut settings = Settings::load(&nested).unwrap();
        settings.set("a", "b");
        settings.save().unwrap();
        assert!(nested.join(SETTINGS_FILE).exists());
    }

    #[test]
    fn test_unknown_keys_preserved() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(SETTINGS_FILE),
            r#"{"futurekey": "futurevalue"}"#,
        )
        .unwrap();

        let mut settings = Settings::load(dir.path()).unwrap();
        settings.set_recent_projects("");
        settings.save().unwrap();

        let reloaded = Settings::load(dir.path()).unwrap();
        assert_eq!(reloaded.get("futurekey"), Some("futurevalue"));
    }
}

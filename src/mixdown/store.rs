//! Mixdown profile store.
//!
//! Profiles are named, ordered lists of mixdown actions persisted one file
//! per profile (`<name>.profile`, JSON) in a configured directory. A single
//! observer is notified on save/delete and on per-action resolution failures
//! so a secondary in-memory model (the profile selection menu) can stay in
//! sync.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

use super::actions::{ActionConfig, MixdownAction};
use super::registry::ActionRegistry;
use crate::error::{MixboardError, Result};

/// Extension put on the end of mixdown profile files.
pub const PROFILE_EXT: &str = "profile";

/// Whether a profile was saved or deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileUpdateKind {
    Saved,
    Deleted,
}

/// Observer of profile store changes.
pub trait ProfileObserver {
    /// A profile was saved or deleted.
    fn profile_updated(&mut self, name: &str, kind: ProfileUpdateKind);

    /// An action in a profile could not be resolved.
    ///
    /// `extension` names the extension the action came from, or the action
    /// kind itself for actions with no recorded source.
    fn action_load_error(&mut self, action: &str, extension: &str);
}

/// Serialized form of one action within a profile file.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredAction {
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    source_extension: Option<String>,
    #[serde(default)]
    config: ActionConfig,
}

/// Serialized form of a profile file.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredProfile {
    saved_at: DateTime<Utc>,
    actions: Vec<StoredAction>,
}

/// CRUD over named profiles backed by a directory of profile files.
pub struct ProfileStore {
    dir: PathBuf,
    observer: Option<Box<dyn ProfileObserver>>,
}

impl ProfileStore {
    /// Create a store over the given profiles directory, creating it if
    /// needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if !dir.exists() {
            fs::create_dir_all(&dir).map_err(|e| MixboardError::DirectoryCreateError {
                path: dir.clone(),
                source: e,
            })?;
        }
        Ok(Self {
            dir,
            observer: None,
        })
    }

    /// Register the single store observer.
    pub fn set_observer(&mut self, observer: Box<dyn ProfileObserver>) {
        self.observer = Some(observer);
    }

    /// The profiles directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// List profile names, lexicographically sorted.
    ///
    /// Directory order is not portable, so the listing is sorted to give a
    /// deterministic order everywhere.
    pub fn list_profiles(&self) -> Result<Vec<String>> {
        let entries = fs::read_dir(&self.dir).map_err(|e| MixboardError::DirectoryListError {
            path: self.dir.clone(),
            source: e,
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| MixboardError::DirectoryListError {
                path: self.dir.clone(),
                source: e,
            })?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some(PROFILE_EXT) {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort_unstable();
        Ok(names)
    }

    /// Write or overwrite the named profile with the given action list.
    pub fn save_profile(&mut self, name: &str, actions: &[Box<dyn MixdownAction>]) -> Result<()> {
        let name = validate_name(name)?;
        let stored = StoredProfile {
            saved_at: Utc::now(),
            actions: actions
                .iter()
                .map(|action| StoredAction {
                    kind: action.kind().to_string(),
                    source_extension: action.source_extension().map(str::to_string),
                    config: action.config().clone(),
                })
                .collect(),
        };

        let path = self.profile_path(name);
        let json = serde_json::to_string_pretty(&stored)?;
        fs::write(&path, json).map_err(|e| MixboardError::FileWriteError {
            path: path.clone(),
            source: e,
        })?;

        debug!("[PROFILES] saved '{}' ({} actions)", name, actions.len());
        self.emit_updated(name, ProfileUpdateKind::Saved);
        Ok(())
    }

    /// Remove the named profile.
    ///
    /// A missing file is tolerated: it is logged at debug level and no
    /// deletion event is raised, matching a profile list that may already be
    /// out of date.
    pub fn delete_profile(&mut self, name: &str) -> Result<()> {
        let name = validate_name(name)?;
        let path = self.profile_path(name);

        if !path.exists() {
            debug!("[PROFILES] cannot remove '{}': no such profile", name);
            return Ok(());
        }

        fs::remove_file(&path).map_err(|e| MixboardError::FileRemoveError {
            path: path.clone(),
            source: e,
        })?;

        debug!("[PROFILES] deleted '{}'", name);
        self.emit_updated(name, ProfileUpdateKind::Deleted);
        Ok(())
    }

    /// Load the actions of the named profile, in stored order.
    ///
    /// Each stored action is resolved against the registry; an unresolvable
    /// kind (e.g. its providing extension is unavailable) raises an
    /// action-load-error on the observer and is skipped, so the remaining
    /// resolvable actions still load.
    pub fn load_actions(
        &mut self,
        name: &str,
        registry: &ActionRegistry,
    ) -> Result<Vec<Box<dyn MixdownAction>>> {
        let name = validate_name(name)?;
        let path = self.profile_path(name);
        if !path.exists() {
            return Err(MixboardError::ProfileNotFound {
                name: name.to_string(),
            });
        }

        let content = fs::read_to_string(&path).map_err(|e| MixboardError::FileReadError {
            path: path.clone(),
            source: e,
        })?;
        let stored: StoredProfile = serde_json::from_str(&content)?;

        let mut actions = Vec::new();
        for record in stored.actions {
            match registry.resolve(&record.kind, record.config) {
                Some(action) => actions.push(action),
                None => {
                    let extension = record
                        .source_extension
                        .as_deref()
                        .unwrap_or(record.kind.as_str());
                    debug!(
                        "[PROFILES] cannot load action '{}' from '{}'",
                        record.kind, extension
                    );
                    if let Some(observer) = self.observer.as_mut() {
                        observer.action_load_error(&record.kind, extension);
                    }
                }
            }
        }
        Ok(actions)
    }

    /// Whether the named profile exists on disk.
    pub fn profile_exists(&self, name: &str) -> bool {
        validate_name(name)
            .map(|name| self.profile_path(name).exists())
            .unwrap_or(false)
    }

    fn profile_path(&self, name: &str) -> PathBuf {
        // Tolerate callers passing the full file name.
        let file = if name.ends_with(&format!(".{PROFILE_EXT}")) {
            name.to_string()
        } else {
            format!("{name}.{PROFILE_EXT}")
        };
        self.dir.join(file)
    }

    fn emit_updated(&mut self, name: &str, kind: ProfileUpdateKind) {
        if let Some(observer) = self.observer.as_mut() {
            observer.profile_updated(name, kind);
        }
    }
}

/// Profile names must be usable as file stems.
fn validate_name(name: &str) -> Result<&str> {
    if name.is_empty() {
        return Err(MixboardError::InvalidProfileName {
            name: name.to_string(),
            reason: "empty name".to_string(),
        });
    }
    if name.contains(std::path::is_separator) || name.contains("..") {
        return Err(MixboardError::InvalidProfileName {
            name: name.to_string(),
            reason: "name contains path components".to_string(),
        });
    }
    Ok(name)
}

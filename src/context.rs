//! Application context.
//!
//! One explicitly constructed object holding what used to be process-wide
//! state: settings, the action registry and the data directory layout.
//! Components borrow the pieces they need; there are no globals.
//!
//! Lifecycle: [`AppContext::init`] at application start, [`AppContext::shutdown`]
//! at exit (persists settings). Dropping without `shutdown` loses no data
//! other than unsaved settings changes.

use std::path::{Path, PathBuf};

use log::info;

use crate::config::Settings;
use crate::error::Result;
use crate::mixdown::{ActionRegistry, ProfileStore};
use crate::recent::RecentProjects;

/// Directory under the data dir holding mixdown profiles.
pub const PROFILES_DIR: &str = "mixdownprofiles";

/// Explicitly-constructed application-wide state.
pub struct AppContext {
    data_dir: PathBuf,
    /// Persisted settings.
    pub settings: Settings,
    /// Known mixdown action kinds (core ones pre-registered).
    pub action_registry: ActionRegistry,
    /// Mixdown profile persistence.
    pub profile_store: ProfileStore,
    /// Recent-projects list, loaded from settings.
    pub recent_projects: RecentProjects,
}

impl AppContext {
    /// Initialize the context over a data directory.
    ///
    /// Loads settings, restores the recent-projects list (dropping stale
    /// entries) and ensures the profiles directory exists.
    pub fn init(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        info!("[CONTEXT] initializing in {}", data_dir.display());

        let settings = Settings::load(&data_dir)?;
        let recent_projects = RecentProjects::load(settings.recent_projects());
        let profile_store = ProfileStore::new(data_dir.join(PROFILES_DIR))?;

        Ok(Self {
            data_dir,
            settings,
            action_registry: ActionRegistry::with_builtins(),
            profile_store,
            recent_projects,
        })
    }

    /// The data directory this context was initialized over.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Record a project open in the recent list and persist settings.
    pub fn remember_project(&mut self, path: impl Into<PathBuf>, name: impl Into<String>) -> Result<()> {
        self.recent_projects.insert(path, name);
        self.persist_recent()
    }

    /// Clear the recent list and persist settings.
    pub fn clear_recent_projects(&mut self) -> Result<()> {
        self.recent_projects.clear();
        self.persist_recent()
    }

    /// Persist settings and tear the context down.
    pub fn shutdown(mut self) -> Result<()> {
        info!("[CONTEXT] shutting down");
        self.settings
            .set_recent_projects(self.recent_projects.serialize());
        self.settings.save()
    }

    fn persist_recent(&mut self) -> Result<()> {
        self.settings
            .set_recent_projects(self.recent_projects.serialize());
        self.settings.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mixdown::{EXPORT_FILE_TYPE_KIND, RUN_SCRIPT_KIND};

    #[test]
    fn test_init_creates_profiles_dir() {
        let dir = tempfile::tempdir().unwrap();
        let context = AppContext::init(dir.path()).unwrap();
        assert!(dir.path().join(PROFILES_DIR).is_dir());
        assert!(context.action_registry.contains(RUN_SCRIPT_KIND));
        assert!(context.action_registry.contains(EXPORT_FILE_TYPE_KIND));
    }

    #[test]
    fn test_recent_projects_survive_restart() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("song.mix");
        std::fs::write(&project, b"").unwrap();

        {
            let mut context = AppContext::init(dir.path()).unwrap();
            context.remember_project(&project, "Song").unwrap();
            context.shutdown().unwrap();
        }

        let context = AppContext::init(dir.path()).unwrap();
        assert_eq!(context.recent_projects.len(), 1);
        assert_eq!(context.recent_projects.entries()[0].name, "Song");
        assert_eq!(
            context.recent_projects.last_opened().unwrap().name,
            "Song"
        );
    }

    #[test]
    fn test_clear_recent_projects_persists() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("song.mix");
        std::fs::write(&project, b"").unwrap();

        let mut context = AppContext::init(dir.path()).unwrap();
        context.remember_project(&project, "Song").unwrap();
        context.clear_recent_projects().unwrap();
        context.shutdown().unwrap();

        let context = AppContext::init(dir.path()).unwrap();
        assert!(context.recent_projects.is_empty());
    }
}

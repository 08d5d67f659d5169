//! Mixdown actions.
//!
//! An action is one unit of work executed during mixdown. The two core kinds
//! are exporting the project to a file format and running an external script
//! over the result; optional extensions contribute further kinds through the
//! action registry.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::Command;

use log::{debug, info};

use crate::error::{MixboardError, Result};
use crate::project::Project;

/// Persisted action parameters, keyed by name.
///
/// A `BTreeMap` keeps the serialized form deterministic.
pub type ActionConfig = BTreeMap<String, String>;

/// Fetch a required configuration key.
pub(crate) fn require_key<'a>(config: &'a ActionConfig, key: &str) -> Result<&'a str> {
    config
        .get(key)
        .map(String::as_str)
        .ok_or_else(|| MixboardError::ActionConfigMissing {
            key: key.to_string(),
        })
}

/// A polymorphic unit of mixdown work.
pub trait MixdownAction: std::fmt::Debug {
    /// Stable identifier of the action kind, used for registry lookup and
    /// profile persistence.
    fn kind(&self) -> &str;

    /// Name of the extension that provides this kind, if any.
    ///
    /// Core actions return `None`. The name is persisted alongside the kind
    /// so a missing extension can be reported by name at load time.
    fn source_extension(&self) -> Option<&str> {
        None
    }

    /// Current configuration.
    fn config(&self) -> &ActionConfig;

    /// Mutable configuration, for the configuration UI.
    fn config_mut(&mut self) -> &mut ActionConfig;

    /// Execute the action against the project.
    fn run(&mut self, project: &mut Project) -> Result<()>;
}

/// Kind identifier for [`RunScript`].
pub const RUN_SCRIPT_KIND: &str = "run-a-script";

/// Kind identifier for [`ExportFileType`].
pub const EXPORT_FILE_TYPE_KIND: &str = "export-as-file-type";

/// Run an external script after mixdown.
///
/// Configuration: `script` — path of the executable to run.
#[derive(Debug, Default)]
pub struct RunScript {
    config: ActionConfig,
}

impl RunScript {
    pub fn new(script: impl Into<String>) -> Self {
        let mut config = ActionConfig::new();
        config.insert("script".to_string(), script.into());
        Self { config }
    }

    pub fn from_config(config: ActionConfig) -> Self {
        Self { config }
    }
}

impl MixdownAction for RunScript {
    fn kind(&self) -> &str {
        RUN_SCRIPT_KIND
    }

    fn config(&self) -> &ActionConfig {
        &self.config
    }

    fn config_mut(&mut self) -> &mut ActionConfig {
        &mut self.config
    }

    fn run(&mut self, _project: &mut Project) -> Result<()> {
        let script = require_key(&self.config, "script")?;
        info!("[MIXDOWN] running script {}", script);

        let status = Command::new(script)
            .status()
            .map_err(|e| MixboardError::ActionFailed {
                kind: RUN_SCRIPT_KIND.to_string(),
                reason: format!("could not launch '{script}': {e}"),
            })?;

        if !status.success() {
            return Err(MixboardError::ActionFailed {
                kind: RUN_SCRIPT_KIND.to_string(),
                reason: format!("'{script}' exited with {status}"),
            });
        }
        Ok(())
    }
}

/// Export the project to a file format.
///
/// Configuration: `filename`, `location`, `filetype` and `pipeline` (the
/// engine's encoder pipeline description for the chosen format).
#[derive(Debug, Default)]
pub struct ExportFileType {
    config: ActionConfig,
}

impl ExportFileType {
    pub fn new(
        filename: impl Into<String>,
        location: impl Into<String>,
        filetype: impl Into<String>,
        pipeline: impl Into<String>,
    ) -> Self {
        let mut config = ActionConfig::new();
        config.insert("filename".to_string(), filename.into());
        config.insert("location".to_string(), location.into());
        config.insert("filetype".to_string(), filetype.into());
        config.insert("pipeline".to_string(), pipeline.into());
        Self { config }
    }

    pub fn from_config(config: ActionConfig) -> Self {
        Self { config }
    }

    /// The output path this action will write to.
    pub fn target_path(&self) -> Result<PathBuf> {
        let filename = require_key(&self.config, "filename")?;
        let location = require_key(&self.config, "location")?;
        let filetype = require_key(&self.config, "filetype")?;
        Ok(PathBuf::from(location).join(format!("{filename}.{filetype}")))
    }
}

impl MixdownAction for ExportFileType {
    fn kind(&self) -> &str {
        EXPORT_FILE_TYPE_KIND
    }

    fn config(&self) -> &ActionConfig {
        &self.config
    }

    fn config_mut(&mut self) -> &mut ActionConfig {
        &mut self.config
    }

    fn run(&mut self, project: &mut Project) -> Result<()> {
        let target = self.target_path()?;
        let pipeline = require_key(&self.config, "pipeline")?;
        debug!("[MIXDOWN] export action -> {}", target.display());
        project.export(&target, pipeline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::NullEngine;
    use crate::project::AudioState;

    #[test]
    fn test_run_script_kind_and_config() {
        let action = RunScript::new("/usr/local/bin/normalize.sh");
        assert_eq!(action.kind(), RUN_SCRIPT_KIND);
        assert_eq!(
            action.config().get("script").unwrap(),
            "/usr/local/bin/normalize.sh"
        );
        assert!(action.source_extension().is_none());
    }

    #[test]
    fn test_run_script_missing_config_key() {
        let mut action = RunScript::from_config(ActionConfig::new());
        let mut project = Project::new("Demo", Box::new(NullEngine));
        let err = action.run(&mut project).unwrap_err();
        assert!(matches!(
            err,
            MixboardError::ActionConfigMissing { ref key } if key == "script"
        ));
    }

    #[test]
    fn test_run_script_launch_failure() {
        let mut action = RunScript::new("/nonexistent/script.sh");
        let mut project = Project::new("Demo", Box::new(NullEngine));
        let err = action.run(&mut project).unwrap_err();
        assert!(matches!(err, MixboardError::ActionFailed { .. }));
    }

    #[test]
    fn test_export_target_path() {
        let action = ExportFileType::new("final", "/tmp/mixes", "ogg", "vorbisenc ! oggmux");
        assert_eq!(
            action.target_path().unwrap(),
            PathBuf::from("/tmp/mixes/final.ogg")
        );
    }

    #[test]
    fn test_export_run_marks_project_exporting() {
        let mut action = ExportFileType::new("final", "/tmp/mixes", "ogg", "vorbisenc ! oggmux");
        let mut project = Project::new("Demo", Box::new(NullEngine));
        action.run(&mut project).unwrap();
        assert_eq!(project.audio_state(), AudioState::Exporting);
    }
}

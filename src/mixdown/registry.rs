//! Action registry.
//!
//! Maps action-kind identifiers to factories that rebuild the action from
//! persisted parameters. The two core kinds are pre-registered; optional
//! extensions register further kinds at startup. Lookup failure is reported
//! per action by the profile store, never as a fatal load error.

use std::collections::HashMap;

use log::debug;

use super::actions::{
    ActionConfig, ExportFileType, MixdownAction, RunScript, EXPORT_FILE_TYPE_KIND, RUN_SCRIPT_KIND,
};

/// Factory instantiating an action from its persisted configuration.
pub type ActionFactory = Box<dyn Fn(ActionConfig) -> Box<dyn MixdownAction>>;

/// Registry of known mixdown action kinds.
///
/// Owned by the application context and passed by reference; never a
/// process-wide global.
#[derive(Default)]
pub struct ActionRegistry {
    factories: HashMap<String, ActionFactory>,
}

impl ActionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the core action kinds pre-registered.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(RUN_SCRIPT_KIND, |config| {
            Box::new(RunScript::from_config(config))
        });
        registry.register(EXPORT_FILE_TYPE_KIND, |config| {
            Box::new(ExportFileType::from_config(config))
        });
        registry
    }

    /// Register an action kind. Re-registering a kind replaces its factory.
    pub fn register<F>(&mut self, kind: impl Into<String>, factory: F)
    where
        F: Fn(ActionConfig) -> Box<dyn MixdownAction> + 'static,
    {
        let kind = kind.into();
        debug!("[REGISTRY] registered action kind '{}'", kind);
        self.factories.insert(kind, Box::new(factory));
    }

    /// Remove an action kind (extension unloaded).
    pub fn deregister(&mut self, kind: &str) -> bool {
        self.factories.remove(kind).is_some()
    }

    /// Instantiate an action of the given kind, or `None` if unknown.
    pub fn resolve(&self, kind: &str, config: ActionConfig) -> Option<Box<dyn MixdownAction>> {
        self.factories.get(kind).map(|factory| factory(config))
    }

    /// Whether a kind is registered.
    pub fn contains(&self, kind: &str) -> bool {
        self.factories.contains_key(kind)
    }

    /// All registered kind identifiers, sorted.
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::project::Project;

    #[test]
    fn test_builtins_are_registered() {
        let registry = ActionRegistry::with_builtins();
        assert!(registry.contains(RUN_SCRIPT_KIND));
        assert!(registry.contains(EXPORT_FILE_TYPE_KIND));
        assert_eq!(
            registry.kinds(),
            vec![EXPORT_FILE_TYPE_KIND, RUN_SCRIPT_KIND]
        );
    }

    #[test]
    fn test_resolve_rebuilds_action_from_config() {
        let registry = ActionRegistry::with_builtins();
        let mut config = ActionConfig::new();
        config.insert("script".to_string(), "/bin/true".to_string());

        let action = registry.resolve(RUN_SCRIPT_KIND, config).unwrap();
        assert_eq!(action.kind(), RUN_SCRIPT_KIND);
        assert_eq!(action.config().get("script").unwrap(), "/bin/true");
    }

    #[test]
    fn test_resolve_unknown_kind() {
        let registry = ActionRegistry::with_builtins();
        assert!(registry
            .resolve("nonexistent-action", ActionConfig::new())
            .is_none());
    }

    #[test]
    fn test_extension_kind_registration() {
        #[derive(Debug)]
        struct BurnToCd {
            config: ActionConfig,
        }
        impl MixdownAction for BurnToCd {
            fn kind(&self) -> &str {
                "burn-to-cd"
            }
            fn source_extension(&self) -> Option<&str> {
                Some("CD Burner")
            }
            fn config(&self) -> &ActionConfig {
                &self.config
            }
            fn config_mut(&mut self) -> &mut ActionConfig {
                &mut self.config
            }
            fn run(&mut self, _project: &mut Project) -> Result<()> {
                Ok(())
            }
        }

        let mut registry = ActionRegistry::with_builtins();
        registry.register("burn-to-cd", |config| Box::new(BurnToCd { config }));
        assert!(registry.contains("burn-to-cd"));

        assert!(registry.deregister("burn-to-cd"));
        assert!(!registry.contains("burn-to-cd"));
        assert!(!registry.deregister("burn-to-cd"));
    }
}

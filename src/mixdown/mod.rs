//! Mixdown profiles and actions.
//!
//! A mixdown profile is a named, persisted, ordered list of actions to run
//! when mixing the project down (export to a format, run a script, ...).
//! Profiles live one file each in a configured directory; action kinds are
//! resolved against a registry so extensions can contribute their own.

pub mod actions;
pub mod registry;
pub mod store;

pub use actions::{
    ActionConfig, ExportFileType, MixdownAction, RunScript, EXPORT_FILE_TYPE_KIND, RUN_SCRIPT_KIND,
};
pub use registry::{ActionFactory, ActionRegistry};
pub use store::{ProfileObserver, ProfileStore, ProfileUpdateKind, PROFILE_EXT};

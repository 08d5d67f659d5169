//! Mixboard - Session Coordination Core
//!
//! Mixboard is the model/control core of a multi-track recording
//! application: the state around the audio engine, not the engine itself.
//!
//! # Architecture
//!
//! - `project` - the session model: instruments, audio state, undo journal
//! - `bridge` - the state bridge translating project notifications into
//!   control enablement and user intent into validated engine commands
//! - `mixdown` - named profiles of mixdown actions with a pluggable
//!   action-kind registry
//! - `recent` - the most-recently-used project list
//! - `context` - explicitly-constructed application state (settings,
//!   registry, directories) replacing process globals
//!
//! The audio pipeline is an external collaborator consumed through the
//! [`engine::AudioEngine`] command trait.

pub mod bridge;
pub mod cli;
pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod mixdown;
pub mod project;
pub mod recent;

pub use bridge::{ControlState, RecordBlocked, RecordOutcome, StateBridge};
pub use context::AppContext;
pub use engine::AudioEngine;
pub use error::{MixboardError, Result};
pub use project::{AudioState, Project, TransportMode};

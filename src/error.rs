//! Error types for Mixboard session coordination.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Mixboard operations.
pub type Result<T> = std::result::Result<T, MixboardError>;

/// Errors that can occur in the Mixboard core.
#[derive(Error, Debug)]
pub enum MixboardError {
    // File Errors
    #[error("Failed to read file: {path}: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}: {source}")]
    FileWriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to remove file: {path}: {source}")]
    FileRemoveError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory creation failed: {path}: {source}")]
    DirectoryCreateError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to list directory: {path}: {source}")]
    DirectoryListError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Serialization Errors
    #[error("JSON serialization error: {0}")]
    JsonSerializationError(#[from] serde_json::Error),

    // Profile Errors
    #[error("Mixdown profile not found: {name}")]
    ProfileNotFound { name: String },

    #[error("Invalid profile name: {name}: {reason}")]
    InvalidProfileName { name: String, reason: String },

    // Engine Errors
    #[error("Audio engine error: {reason}")]
    EngineError { reason: String },

    // Action Errors
    #[error("Mixdown action failed: {kind}: {reason}")]
    ActionFailed { kind: String, reason: String },

    #[error("Mixdown action is missing required configuration key: {key}")]
    ActionConfigMissing { key: String },

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

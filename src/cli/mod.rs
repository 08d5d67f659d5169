//! CLI Module
//!
//! Command-line interface for inspecting and editing Mixboard state
//! (mixdown profiles, the recent-projects list) without the GUI.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Mixboard session tools
#[derive(Parser, Debug)]
#[command(name = "mixboard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Data directory (settings and mixdown profiles)
    #[arg(short, long, global = true, default_value = ".mixboard")]
    pub data_dir: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage mixdown profiles
    #[command(subcommand)]
    Profile(ProfileCommands),

    /// Manage the recent-projects list
    #[command(subcommand)]
    Recent(RecentCommands),
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// List saved profiles
    List,

    /// Save a profile containing an export action
    Save {
        /// Profile name
        name: String,

        /// Export file name (without extension)
        #[arg(long, default_value = "mixdown")]
        filename: String,

        /// Export directory
        #[arg(long, default_value = ".")]
        location: String,

        /// Export file type
        #[arg(long, default_value = "ogg")]
        filetype: String,

        /// Script to run after the export
        #[arg(long)]
        script: Option<String>,
    },

    /// Delete a profile
    Delete {
        /// Profile name
        name: String,
    },

    /// Show the actions of a profile
    Show {
        /// Profile name
        name: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum RecentCommands {
    /// List recent projects, most recent first
    List,

    /// Add a project to the recent list
    Add {
        /// Path to the project file
        path: PathBuf,

        /// Display name
        name: String,
    },

    /// Clear the recent list
    Clear,
}

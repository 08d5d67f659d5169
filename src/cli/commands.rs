//! CLI Command Implementations
//!
//! Implements the actual logic for each CLI command against an
//! [`AppContext`].

use log::info;

use crate::cli::{ProfileCommands, RecentCommands};
use crate::context::AppContext;
use crate::error::Result;
use crate::mixdown::{ExportFileType, MixdownAction, RunScript};

/// Run a profile subcommand.
pub fn profile(context: &mut AppContext, cmd: ProfileCommands) -> Result<()> {
    match cmd {
        ProfileCommands::List => {
            let names = context.profile_store.list_profiles()?;
            if names.is_empty() {
                println!("No mixdown profiles saved.");
            }
            for name in names {
                println!("{name}");
            }
            Ok(())
        }

        ProfileCommands::Save {
            name,
            filename,
            location,
            filetype,
            script,
        } => {
            // The CLI only knows pipelines for a couple of formats; the GUI
            // offers the full encoder list.
            let pipeline = match filetype.as_str() {
                "ogg" => "vorbisenc ! oggmux",
                "flac" => "flacenc",
                "wav" => "wavenc",
                other => {
                    info!("no known pipeline for '{other}', leaving it to the engine");
                    ""
                }
            };

            let mut actions: Vec<Box<dyn MixdownAction>> = vec![Box::new(ExportFileType::new(
                filename, location, filetype, pipeline,
            ))];
            if let Some(script) = script {
                actions.push(Box::new(RunScript::new(script)));
            }

            context.profile_store.save_profile(&name, &actions)?;
            println!("Saved profile '{name}' ({} actions)", actions.len());
            Ok(())
        }

        ProfileCommands::Delete { name } => {
            context.profile_store.delete_profile(&name)?;
            println!("Deleted profile '{name}'");
            Ok(())
        }

        ProfileCommands::Show { name } => {
            // Split borrow: the store mutates (observer), the registry is read.
            let AppContext {
                profile_store,
                action_registry,
                ..
            } = context;
            let actions = profile_store.load_actions(&name, action_registry)?;
            println!("Profile '{name}':");
            for action in actions {
                println!("  {}", action.kind());
                for (key, value) in action.config() {
                    println!("    {key} = {value}");
                }
            }
            Ok(())
        }
    }
}

/// Run a recent-projects subcommand.
pub fn recent(context: &mut AppContext, cmd: RecentCommands) -> Result<()> {
    match cmd {
        RecentCommands::List => {
            if context.recent_projects.is_empty() {
                println!("No recent projects.");
            }
            for entry in context.recent_projects.entries() {
                println!("{}\t{}", entry.name, entry.path.display());
            }
            Ok(())
        }

        RecentCommands::Add { path, name } => {
            context.remember_project(path, name)?;
            println!("Recent projects: {}", context.recent_projects.len());
            Ok(())
        }

        RecentCommands::Clear => {
            context.clear_recent_projects()?;
            println!("Recent projects cleared.");
            Ok(())
        }
    }
}

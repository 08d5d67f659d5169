//! Mixboard CLI - Session Tools
//!
//! Command-line interface for the Mixboard session core.

use anyhow::Result;
use clap::Parser;
use env_logger::Env;

use mixboard::cli::{commands, Cli, Commands};
use mixboard::context::AppContext;

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut context = AppContext::init(&cli.data_dir)?;

    let result = match cli.command {
        Some(Commands::Profile(cmd)) => commands::profile(&mut context, cmd),
        Some(Commands::Recent(cmd)) => commands::recent(&mut context, cmd),
        None => {
            println!("Mixboard session tools v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for available commands");
            Ok(())
        }
    };

    context.shutdown()?;
    result?;
    Ok(())
}

//! syncrepo CLI
//!
//! Keeps a project directory in step with a template git repository.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: failed to set up logging: {}", "warning".yellow().bold(), e);
    }

    if let Err(e) = run(cli).await {
        eprintln!("{}: {}", "error".red().bold(), e);
        if let Some(hint) = e.hint() {
            eprintln!("{}: {}", "hint".cyan().bold(), hint);
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let config = cwd.join(&cli.config);
    tracing::debug!(cwd = %cwd.display(), config = %config.display(), "Starting");

    match cli.command {
        Commands::Init {
            remote,
            branch,
            prefix,
        } => commands::run_init(&cwd, &config, remote, branch, prefix).await,
        Commands::Sync {
            force,
            dry_run,
            json,
        } => commands::run_sync(&cwd, &config, force, dry_run, json).await,
    }
}

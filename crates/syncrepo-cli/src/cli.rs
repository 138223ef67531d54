//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// syncrepo - Keep a project in sync with its template repository
#[derive(Parser, Debug)]
#[command(name = "syncrepo")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Descriptor file, relative to the current directory
    #[arg(
        long,
        global = true,
        env = "SYNCREPO_CONFIG",
        default_value = "syncrepo.json"
    )]
    pub config: PathBuf,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Initialize a template repository in the current directory
    ///
    /// Examples:
    ///   syncrepo init --remote https://github.com/example/template.git
    ///   syncrepo init -r git@github.com:example/template.git -b develop
    Init {
        /// Template repository URL (http://, https://, or git@)
        #[arg(short, long)]
        remote: String,

        /// Template branch to follow
        #[arg(short, long, default_value = "main")]
        branch: String,

        /// Template subdirectory to sync from
        #[arg(long)]
        prefix: Option<String>,
    },

    /// Synchronize the current project with its template repository
    Sync {
        /// Proceed even if the working tree has uncommitted changes
        #[arg(short, long)]
        force: bool,

        /// Preview changes without applying them
        #[arg(long)]
        dry_run: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

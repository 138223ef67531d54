//! Sync command implementation

use std::path::Path;

use colored::Colorize;

use syncrepo_core::{DescriptorStore, SyncAction, SyncEngine, SyncOptions, SyncReport};
use syncrepo_git::GitCli;

use crate::error::Result;

/// Run the sync command
///
/// Prints one line per affected path as it is processed, then a summary.
/// With `json` only the final report is printed, as JSON.
pub async fn run_sync(
    cwd: &Path,
    config: &Path,
    force: bool,
    dry_run: bool,
    json: bool,
) -> Result<()> {
    let engine =
        SyncEngine::new(cwd, GitCli::new(cwd))?.with_store(DescriptorStore::new(config));

    if !json {
        let banner = if dry_run {
            "Previewing template sync (dry run)..."
        } else {
            "Syncing with template..."
        };
        println!("{} {}", "=>".blue().bold(), banner);
    }

    let options = SyncOptions { force, dry_run };

    if json {
        let report = engine.sync(&options).await?;
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let report = engine.sync_with_progress(&options, print_action).await?;
        print_summary(&report);
    }
    Ok(())
}

/// Print the line for one path before its effect is applied.
fn print_action(action: &SyncAction) {
    let path = action.path();
    match action {
        SyncAction::Create { .. } => println!("{} {}", "Creating:".green(), path),
        SyncAction::OverwriteConflict { .. } => println!("{} {}", "Overwriting:".yellow(), path),
        SyncAction::Remove { .. } => println!("{} {}", "Removing:".red(), path),
        SyncAction::Ignore { .. } => println!("{} {}", "Ignoring:".dimmed(), path),
        SyncAction::Skip { .. } => {}
    }
}

fn print_summary(report: &SyncReport) {
    println!();
    println!("{} {}", "Summary:".bold(), report.summary());
    if report.overwritten() > 0 {
        println!(
            "{} {} file(s) had local changes that were overwritten",
            "WARNING".yellow().bold(),
            report.overwritten()
        );
    }
    if report.removed() > 0 {
        println!(
            "{} {} file(s) were removed (not found in template repository)",
            "WARNING".yellow().bold(),
            report.removed()
        );
    }

    if report.dry_run {
        println!("{} Dry run; no files were changed.", "OK".green().bold());
    } else {
        println!("{} Sync completed successfully", "OK".green().bold());
    }
}

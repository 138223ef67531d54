//! Init command implementation

use std::path::Path;

use colored::Colorize;

use syncrepo_core::{DescriptorStore, InitRequest, init};
use syncrepo_git::GitCli;

use crate::error::Result;

/// Run the init command
///
/// Resolves the template head and writes the descriptor to `config`.
pub async fn run_init(
    cwd: &Path,
    config: &Path,
    remote: String,
    branch: String,
    prefix: Option<String>,
) -> Result<()> {
    let gateway = GitCli::new(cwd);
    let store = DescriptorStore::new(config);

    let mut request = InitRequest::new(remote, branch);
    if let Some(prefix) = prefix {
        request = request.with_prefix(prefix);
    }

    let descriptor = init(&gateway, &store, request).await?;

    println!(
        "{} Initialized template from {} (branch: {})",
        "OK".green().bold(),
        descriptor.remote.cyan(),
        descriptor.branch.cyan()
    );
    if let Some(commit) = &descriptor.commit {
        println!("   {} {}", "commit:".dimmed(), commit);
    }
    if let Some(prefix) = descriptor.prefix() {
        println!("   {} {}", "prefix:".dimmed(), prefix);
    }

    Ok(())
}

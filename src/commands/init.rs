//! The `init` subcommand: set up the local working branch.

use anyhow::Result;

use crate::cli::GlobalOpts;
use crate::exec;
use crate::logging::Logger;

/// Prepare the source tree checkout for local edits: fetch the remote and
/// (re)create a `local` branch tracking `origin/main`.
///
/// # Errors
///
/// Returns an error if the tree is not a git checkout, git is unavailable,
/// or a git command fails.
pub fn run(log: &Logger, global: &GlobalOpts) -> Result<()> {
    super::log_version(log);
    let root = super::resolve_root(global)?;
    super::require_git_checkout(&root)?;

    log.stage("Initializing working branch");

    if global.dry_run {
        log.dry_run("would fetch origin and check out branch 'local'");
        return Ok(());
    }

    exec::run_in(&root, "git", &["fetch", "origin"])?;
    exec::run_in(&root, "git", &["checkout", "-B", "local", "origin/main"])?;
    log.info("branch 'local' is tracking origin/main");
    Ok(())
}

//! The `save` subcommand: record local edits on top of the remote branch.

use anyhow::Result;

use crate::cli::GlobalOpts;
use crate::exec;
use crate::logging::Logger;

/// Stage and commit every local change, then rebase the work onto
/// `origin/main` so the local branch stays a clean fast-forward.
///
/// # Errors
///
/// Returns an error if the tree is not a git checkout, git is unavailable,
/// or staging or rebasing fails.
pub fn run(log: &Logger, global: &GlobalOpts) -> Result<()> {
    super::log_version(log);
    let root = super::resolve_root(global)?;
    super::require_git_checkout(&root)?;

    log.stage("Saving local changes");

    if global.dry_run {
        log.dry_run("would commit local changes and rebase onto origin/main");
        return Ok(());
    }

    exec::run_in(&root, "git", &["add", "-A"])?;

    // Commit may legitimately find nothing to record.
    let commit = exec::run_in_unchecked(&root, "git", &["commit", "-m", "save local changes"])?;
    if commit.success {
        log.info("committed local changes");
    } else if commit.stdout.contains("nothing to commit") {
        log.info("nothing to commit");
    } else {
        anyhow::bail!("git commit failed: {}", commit.stderr.trim());
    }

    exec::run_in(&root, "git", &["rebase", "origin/main"])?;
    Ok(())
}

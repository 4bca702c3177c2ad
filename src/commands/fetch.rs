//! The `fetch` subcommand: bring the source tree up to date with the remote.

use anyhow::Result;

use crate::cli::GlobalOpts;
use crate::exec;
use crate::logging::Logger;

/// Pull the latest remote state into the local checkout, fast-forward only.
///
/// # Errors
///
/// Returns an error if the tree is not a git checkout or git is unavailable.
/// A failed pull is reported as a warning, not an error, so a flaky network
/// does not break scripted use.
pub fn run(log: &Logger, global: &GlobalOpts) -> Result<()> {
    super::log_version(log);
    let root = super::resolve_root(global)?;
    super::require_git_checkout(&root)?;

    log.stage("Fetching remote changes");

    if global.dry_run {
        let fetch = exec::run_in_unchecked(&root, "git", &["fetch", "origin"])?;
        if !fetch.success {
            log.warn(&format!("git fetch failed: {}", fetch.stderr.trim()));
            return Ok(());
        }
        let local = exec::run_in(&root, "git", &["rev-parse", "HEAD"])?;
        let upstream = exec::run_in_unchecked(&root, "git", &["rev-parse", "@{u}"])?;
        if upstream.success && local.stdout.trim() == upstream.stdout.trim() {
            log.info("already up to date");
        } else {
            log.dry_run("would pull remote changes");
        }
        return Ok(());
    }

    let pull = exec::run_in_unchecked(&root, "git", &["pull", "--ff-only"])?;
    if pull.success {
        if pull.stdout.contains("Already up to date") {
            log.info("already up to date");
        } else {
            log.info("pulled remote changes");
        }
    } else {
        log.warn(&format!("git pull failed: {}", pull.stderr.trim()));
    }
    Ok(())
}

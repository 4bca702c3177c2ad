//! Top-level subcommand orchestration.
pub mod fetch;
pub mod init;
pub mod save;
pub mod sync;

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::cli::GlobalOpts;
use crate::config::bindings;
use crate::logging::Logger;

/// Resolve the managed source tree root from CLI arguments or auto-detection.
///
/// Order: `--root` flag, `CFGSYNC_ROOT` env var, the binary's own location,
/// then the current directory. A candidate qualifies when at least one
/// bound artifact exists under it.
///
/// # Errors
///
/// Returns an error if no candidate looks like a managed source tree.
pub fn resolve_root(global: &GlobalOpts) -> Result<PathBuf> {
    if let Some(ref root) = global.root {
        return Ok(root.clone());
    }

    if let Ok(root) = std::env::var("CFGSYNC_ROOT") {
        return Ok(PathBuf::from(root));
    }

    // The tool normally lives inside the tree it manages
    if let Ok(exe) = std::env::current_exe()
        && let Some(parent) = exe.parent()
    {
        let candidates = [
            parent.join("../.."), // target/release/ -> tree root
            parent.join(".."),    // bin/ -> tree root
        ];
        for candidate in &candidates {
            if looks_like_root(candidate) {
                return Ok(std::fs::canonicalize(candidate)?);
            }
        }
    }

    let cwd = std::env::current_dir()?;
    if looks_like_root(&cwd) {
        return Ok(cwd);
    }

    anyhow::bail!("cannot determine the source tree root. Use --root or set CFGSYNC_ROOT")
}

/// A directory qualifies as the managed tree root when any bound artifact
/// exists under it.
fn looks_like_root(path: &Path) -> bool {
    bindings::table().iter().any(|b| path.join(b.name).exists())
}

/// The user's home directory, from the environment.
///
/// # Errors
///
/// Returns an error if the `HOME` (or `USERPROFILE` on Windows) environment
/// variable is not set.
pub fn home_dir() -> Result<PathBuf> {
    let home = if cfg!(target_os = "windows") {
        std::env::var("USERPROFILE")
            .or_else(|_| std::env::var("HOME"))
            .map_err(|_| {
                anyhow::anyhow!("neither USERPROFILE nor HOME environment variable is set")
            })?
    } else {
        std::env::var("HOME")
            .map_err(|_| anyhow::anyhow!("HOME environment variable is not set"))?
    };
    Ok(PathBuf::from(home))
}

/// Shared guard for the git workflow subcommands: git must be on PATH and
/// the tree must be a checkout.
///
/// # Errors
///
/// Returns an error naming whichever precondition failed.
fn require_git_checkout(root: &Path) -> Result<()> {
    if !crate::exec::which("git") {
        anyhow::bail!("git is not available on PATH");
    }
    if !root.join(".git").exists() {
        anyhow::bail!("{} is not a git checkout", root.display());
    }
    Ok(())
}

/// Log the tool version at the start of a command.
fn log_version(log: &Logger) {
    let version = option_env!("CFGSYNC_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
    log.info(&format!("cfgsync {version}"));
}

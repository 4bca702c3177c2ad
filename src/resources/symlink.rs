//! A single managed symbolic link.
use anyhow::{Context as _, Result, ensure};
use std::path::{Path, PathBuf};

use super::{Resource, ResourceChange, ResourceState, fs};

/// A symlink from a resolved destination back to a source in the managed
/// tree. `apply` heals whatever is currently at the destination; `remove`
/// deletes the destination and never touches the source.
#[derive(Debug, Clone)]
pub struct LinkResource {
    /// What the symlink points to (must exist and be absolute).
    pub source: PathBuf,
    /// Where the symlink is created (must be absolute).
    pub target: PathBuf,
}

impl LinkResource {
    #[must_use]
    pub const fn new(source: PathBuf, target: PathBuf) -> Self {
        Self { source, target }
    }
}

impl Resource for LinkResource {
    fn description(&self) -> String {
        format!("{} -> {}", self.target.display(), self.source.display())
    }

    fn current_state(&self) -> Result<ResourceState> {
        if !self.source.exists() {
            return Ok(ResourceState::Invalid {
                reason: format!("source does not exist: {}", self.source.display()),
            });
        }
        if !self.target.is_absolute() {
            return Ok(ResourceState::Invalid {
                reason: format!("destination is not absolute: {}", self.target.display()),
            });
        }

        std::fs::read_link(&self.target).map_or_else(
            |_| {
                // Destination isn't a symlink: a real file or directory is
                // incorrect, nothing at all is missing.
                if self.target.symlink_metadata().is_ok() {
                    Ok(ResourceState::Incorrect {
                        current: "destination is not a symlink".to_string(),
                    })
                } else {
                    Ok(ResourceState::Missing)
                }
            },
            |existing| {
                if paths_equal(&existing, &self.source) {
                    Ok(ResourceState::Correct)
                } else {
                    Ok(ResourceState::Incorrect {
                        current: format!("points to {}", existing.display()),
                    })
                }
            },
        )
    }

    fn apply(&self) -> Result<ResourceChange> {
        match self.current_state()? {
            ResourceState::Correct => return Ok(ResourceChange::AlreadyCorrect),
            ResourceState::Invalid { reason } => anyhow::bail!("{reason}"),
            ResourceState::Missing | ResourceState::Incorrect { .. } => {}
        }

        fs::ensure_parent_dir(&self.target)?;
        fs::remove_existing(&self.target)
            .with_context(|| format!("remove existing: {}", self.target.display()))?;
        create_symlink(&self.source, &self.target)
            .with_context(|| format!("create link: {}", self.target.display()))?;
        Ok(ResourceChange::Applied)
    }

    fn remove(&self) -> Result<ResourceChange> {
        ensure!(
            self.target.is_absolute(),
            "destination is not absolute: {}",
            self.target.display()
        );
        if fs::remove_existing(&self.target)? {
            Ok(ResourceChange::Applied)
        } else {
            Ok(ResourceChange::AlreadyCorrect)
        }
    }
}

/// Compare two paths, normalising the `\\?\` prefix that Windows
/// `read_link` prepends to extended-length paths.
pub fn paths_equal(a: &Path, b: &Path) -> bool {
    strip_win_prefix(a) == strip_win_prefix(b)
}

fn strip_win_prefix(p: &Path) -> PathBuf {
    let s = p.to_string_lossy();
    s.strip_prefix(r"\\?\")
        .map_or_else(|| p.to_path_buf(), PathBuf::from)
}

/// Create a symlink at `target` pointing to `source` (platform-specific).
fn create_symlink(source: &Path, target: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(source, target)?;
    }

    #[cfg(windows)]
    {
        if source.is_dir() {
            std::os::windows::fs::symlink_dir(source, target)?;
        } else {
            std::os::windows::fs::symlink_file(source, target)?;
        }
    }

    Ok(())
}

//! Shared context for one synchronization run.
use crate::config::Config;
use crate::config::tokens::TokenResolver;
use crate::logging::Logger;
use crate::platform::Platform;

/// Everything the per-artifact loop needs, borrowed for the run. All of it
/// is read-only; the only mutation happens on the filesystem.
pub struct Context<'a> {
    /// The managed tree root and binding table.
    pub config: &'a Config,
    /// Current (or overridden) platform.
    pub platform: &'a Platform,
    /// Frozen token registry seeded for `platform`.
    pub resolver: &'a TokenResolver,
    /// Logger for output and per-artifact outcome recording.
    pub log: &'a Logger,
    /// Whether to preview changes without applying.
    pub dry_run: bool,
}

impl std::fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("root", &self.config.root)
            .field("platform", &self.platform)
            .field("dry_run", &self.dry_run)
            .finish_non_exhaustive()
    }
}

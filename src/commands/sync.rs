//! The `sync` subcommand: reconcile bound artifacts with the home directory.

use anyhow::Result;

use crate::cli::{GlobalOpts, SyncOpts};
use crate::config::Config;
use crate::config::tokens::TokenResolver;
use crate::logging::Logger;
use crate::platform::{Os, Platform};
use crate::tasks::{Context, Mode, sync_bindings};

/// Run the sync pipeline: resolve destinations for every bound artifact and
/// create (or, with `--clean`, remove) the corresponding symlinks.
///
/// Faulted artifacts are reported but do not stop the run. The command fails
/// only when every artifact faulted.
///
/// # Errors
///
/// Returns an error when the source tree root cannot be determined, the home
/// directory is unknown, or every artifact faulted.
pub fn run(log: &Logger, global: &GlobalOpts, opts: &SyncOpts) -> Result<()> {
    super::log_version(log);

    let platform = match global.sys {
        Some(sys) => Platform::with_os(Os::from(sys)),
        None => Platform::detect(),
    };
    let root = super::resolve_root(global)?;
    let home = super::home_dir()?;

    log.debug(&format!("platform: {}", platform.os));
    log.debug(&format!("root: {}", root.display()));
    log.debug(&format!("home: {}", home.display()));

    let config = Config::new(&root);
    let resolver = TokenResolver::for_platform(&platform, home);
    let ctx = Context {
        config: &config,
        platform: &platform,
        resolver: &resolver,
        log,
        dry_run: global.dry_run,
    };

    let mode = if opts.clean { Mode::Remove } else { Mode::Create };
    match mode {
        Mode::Create => log.stage("Linking configuration"),
        Mode::Remove => log.stage("Removing configuration links"),
    }

    let stats = sync_bindings(&ctx, mode);
    log.info(&stats.summary(global.dry_run));
    log.print_summary();

    if stats.total > 0 && stats.faulted == stats.total {
        anyhow::bail!("all {} artifacts failed", stats.total);
    }
    Ok(())
}

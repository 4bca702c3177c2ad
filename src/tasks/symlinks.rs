//! The per-artifact synchronization loop.
//!
//! Each binding goes through `Bound -> Resolved -> Applied` in one pass:
//! rule selection produces a verdict, the verdict and mode produce a
//! filesystem action (or a report, in dry-run). A fault in one artifact is
//! recorded and the loop moves on; it never halts the run.
use anyhow::{Context as _, Result, ensure};
use std::ffi::OsString;
use std::path::Path;

use crate::config::rules::{self, Binding, Verdict};
use crate::logging::Status;
use crate::resources::symlink::LinkResource;
use crate::resources::{Resource as _, ResourceChange, fs};

use super::Context;

/// Filesystem operation to perform for each resolved artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Create or heal links.
    Create,
    /// Remove managed destinations.
    Remove,
}

/// Counters for one pass over the binding table. `changed` and
/// `already_ok` count link entries (a mirrored directory contributes one
/// per child); `ignored` and `faulted` count artifacts.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncStats {
    pub changed: u32,
    pub already_ok: u32,
    pub ignored: u32,
    pub faulted: u32,
    pub total: u32,
}

impl SyncStats {
    /// One-line run summary in the logger's counting style.
    #[must_use]
    pub fn summary(&self, dry_run: bool) -> String {
        let verb = if dry_run { "would change" } else { "changed" };
        let mut parts = vec![
            format!("{} {verb}", self.changed),
            format!("{} already ok", self.already_ok),
        ];
        if self.ignored > 0 {
            parts.push(format!("{} ignored", self.ignored));
        }
        if self.faulted > 0 {
            parts.push(format!("{} failed", self.faulted));
        }
        parts.join(", ")
    }
}

/// Per-artifact result of the resolve + apply pipeline.
enum Outcome {
    Ignored(Option<String>),
    Done { changed: u32, already_ok: u32 },
}

/// Process every binding in the table, recording one outcome per artifact.
pub fn sync_bindings(ctx: &Context<'_>, mode: Mode) -> SyncStats {
    let mut stats = SyncStats::default();

    for binding in &ctx.config.bindings {
        stats.total += 1;
        match process(ctx, binding, mode) {
            Ok(Outcome::Ignored(reason)) => {
                match &reason {
                    Some(r) => ctx.log.info(&format!("ignoring {}: {r}", binding.name)),
                    None => ctx.log.debug(&format!("ignoring {}", binding.name)),
                }
                ctx.log
                    .record(binding.name, Status::NotApplicable, reason.as_deref());
                stats.ignored += 1;
            }
            Ok(Outcome::Done { changed, already_ok }) => {
                stats.changed += changed;
                stats.already_ok += already_ok;
                record_done(ctx, binding.name, mode, changed);
            }
            Err(e) => {
                ctx.log.error(&format!("{}: {e:#}", binding.name));
                ctx.log
                    .record(binding.name, Status::Failed, Some(&format!("{e:#}")));
                stats.faulted += 1;
            }
        }
    }

    stats
}

fn record_done(ctx: &Context<'_>, name: &str, mode: Mode, changed: u32) {
    if changed == 0 {
        let msg = match mode {
            Mode::Create => "already ok",
            Mode::Remove => "already absent",
        };
        ctx.log.record(name, Status::Ok, Some(msg));
    } else if ctx.dry_run {
        ctx.log.record(name, Status::DryRun, None);
    } else {
        let msg = match mode {
            Mode::Create => format!("{changed} linked"),
            Mode::Remove => "removed".to_string(),
        };
        ctx.log.record(name, Status::Ok, Some(&msg));
    }
}

/// Resolve one binding and apply (or preview) the resulting action.
fn process(ctx: &Context<'_>, binding: &Binding, mode: Mode) -> Result<Outcome> {
    let verdict = rules::select(&binding.rules, ctx.platform.os, ctx.resolver)?;
    let dest = match verdict {
        Verdict::Ignore { reason } => return Ok(Outcome::Ignored(reason)),
        Verdict::Link(dest) => dest,
    };
    ensure!(
        dest.is_absolute(),
        "resolved destination is not absolute: {}",
        dest.display()
    );

    match mode {
        Mode::Create => create(ctx, &ctx.config.source_path(binding.name), &dest),
        Mode::Remove => Ok(remove(ctx, &dest)?),
    }
}

/// Create or heal the link(s) for one artifact.
///
/// A directory source is mirrored: the destination becomes a real directory
/// and each direct child is linked individually. Mirroring is one level
/// deep; nested subdirectories are linked as single entries.
fn create(ctx: &Context<'_>, source: &Path, dest: &Path) -> Result<Outcome> {
    ensure!(source.exists(), "source does not exist: {}", source.display());

    let mut changed = 0u32;
    let mut already_ok = 0u32;

    if source.is_dir() {
        ensure_dest_dir(ctx, dest, &mut changed, &mut already_ok)?;
        for child in dir_entries(source)? {
            let resource = LinkResource::new(source.join(&child), dest.join(&child));
            apply_entry(ctx, &resource, &mut changed, &mut already_ok)?;
        }
    } else {
        let resource = LinkResource::new(source.to_path_buf(), dest.to_path_buf());
        apply_entry(ctx, &resource, &mut changed, &mut already_ok)?;
    }

    Ok(Outcome::Done { changed, already_ok })
}

/// Make sure the mirror destination is a real directory, replacing any
/// symlink or file squatting on the path.
fn ensure_dest_dir(
    ctx: &Context<'_>,
    dest: &Path,
    changed: &mut u32,
    already_ok: &mut u32,
) -> Result<()> {
    let is_real_dir = dest
        .symlink_metadata()
        .map(|m| m.is_dir() && !m.is_symlink())
        .unwrap_or(false);
    if is_real_dir {
        *already_ok += 1;
        return Ok(());
    }

    if ctx.dry_run {
        ctx.log
            .dry_run(&format!("would create directory {}", dest.display()));
    } else {
        fs::remove_existing(dest)
            .with_context(|| format!("remove existing: {}", dest.display()))?;
        std::fs::create_dir_all(dest)
            .with_context(|| format!("create directory: {}", dest.display()))?;
        ctx.log
            .debug(&format!("created directory {}", dest.display()));
    }
    *changed += 1;
    Ok(())
}

/// Apply one link entry, honoring dry-run.
fn apply_entry(
    ctx: &Context<'_>,
    resource: &LinkResource,
    changed: &mut u32,
    already_ok: &mut u32,
) -> Result<()> {
    if ctx.dry_run {
        if resource.needs_change()? {
            ctx.log
                .dry_run(&format!("would link {}", resource.description()));
            *changed += 1;
        } else {
            *already_ok += 1;
        }
        return Ok(());
    }

    match resource.apply()? {
        ResourceChange::Applied => {
            ctx.log.debug(&format!("linked {}", resource.description()));
            *changed += 1;
        }
        ResourceChange::AlreadyCorrect => *already_ok += 1,
    }
    Ok(())
}

/// Remove whatever is at the resolved destination. A missing destination
/// is already satisfied.
fn remove(ctx: &Context<'_>, dest: &Path) -> Result<Outcome> {
    if ctx.dry_run {
        return if dest.symlink_metadata().is_ok() {
            ctx.log.dry_run(&format!("would remove {}", dest.display()));
            Ok(Outcome::Done {
                changed: 1,
                already_ok: 0,
            })
        } else {
            Ok(Outcome::Done {
                changed: 0,
                already_ok: 1,
            })
        };
    }

    if fs::remove_existing(dest)? {
        ctx.log.debug(&format!("removed {}", dest.display()));
        Ok(Outcome::Done {
            changed: 1,
            already_ok: 0,
        })
    } else {
        Ok(Outcome::Done {
            changed: 0,
            already_ok: 1,
        })
    }
}

/// Direct children of a directory, sorted for deterministic output.
fn dir_entries(dir: &Path) -> Result<Vec<OsString>> {
    let mut names = std::fs::read_dir(dir)
        .with_context(|| format!("read directory: {}", dir.display()))?
        .map(|entry| entry.map(|e| e.file_name()))
        .collect::<std::io::Result<Vec<OsString>>>()
        .with_context(|| format!("read entry in: {}", dir.display()))?;
    names.sort();
    Ok(names)
}

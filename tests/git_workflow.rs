#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::wildcard_imports,
    clippy::indexing_slicing
)]
//! Integration tests for the git workflow subcommands (`init`, `save`,
//! `fetch`).
//!
//! Each test builds a throwaway upstream repository plus a clone of it and
//! drives the subcommand against the clone with an explicit `--root`, so the
//! tests never touch the host's real repositories or network. Tests skip
//! silently when git is unavailable.

mod common;

use std::path::{Path, PathBuf};

use cfgsync::cli::GlobalOpts;
use cfgsync::commands;
use cfgsync::exec;
use cfgsync::logging::Logger;

/// Upstream repository and a clone of it, both backed by one temp dir.
struct GitFixture {
    _dir: tempfile::TempDir,
    checkout: PathBuf,
}

impl GitFixture {
    /// Create an upstream repository with one commit on `main` and clone it.
    /// Returns `None` when git is not on PATH.
    fn new() -> Option<Self> {
        if !exec::which("git") {
            return None;
        }
        let dir = tempfile::tempdir().expect("create temp dir");
        let upstream = dir.path().join("upstream");
        std::fs::create_dir(&upstream).expect("create upstream dir");

        git(&upstream, &["init", "-b", "main"]);
        git(&upstream, &["config", "user.email", "tests@example.invalid"]);
        git(&upstream, &["config", "user.name", "tests"]);
        std::fs::write(upstream.join("ripgreprc"), "--smart-case\n").unwrap();
        git(&upstream, &["add", "-A"]);
        git(&upstream, &["commit", "-m", "initial"]);

        let checkout = dir.path().join("checkout");
        git(dir.path(), &["clone", "upstream", "checkout"]);
        git(&checkout, &["config", "user.email", "tests@example.invalid"]);
        git(&checkout, &["config", "user.name", "tests"]);

        Some(Self {
            _dir: dir,
            checkout,
        })
    }

    fn global(&self, dry_run: bool) -> GlobalOpts {
        GlobalOpts {
            dry_run,
            sys: None,
            root: Some(self.checkout.clone()),
        }
    }

    /// Current branch name in the checkout.
    fn current_branch(&self) -> String {
        git(&self.checkout, &["rev-parse", "--abbrev-ref", "HEAD"])
    }

    /// `git status --porcelain` output for the checkout.
    fn status(&self) -> String {
        git(&self.checkout, &["status", "--porcelain"])
    }
}

/// Run git, panicking on failure, returning trimmed stdout.
fn git(dir: &Path, args: &[&str]) -> String {
    let result = exec::run_in(dir, "git", args)
        .unwrap_or_else(|e| panic!("git {} failed: {e:#}", args.join(" ")));
    result.stdout.trim().to_string()
}

#[test]
fn init_creates_local_branch_from_origin_main() {
    let Some(f) = GitFixture::new() else { return };
    let log = Logger::new(false, "test");

    commands::init::run(&log, &f.global(false)).expect("init");

    assert_eq!(f.current_branch(), "local");
    let upstream_head = git(&f.checkout, &["rev-parse", "origin/main"]);
    let local_head = git(&f.checkout, &["rev-parse", "HEAD"]);
    assert_eq!(local_head, upstream_head);
}

#[test]
fn init_dry_run_leaves_branches_untouched() {
    let Some(f) = GitFixture::new() else { return };
    let log = Logger::new(false, "test");
    let before = f.current_branch();

    commands::init::run(&log, &f.global(true)).expect("init dry run");

    assert_eq!(f.current_branch(), before);
}

#[test]
fn init_rejects_non_checkout() {
    let dir = tempfile::tempdir().unwrap();
    let log = Logger::new(false, "test");
    let global = GlobalOpts {
        dry_run: false,
        sys: None,
        root: Some(dir.path().to_path_buf()),
    };

    assert!(commands::init::run(&log, &global).is_err());
}

#[test]
fn save_commits_local_changes() {
    let Some(f) = GitFixture::new() else { return };
    let log = Logger::new(false, "test");
    commands::init::run(&log, &f.global(false)).expect("init");

    std::fs::write(f.checkout.join("ripgreprc"), "--smart-case\n--hidden\n").unwrap();
    commands::save::run(&log, &f.global(false)).expect("save");

    assert!(f.status().is_empty(), "working tree is clean after save");
    let subject = git(&f.checkout, &["log", "-1", "--format=%s"]);
    assert_eq!(subject, "save local changes");
}

#[test]
fn save_with_clean_tree_succeeds() {
    let Some(f) = GitFixture::new() else { return };
    let log = Logger::new(false, "test");
    commands::init::run(&log, &f.global(false)).expect("init");

    let head = git(&f.checkout, &["rev-parse", "HEAD"]);
    commands::save::run(&log, &f.global(false)).expect("save with nothing to commit");

    assert_eq!(git(&f.checkout, &["rev-parse", "HEAD"]), head);
}

#[test]
fn fetch_pulls_upstream_commits() {
    let Some(f) = GitFixture::new() else { return };
    let log = Logger::new(false, "test");

    // Advance the upstream behind the checkout's back.
    let upstream = f.checkout.parent().unwrap().join("upstream");
    std::fs::write(upstream.join("new-file"), "n").unwrap();
    git(&upstream, &["add", "-A"]);
    git(&upstream, &["commit", "-m", "upstream change"]);

    commands::fetch::run(&log, &f.global(false)).expect("fetch");

    assert!(f.checkout.join("new-file").exists(), "pulled upstream file");
}

#[test]
fn fetch_when_up_to_date_is_a_noop() {
    let Some(f) = GitFixture::new() else { return };
    let log = Logger::new(false, "test");
    let head = git(&f.checkout, &["rev-parse", "HEAD"]);

    commands::fetch::run(&log, &f.global(false)).expect("fetch");

    assert_eq!(git(&f.checkout, &["rev-parse", "HEAD"]), head);
}

#[test]
fn fetch_dry_run_does_not_pull() {
    let Some(f) = GitFixture::new() else { return };
    let log = Logger::new(false, "test");

    let upstream = f.checkout.parent().unwrap().join("upstream");
    std::fs::write(upstream.join("new-file"), "n").unwrap();
    git(&upstream, &["add", "-A"]);
    git(&upstream, &["commit", "-m", "upstream change"]);

    commands::fetch::run(&log, &f.global(true)).expect("fetch dry run");

    assert!(
        !f.checkout.join("new-file").exists(),
        "dry run must not change the working tree"
    );
}

// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed source tree plus a fake home
// directory so each integration test can exercise the full resolve-and-link
// pipeline in isolation without repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use cfgsync::config::Config;
use cfgsync::config::rules::Binding;
use cfgsync::config::tokens::TokenResolver;
use cfgsync::logging::Logger;
use cfgsync::platform::{Os, Platform};
use cfgsync::tasks::{Context, Mode, SyncStats, sync_bindings};

/// An isolated source tree and home directory backed by temp dirs.
///
/// Both directories are deleted on drop (via the underlying
/// [`tempfile::TempDir`]).
pub struct EngineFixture {
    /// The managed source tree.
    pub root: tempfile::TempDir,
    /// The fake home directory links resolve into.
    pub home: tempfile::TempDir,
    /// Platform the run is resolved for.
    pub platform: Platform,
    log: Logger,
}

impl EngineFixture {
    /// Create a fixture resolving for Linux, the least surprising platform
    /// for symlink tests.
    pub fn new() -> Self {
        Self::for_os(Os::Linux)
    }

    /// Create a fixture resolving for an explicit platform, so tests can
    /// exercise platform-specific rules without depending on the host OS.
    pub fn for_os(os: Os) -> Self {
        Self {
            root: tempfile::tempdir().expect("create root temp dir"),
            home: tempfile::tempdir().expect("create home temp dir"),
            platform: Platform::with_os(os),
            log: Logger::new(false, "test"),
        }
    }

    /// Write a source file at `name` under the tree root.
    pub fn write_source(&self, name: &str, content: &str) {
        let path = self.root.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create source parent");
        }
        std::fs::write(&path, content).expect("write source file");
    }

    /// Create a source directory at `name` under the tree root.
    pub fn create_source_dir(&self, name: &str) {
        std::fs::create_dir_all(self.root.path().join(name)).expect("create source dir");
    }

    /// Absolute path of a source artifact.
    pub fn source_path(&self, name: &str) -> PathBuf {
        self.root.path().join(name)
    }

    /// Absolute path under the fake home directory.
    pub fn home_path(&self, rel: &str) -> PathBuf {
        self.home.path().join(rel)
    }

    /// Run one pass of the engine over `bindings` and return the counters.
    pub fn run(&self, bindings: Vec<Binding>, mode: Mode, dry_run: bool) -> SyncStats {
        let config = Config::with_bindings(self.root.path(), bindings);
        let resolver = TokenResolver::for_platform(&self.platform, self.home.path());
        let ctx = Context {
            config: &config,
            platform: &self.platform,
            resolver: &resolver,
            log: &self.log,
            dry_run,
        };
        sync_bindings(&ctx, mode)
    }
}

/// Assert that `link` is a symlink pointing at `target`.
pub fn assert_links_to(link: &Path, target: &Path) {
    let resolved = std::fs::read_link(link)
        .unwrap_or_else(|e| panic!("{} is not a symlink: {e}", link.display()));
    assert_eq!(resolved, target, "wrong link target for {}", link.display());
}

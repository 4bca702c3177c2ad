//! Config-file synchronization engine.
//!
//! Cross-platform tool that links configuration artifacts from a managed
//! source tree into their platform-specific destinations. Destinations are
//! declared once per artifact as a set of platform-scoped, prioritized rules
//! whose path patterns may contain `%Token%` placeholders; the winning rule
//! is resolved and handed to an idempotent symlink engine that can create,
//! remove, or preview links (mirroring directory sources entry by entry).
//!
//! The public API is organised into four layers:
//!
//! - **[`config`]**: the declarative rule language (tokens, rules, bindings)
//! - **[`resources`]**: idempotent `check + apply` symlink primitives
//! - **[`tasks`]**: the per-artifact synchronization loop
//! - **[`commands`]**: top-level subcommand orchestration (`sync`, `init`,
//!   `save`, `fetch`)

pub mod cli;
pub mod commands;
pub mod config;
pub mod exec;
pub mod logging;
pub mod platform;
pub mod resources;
pub mod tasks;

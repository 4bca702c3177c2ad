//! The synchronization run: shared context and the per-artifact loop.
pub mod context;
pub mod symlinks;

pub use context::Context;
pub use symlinks::{Mode, SyncStats, sync_bindings};

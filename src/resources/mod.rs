//! Idempotent filesystem primitives (check + apply pattern).
pub mod fs;
pub mod symlink;

use anyhow::Result;

/// State of a managed filesystem entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceState {
    /// Entry does not exist.
    Missing,
    /// Entry exists and matches the desired state.
    Correct,
    /// Entry exists but does not match the desired state.
    Incorrect {
        /// Description of the current value.
        current: String,
    },
    /// Entry cannot be applied (e.g. the declared source does not exist).
    Invalid {
        /// Reason why the entry cannot be applied.
        reason: String,
    },
}

/// Result of applying a change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceChange {
    /// Entry was created, updated, or removed.
    Applied,
    /// Entry was already in the desired state (no change needed).
    AlreadyCorrect,
}

/// Unified interface for entries that can be described, checked, applied,
/// and removed. Every implementation must be safe to re-apply: running
/// `apply` or `remove` twice leaves the same state as running it once.
pub trait Resource {
    /// Human-readable description of this entry.
    fn description(&self) -> String;

    /// Check the current state of the entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be determined due to I/O or
    /// permission failures.
    fn current_state(&self) -> Result<ResourceState>;

    /// Bring the entry into the desired state.
    ///
    /// # Errors
    ///
    /// Returns an error on I/O failures, permission issues, or when the
    /// entry is invalid (missing source, relative destination).
    fn apply(&self) -> Result<ResourceChange>;

    /// Remove the entry, undoing a previous `apply()`. A missing entry is
    /// already satisfied, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry exists but cannot be removed.
    fn remove(&self) -> Result<ResourceChange>;

    /// Whether `apply` would change anything.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Resource::current_state`].
    fn needs_change(&self) -> Result<bool> {
        Ok(matches!(
            self.current_state()?,
            ResourceState::Missing | ResourceState::Incorrect { .. }
        ))
    }
}

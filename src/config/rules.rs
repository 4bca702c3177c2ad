//! Platform-scoped destination rules and rule selection.
use std::path::PathBuf;

use crate::platform::Os;

use super::tokens::{ResolveError, TokenResolver};

/// Platform predicate attached to a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Windows,
    Macos,
    Linux,
    /// Matches every platform.
    Any,
}

impl Scope {
    /// Whether the scope applies to the given platform.
    #[must_use]
    pub fn matches(self, os: Os) -> bool {
        match self {
            Self::Windows => os == Os::Windows,
            Self::Macos => os == Os::Macos,
            Self::Linux => os == Os::Linux,
            Self::Any => true,
        }
    }

    /// Conventional rule priority for this scope: OS-specific scopes
    /// override the catch-all.
    const fn default_priority(self) -> u32 {
        match self {
            Self::Windows | Self::Macos | Self::Linux => 100,
            Self::Any => 10,
        }
    }
}

/// What a winning rule produces: a destination path pattern, or an ignore
/// marker with an optional human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleTarget {
    Path(String),
    Ignore(Option<String>),
}

/// One candidate destination for an artifact, conditioned on platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub scope: Scope,
    pub priority: u32,
    pub target: RuleTarget,
}

impl Rule {
    /// A rule with an explicit priority.
    #[must_use]
    pub fn with_priority(scope: Scope, priority: u32, pattern: &str) -> Self {
        Self {
            scope,
            priority,
            target: RuleTarget::Path(pattern.to_string()),
        }
    }

    fn scoped(scope: Scope, pattern: &str) -> Self {
        Self::with_priority(scope, scope.default_priority(), pattern)
    }

    /// A Windows-only rule at OS priority.
    #[must_use]
    pub fn windows(pattern: &str) -> Self {
        Self::scoped(Scope::Windows, pattern)
    }

    /// A macOS-only rule at OS priority.
    #[must_use]
    pub fn macos(pattern: &str) -> Self {
        Self::scoped(Scope::Macos, pattern)
    }

    /// A Linux-only rule at OS priority.
    #[must_use]
    pub fn linux(pattern: &str) -> Self {
        Self::scoped(Scope::Linux, pattern)
    }

    /// A catch-all rule at fallback priority.
    #[must_use]
    pub fn any(pattern: &str) -> Self {
        Self::scoped(Scope::Any, pattern)
    }

    /// A rule marking the artifact as unmanaged on the scoped platform.
    #[must_use]
    pub fn ignore(scope: Scope, reason: &str) -> Self {
        Self {
            scope,
            priority: scope.default_priority(),
            target: RuleTarget::Ignore(if reason.is_empty() {
                None
            } else {
                Some(reason.to_string())
            }),
        }
    }
}

/// The association between an artifact name and its ordered rule set.
///
/// `name` is also the artifact's source path relative to the managed tree
/// root. The table these come from is immutable once constructed.
#[derive(Debug, Clone)]
pub struct Binding {
    pub name: &'static str,
    pub rules: Vec<Rule>,
}

impl Binding {
    #[must_use]
    pub const fn new(name: &'static str, rules: Vec<Rule>) -> Self {
        Self { name, rules }
    }
}

/// Outcome of rule selection for one artifact: exactly one per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Concrete destination path for the artifact's link.
    Link(PathBuf),
    /// Do not manage this artifact on this platform.
    Ignore { reason: Option<String> },
}

/// Select the winning rule for `os` and resolve its pattern.
///
/// Rules whose scope does not match are discarded; among the rest the
/// strictly highest priority wins, and on equal priority the first-declared
/// rule wins. An empty match set, or a winning ignore marker, yields an
/// ignore verdict. The selector itself only compares the priority integers.
///
/// # Errors
///
/// Returns a [`ResolveError`] when the winning pattern is malformed or
/// names an unregistered token.
pub fn select(rules: &[Rule], os: Os, resolver: &TokenResolver) -> Result<Verdict, ResolveError> {
    let mut winner: Option<&Rule> = None;
    for rule in rules.iter().filter(|r| r.scope.matches(os)) {
        if winner.is_none_or(|w| rule.priority > w.priority) {
            winner = Some(rule);
        }
    }

    match winner.map(|w| &w.target) {
        None => Ok(Verdict::Ignore { reason: None }),
        Some(RuleTarget::Ignore(reason)) => Ok(Verdict::Ignore {
            reason: reason.clone(),
        }),
        Some(RuleTarget::Path(pattern)) => {
            let resolved = resolver.resolve(pattern)?;
            Ok(Verdict::Link(PathBuf::from(resolved)))
        }
    }
}

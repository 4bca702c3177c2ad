//! `%Token%` substitution in destination path patterns.
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::platform::Platform;

/// A pattern fault, fatal to the artifact being resolved.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// A `%` block names a token that was never registered. There is no
    /// default value; the artifact's resolution is aborted.
    #[error("unknown token '%{name}%' in pattern '{pattern}'")]
    UnknownToken { name: String, pattern: String },

    /// A `%` opened a token name but no closing `%` followed.
    #[error("unterminated '%' token in pattern '{pattern}'")]
    UnterminatedToken { pattern: String },
}

/// A registered token value: another pattern (resolved recursively) or a
/// zero-argument function producing a string.
enum TokenValue {
    Pattern(String),
    Func(Box<dyn Fn() -> String + Send + Sync>),
}

/// Registry of named path tokens, frozen after construction.
///
/// Resolution expands a leading `~` to the home directory, then substitutes
/// each `%Name%` block left to right. Pure: no filesystem access.
pub struct TokenResolver {
    home: PathBuf,
    tokens: HashMap<String, TokenValue>,
}

impl fmt::Debug for TokenResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.tokens.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("TokenResolver")
            .field("home", &self.home)
            .field("tokens", &names)
            .finish()
    }
}

impl TokenResolver {
    /// Create an empty registry that expands `~` to `home`.
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self {
            home: home.into(),
            tokens: HashMap::new(),
        }
    }

    /// Create the registry seeded for the given platform.
    ///
    /// Windows hosts get the roaming and local per-user application-data
    /// directories; macOS hosts get the per-user preferences directory.
    pub fn for_platform(platform: &Platform, home: impl Into<PathBuf>) -> Self {
        let mut resolver = Self::new(home);
        if platform.is_windows() {
            resolver.register("LocalAppData", "~/AppData/Local");
            resolver.register("RoamingAppData", "~/AppData/Roaming");
        }
        if platform.is_macos() {
            resolver.register("LibraryPreferences", "~/Library/Preferences");
        }
        resolver
    }

    /// Register a token that resolves to another pattern (recursively).
    pub fn register(&mut self, name: &str, pattern: &str) {
        self.tokens
            .insert(name.to_string(), TokenValue::Pattern(pattern.to_string()));
    }

    /// Register a token backed by a zero-argument function.
    pub fn register_fn<F>(&mut self, name: &str, f: F)
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        self.tokens
            .insert(name.to_string(), TokenValue::Func(Box::new(f)));
    }

    /// Resolve a path pattern into a plain path string.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::UnterminatedToken`] when a `%` block has no
    /// closing delimiter, and [`ResolveError::UnknownToken`] when a token
    /// name is not registered.
    pub fn resolve(&self, pattern: &str) -> Result<String, ResolveError> {
        let expanded = self.expand_home(pattern);
        let mut rest = expanded.as_str();
        let mut result = String::with_capacity(expanded.len());

        while let Some(start) = rest.find('%') {
            result.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            let Some(end) = after.find('%') else {
                return Err(ResolveError::UnterminatedToken {
                    pattern: pattern.to_string(),
                });
            };
            let name = &after[..end];
            result.push_str(&self.lookup(name, pattern)?);
            rest = &after[end + 1..];
        }
        result.push_str(rest);
        Ok(result)
    }

    /// Resolve one registered token by name.
    fn lookup(&self, name: &str, pattern: &str) -> Result<String, ResolveError> {
        match self.tokens.get(name) {
            Some(TokenValue::Pattern(inner)) => self.resolve(inner),
            Some(TokenValue::Func(f)) => Ok(f()),
            None => Err(ResolveError::UnknownToken {
                name: name.to_string(),
                pattern: pattern.to_string(),
            }),
        }
    }

    /// Replace a leading `~` with the home directory.
    fn expand_home(&self, pattern: &str) -> String {
        if let Some(rest) = pattern.strip_prefix('~') {
            let rest = rest.trim_start_matches(['/', '\\']);
            if rest.is_empty() {
                self.home.to_string_lossy().into_owned()
            } else {
                self.home.join(rest).to_string_lossy().into_owned()
            }
        } else {
            pattern.to_string()
        }
    }

    /// The home directory this registry expands `~` to.
    #[must_use]
    pub fn home(&self) -> &Path {
        &self.home
    }
}

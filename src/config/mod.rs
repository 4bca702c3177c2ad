//! Declarative configuration: tokens, rules, and the binding table.
pub mod bindings;
pub mod rules;
pub mod tokens;

use std::path::{Path, PathBuf};

use rules::Binding;

/// All configuration for one run: the managed tree root and the binding
/// table. Immutable once constructed; all mutation happens on the
/// filesystem, never on this model.
#[derive(Debug, Clone)]
pub struct Config {
    pub root: PathBuf,
    pub bindings: Vec<Binding>,
}

impl Config {
    /// Build the configuration for the managed tree at `root` using the
    /// compiled-in binding table.
    #[must_use]
    pub fn new(root: &Path) -> Self {
        Self::with_bindings(root, bindings::table())
    }

    /// Build a configuration with an explicit binding table (tests and
    /// embedding).
    #[must_use]
    pub fn with_bindings(root: &Path, bindings: Vec<Binding>) -> Self {
        Self {
            root: root.to_path_buf(),
            bindings,
        }
    }

    /// Absolute source path for an artifact name.
    #[must_use]
    pub fn source_path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rules::Rule;

    #[test]
    fn new_uses_compiled_in_table() {
        let config = Config::new(Path::new("/cfg"));
        assert!(!config.bindings.is_empty());
        assert_eq!(config.root, PathBuf::from("/cfg"));
    }

    #[test]
    fn source_path_joins_root() {
        let config = Config::new(Path::new("/cfg"));
        assert_eq!(config.source_path("ripgreprc"), PathBuf::from("/cfg/ripgreprc"));
    }

    #[test]
    fn with_bindings_overrides_table() {
        let config = Config::with_bindings(
            Path::new("/cfg"),
            vec![Binding::new("only", vec![Rule::any("~/.only")])],
        );
        assert_eq!(config.bindings.len(), 1);
        assert_eq!(config.bindings[0].name, "only");
    }
}

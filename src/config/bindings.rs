//! The binding table: managed artifacts and their destination rules.
//!
//! Configuration data expressed as code. Adding a managed artifact means
//! adding one binding here; nothing else changes.
use super::rules::{Binding, Rule};

/// The static, ordered table of managed configuration artifacts.
#[must_use]
pub fn table() -> Vec<Binding> {
    vec![
        Binding::new("ripgreprc", vec![Rule::any("~/.config/ripgreprc")]),
        Binding::new(
            "neovide",
            vec![
                Rule::windows("%LocalAppData%/neovide"),
                Rule::any("~/.config/neovide"),
            ],
        ),
        Binding::new(
            "clangd",
            vec![
                Rule::windows("%LocalAppData%/clangd"),
                Rule::linux("~/.config/clangd"),
                Rule::macos("%LibraryPreferences%/clangd"),
            ],
        ),
    ]
}

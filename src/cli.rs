use clap::{Parser, Subcommand, ValueEnum};

use crate::platform::Os;

/// Top-level CLI entry point for the config synchronization engine.
#[derive(Parser, Debug)]
#[command(
    name = "cfgsync",
    about = "Cross-platform config-file symlink synchronizer",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Preview changes without applying
    #[arg(short = 'n', long, global = true)]
    pub dry_run: bool,

    /// Override the detected platform
    #[arg(long, global = true, value_name = "OS")]
    pub sys: Option<SysArg>,

    /// Override the managed source tree root directory
    #[arg(long, global = true)]
    pub root: Option<std::path::PathBuf>,
}

/// Platform override accepted by `--sys`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SysArg {
    Windows,
    Linux,
    Macos,
}

impl From<SysArg> for Os {
    fn from(sys: SysArg) -> Self {
        match sys {
            SysArg::Windows => Self::Windows,
            SysArg::Linux => Self::Linux,
            SysArg::Macos => Self::Macos,
        }
    }
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Link configuration artifacts into place
    Sync(SyncOpts),
    /// Create the local working branch from origin/main
    Init,
    /// Commit local changes and rebase them onto origin/main
    Save,
    /// Fetch upstream changes into the source tree
    Fetch,
    /// Print version information
    Version,
}

impl Command {
    /// Subcommand name used for the per-command log file.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Sync(_) => "sync",
            Self::Init => "init",
            Self::Save => "save",
            Self::Fetch => "fetch",
            Self::Version => "version",
        }
    }
}

/// Options for the `sync` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct SyncOpts {
    /// Remove managed configuration links instead of creating them
    #[arg(short, long)]
    pub clean: bool,
}

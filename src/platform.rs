use std::fmt;

/// Operating system a rule can be scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    Linux,
    Macos,
    Windows,
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linux => write!(f, "linux"),
            Self::Macos => write!(f, "macos"),
            Self::Windows => write!(f, "windows"),
        }
    }
}

/// Platform information for the current run.
///
/// Built once at startup, either from host detection or from an explicit
/// `--sys` override, and threaded into rule selection and token registry
/// construction. Never stored as ambient global state.
#[derive(Debug, Clone)]
pub struct Platform {
    pub os: Os,
}

impl Platform {
    /// Detect the current platform.
    #[must_use]
    pub fn detect() -> Self {
        Self {
            os: Self::detect_os(),
        }
    }

    /// Create a platform with an explicit OS (CLI override or tests).
    #[must_use]
    pub const fn with_os(os: Os) -> Self {
        Self { os }
    }

    #[must_use]
    pub fn is_linux(&self) -> bool {
        self.os == Os::Linux
    }

    #[must_use]
    pub fn is_macos(&self) -> bool {
        self.os == Os::Macos
    }

    #[must_use]
    pub fn is_windows(&self) -> bool {
        self.os == Os::Windows
    }

    fn detect_os() -> Os {
        if cfg!(target_os = "windows") {
            Os::Windows
        } else if cfg!(target_os = "macos") {
            Os::Macos
        } else {
            // Default to Linux for other Unix-like systems
            Os::Linux
        }
    }
}

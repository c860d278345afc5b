//! Host platform abstraction.
//!
//! Everything that differs between Windows and Unix-like hosts sits behind
//! the [`Platform`] trait: executable lookup, privilege checks, the system
//! package manager and persistent PATH changes. [`current`] picks the
//! implementation for the running host.

use std::fmt;
use std::path::PathBuf;

use crate::config::PathScope;
use crate::detection::PackageManager;
use crate::environment::PathSet;
use crate::error::Result;
use crate::requirements::Tool;
use crate::ui::UserInterface;

pub mod posix;
#[cfg(windows)]
pub mod win;

pub use posix::Posix;
#[cfg(windows)]
pub use win::Windows;

/// Operating system family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformKind {
    /// Windows: PHP is provisioned by download, PATH lives in the registry.
    Windows,
    /// Linux, macOS and other Unix-like systems.
    Posix,
}

impl PlatformKind {
    /// The family of the running host.
    pub fn host() -> Self {
        if cfg!(windows) {
            PlatformKind::Windows
        } else {
            PlatformKind::Posix
        }
    }
}

impl fmt::Display for PlatformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformKind::Windows => write!(f, "Windows"),
            PlatformKind::Posix => write!(f, "{}", std::env::consts::OS),
        }
    }
}

/// Platform-specific operations used by the installer.
pub trait Platform {
    /// Operating system family.
    fn kind(&self) -> PlatformKind;

    /// Resolve `tool` on the search path.
    fn locate_executable(&self, tool: Tool) -> Option<PathBuf>;

    /// Whether the process runs with administrator/root rights.
    fn is_elevated(&self) -> bool;

    /// The system package manager, if one is supported.
    fn package_manager(&self) -> Option<PackageManager>;

    /// Persist `additions` on PATH for future shells.
    fn update_persistent_path(
        &self,
        additions: &PathSet,
        scope: PathScope,
        ui: &mut dyn UserInterface,
    ) -> Result<()>;
}

/// The platform implementation for the running host.
pub fn current() -> Result<Box<dyn Platform>> {
    #[cfg(windows)]
    {
        Ok(Box::new(Windows::detect()))
    }
    #[cfg(not(windows))]
    {
        Ok(Box::new(Posix::detect()?))
    }
}

//! Login shell detection.
//!
//! Determines which profile file receives PATH exports on Unix-like hosts
//! and how an export line is spelled for that shell.

use std::path::{Path, PathBuf};

/// Known shell types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellType {
    Bash,
    Zsh,
    Fish,
    Unknown,
}

impl ShellType {
    /// Parse shell type from executable name.
    pub fn from_executable(exe: &str) -> Self {
        let name = Path::new(exe)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_lowercase();

        match name.as_str() {
            "bash" => ShellType::Bash,
            "zsh" => ShellType::Zsh,
            "fish" => ShellType::Fish,
            _ => ShellType::Unknown,
        }
    }

    /// Detect the user's login shell from `$SHELL`.
    pub fn detect() -> Self {
        std::env::var("SHELL")
            .map(|s| Self::from_executable(&s))
            .unwrap_or(ShellType::Unknown)
    }

    /// Profile file that is sourced by new interactive shells.
    ///
    /// Unknown shells fall back to `~/.bashrc`.
    pub fn profile_path(&self, home: &Path) -> PathBuf {
        match self {
            ShellType::Zsh => home.join(".zshrc"),
            ShellType::Fish => home.join(".config/fish/config.fish"),
            ShellType::Bash | ShellType::Unknown => home.join(".bashrc"),
        }
    }

    /// The profile line that prepends `dir` to PATH.
    pub fn export_line(&self, dir: &Path) -> String {
        match self {
            ShellType::Fish => format!("set -gx PATH \"{}\" $PATH", dir.display()),
            _ => format!("export PATH=\"{}:$PATH\"", dir.display()),
        }
    }
}

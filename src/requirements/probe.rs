//! Executable lookup on the search path.
//!
//! Tools are resolved by walking PATH entries directly rather than shelling
//! out to `which`/`where`, whose behavior differs between systems.
//!
//! # Example
//!
//! ```no_run
//! use tome::requirements::probe::{DependencyProbe, Tool};
//!
//! let probe = DependencyProbe::from_env();
//! if probe.locate(Tool::Git).is_none() {
//!     println!("git is missing");
//! }
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

/// Tools the installer cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    Git,
    Php,
    Arcanist,
}

impl Tool {
    /// Executable name without extension.
    pub fn executable(&self) -> &'static str {
        match self {
            Tool::Git => "git",
            Tool::Php => "php",
            Tool::Arcanist => "arc",
        }
    }

    /// Human-readable name.
    pub fn label(&self) -> &'static str {
        match self {
            Tool::Git => "Git",
            Tool::Php => "PHP",
            Tool::Arcanist => "Arcanist",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
pub fn is_executable(_path: &Path) -> bool {
    true
}

/// Resolve a tool's binary path by iterating over PATH entries.
///
/// Each directory is tried with the bare name first, then with every entry
/// of `extensions` appended (`.exe`, `.bat`, ... on Windows). Returns the
/// first candidate that exists and is executable.
pub fn resolve_tool_path(
    tool: &str,
    path_entries: &[PathBuf],
    extensions: &[String],
) -> Option<PathBuf> {
    for dir in path_entries {
        let candidate = dir.join(tool);
        if candidate.is_file() && is_executable(&candidate) {
            return Some(candidate);
        }
        for ext in extensions {
            let candidate = dir.join(format!("{}{}", tool, ext));
            if candidate.is_file() && is_executable(&candidate) {
                return Some(candidate);
            }
        }
    }
    None
}

/// Parse the system PATH environment variable into a list of directories.
pub fn parse_system_path() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default()
}

/// Executable extensions from `PATHEXT` (Windows only; empty elsewhere).
pub fn executable_extensions() -> Vec<String> {
    if !cfg!(windows) {
        return Vec::new();
    }
    std::env::var("PATHEXT")
        .unwrap_or_else(|_| ".COM;.EXE;.BAT;.CMD".to_string())
        .split(';')
        .map(str::trim)
        .filter(|ext| !ext.is_empty())
        .map(|ext| ext.to_lowercase())
        .collect()
}

/// Looks up tools on a fixed search path.
#[derive(Debug, Clone, Default)]
pub struct DependencyProbe {
    search_path: Vec<PathBuf>,
    extensions: Vec<String>,
}

impl DependencyProbe {
    /// Probe the PATH of the current process.
    pub fn from_env() -> Self {
        Self::new(parse_system_path(), executable_extensions())
    }

    /// Probe an explicit search path.
    pub fn new(search_path: Vec<PathBuf>, extensions: Vec<String>) -> Self {
        Self {
            search_path,
            extensions,
        }
    }

    /// Directories searched, in order.
    pub fn search_path(&self) -> &[PathBuf] {
        &self.search_path
    }

    /// Resolve an executable by name.
    pub fn locate_executable(&self, name: &str) -> Option<PathBuf> {
        let found = resolve_tool_path(name, &self.search_path, &self.extensions);
        tracing::debug!("Lookup of '{}' on PATH: {:?}", name, found);
        found
    }

    /// Resolve one of the known tools.
    pub fn locate(&self, tool: Tool) -> Option<PathBuf> {
        self.locate_executable(tool.executable())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_executable(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, "#!/bin/sh\n").unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        }
        path
    }

    #[test]
    fn tool_executable_names() {
        assert_eq!(Tool::Git.executable(), "git");
        assert_eq!(Tool::Php.executable(), "php");
        assert_eq!(Tool::Arcanist.executable(), "arc");
        assert_eq!(Tool::Php.to_string(), "PHP");
    }

    #[test]
    fn resolves_first_matching_entry() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        make_executable(second.path(), "git");
        let expected = make_executable(first.path(), "git");

        let entries = vec![first.path().to_path_buf(), second.path().to_path_buf()];
        assert_eq!(resolve_tool_path("git", &entries, &[]), Some(expected));
    }

    #[test]
    fn missing_tool_is_none() {
        let temp = TempDir::new().unwrap();
        let entries = vec![temp.path().to_path_buf()];
        assert!(resolve_tool_path("php", &entries, &[]).is_none());
    }

    #[test]
    fn directories_are_not_executables() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("git")).unwrap();
        let entries = vec![temp.path().to_path_buf()];
        assert!(resolve_tool_path("git", &entries, &[]).is_none());
    }

    #[test]
    #[cfg(unix)]
    fn non_executable_files_are_skipped() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("php"), "").unwrap();
        let entries = vec![temp.path().to_path_buf()];
        assert!(resolve_tool_path("php", &entries, &[]).is_none());
    }

    #[test]
    fn extensions_are_tried() {
        let temp = TempDir::new().unwrap();
        let expected = make_executable(temp.path(), "php.exe");
        let entries = vec![temp.path().to_path_buf()];
        let exts = vec![".exe".to_string()];
        assert_eq!(resolve_tool_path("php", &entries, &exts), Some(expected));
    }

    #[test]
    fn probe_locates_known_tools() {
        let temp = TempDir::new().unwrap();
        make_executable(temp.path(), "arc");
        let probe = DependencyProbe::new(vec![temp.path().to_path_buf()], Vec::new());

        assert!(probe.locate(Tool::Arcanist).is_some());
        assert!(probe.locate(Tool::Git).is_none());
    }

    #[test]
    fn empty_probe_finds_nothing() {
        let probe = DependencyProbe::default();
        assert!(probe.search_path().is_empty());
        assert!(probe.locate(Tool::Git).is_none());
    }
}

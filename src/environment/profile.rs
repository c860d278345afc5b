//! Shell profile updates on Unix-like hosts.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::shell::ShellType;

use super::path::PathSet;

/// Append one PATH export per directory in `dirs` to `profile`.
///
/// Lines already present in the profile are not written again. The profile
/// and its parent directories are created when missing. Returns the lines
/// that were appended.
pub fn append_exports(profile: &Path, shell: ShellType, dirs: &PathSet) -> Result<Vec<String>> {
    let existing = if profile.exists() {
        fs::read_to_string(profile)?
    } else {
        String::new()
    };

    let lines: Vec<String> = dirs
        .dirs()
        .iter()
        .map(|dir| shell.export_line(dir))
        .filter(|line| !existing.lines().any(|l| l.trim() == line))
        .collect();

    if lines.is_empty() {
        tracing::debug!("{} already exports every directory", profile.display());
        return Ok(lines);
    }

    if let Some(parent) = profile.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut file = OpenOptions::new().create(true).append(true).open(profile)?;
    if !existing.is_empty() && !existing.ends_with('\n') {
        writeln!(file)?;
    }
    for line in &lines {
        writeln!(file, "{line}")?;
    }

    tracing::info!("Appended {} line(s) to {}", lines.len(), profile.display());
    Ok(lines)
}

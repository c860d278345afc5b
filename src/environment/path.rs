//! PATH bookkeeping: the set of directories to add and the merge rules.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::ui::UserInterface;

static PERCENT_VAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"%([^%;]+)%").unwrap());

/// Ordered set of directories that must be added to PATH.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathSet {
    dirs: Vec<PathBuf>,
}

impl PathSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `dir`, ignoring it if already present.
    pub fn add(&mut self, dir: impl Into<PathBuf>) {
        let dir = dir.into();
        if !self.dirs.contains(&dir) {
            self.dirs.push(dir);
        }
    }

    /// Whether there is nothing to add.
    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    /// Number of directories.
    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    /// Directories in insertion order.
    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }
}

/// Result of merging a [`PathSet`] into an existing PATH value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathMerge {
    /// The merged PATH value.
    pub value: String,
    /// Segments dropped because they appeared earlier in the value.
    pub duplicates: Vec<String>,
    /// Kept segments that do not exist on disk.
    pub missing: Vec<String>,
}

impl PathMerge {
    /// Whether the merged value differs from `original`.
    pub fn changed(&self, original: &str) -> bool {
        self.value != original
    }

    /// Report duplicates and missing segments as warnings.
    pub fn warn(&self, ui: &mut dyn UserInterface) {
        for segment in &self.duplicates {
            tracing::warn!("Duplicate PATH segment: {}", segment);
            ui.warning(&format!("Removing duplicate PATH entry {segment}"));
        }
        for segment in &self.missing {
            tracing::warn!("Missing PATH segment: {}", segment);
            ui.warning(&format!("PATH entry {segment} does not exist"));
        }
    }
}

/// Merge `additions` into `existing`.
///
/// New directories come first, followed by the existing segments in their
/// original order. Segments are trimmed; empty ones are dropped; exact
/// repeats are skipped and recorded in [`PathMerge::duplicates`]. Segments
/// for which `exists` is false are kept and recorded in
/// [`PathMerge::missing`].
pub fn merge_path<F>(existing: &str, additions: &PathSet, separator: char, exists: F) -> PathMerge
where
    F: Fn(&Path) -> bool,
{
    let new_segments = additions
        .dirs()
        .iter()
        .map(|d| d.to_string_lossy().into_owned());
    let old_segments = existing.split(separator).map(|s| s.trim().to_string());

    let mut merge = PathMerge::default();
    let mut kept: Vec<String> = Vec::new();

    for segment in new_segments.chain(old_segments) {
        if segment.is_empty() {
            continue;
        }
        if kept.contains(&segment) {
            merge.duplicates.push(segment);
            continue;
        }
        if !exists(Path::new(&segment)) {
            merge.missing.push(segment.clone());
        }
        kept.push(segment);
    }

    merge.value = kept.join(&separator.to_string());
    merge
}

/// Expand `%NAME%` references as Windows does for `REG_EXPAND_SZ` values.
///
/// Names that `lookup` does not know are left as written.
pub fn expand_percent_vars<F>(value: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    PERCENT_VAR_RE
        .replace_all(value, |caps: &Captures| {
            lookup(&caps[1]).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

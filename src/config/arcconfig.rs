//! The per-project `.arcconfig` file.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// File name written into the project directory.
pub const ARCCONFIG_FILE: &str = ".arcconfig";

/// Key holding the Phabricator service URI.
pub const PHABRICATOR_URI_KEY: &str = "phabricator.uri";

/// Contents of `.arcconfig`.
///
/// Keys serialize in sorted order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ArcConfig {
    entries: BTreeMap<String, String>,
}

impl ArcConfig {
    /// Configuration pointing at the Phabricator instance `uri`.
    pub fn new(uri: impl Into<String>) -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(PHABRICATOR_URI_KEY.to_string(), uri.into());
        Self { entries }
    }

    /// The configured Phabricator URI.
    pub fn phabricator_uri(&self) -> Option<&str> {
        self.entries.get(PHABRICATOR_URI_KEY).map(String::as_str)
    }

    /// Whether the URI parses as an absolute URL.
    pub fn has_valid_uri(&self) -> bool {
        self.phabricator_uri()
            .is_some_and(|uri| reqwest::Url::parse(uri).is_ok())
    }

    /// Render as JSON with 4-space indentation and no trailing newline.
    pub fn to_json(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Write `.arcconfig` into `dir`, replacing any existing file.
    ///
    /// The document goes to a temporary sibling first and is renamed into
    /// place, so readers never observe a partial file.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(ARCCONFIG_FILE);
        let tmp = dir.join(format!("{ARCCONFIG_FILE}.tmp"));

        fs::write(&tmp, self.to_json()?)?;
        if let Err(e) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }

        tracing::debug!("Wrote {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn renders_exact_document() {
        let config = ArcConfig::new("https://phab.example.com");
        assert_eq!(
            config.to_json().unwrap(),
            "{\n    \"phabricator.uri\": \"https://phab.example.com\"\n}"
        );
    }

    #[test]
    fn write_replaces_existing_file() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(ARCCONFIG_FILE), "stale").unwrap();

        let path = ArcConfig::new("https://phab.example.com")
            .write_to(temp.path())
            .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("https://phab.example.com"));
        assert!(!content.contains("stale"));
        assert!(!temp.path().join(".arcconfig.tmp").exists());
    }

    #[test]
    fn validates_uri() {
        assert!(ArcConfig::new("https://phab.example.com").has_valid_uri());
        assert!(!ArcConfig::new("phab.example.com").has_valid_uri());
    }

    #[test]
    fn write_into_missing_directory_fails() {
        let temp = TempDir::new().unwrap();
        let result = ArcConfig::new("https://phab.example.com").write_to(&temp.path().join("nope"));
        assert!(result.is_err());
    }
}

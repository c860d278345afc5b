//! Optional operator overrides stored in `<install root>/config.json`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, TomeError};

/// File name of the settings file inside the install root.
pub const SETTINGS_FILE: &str = "config.json";

/// Overrides read from `config.json`.
///
/// Every field is optional; absent fields keep the built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Clone URI for libphutil.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub libphutil_uri: Option<String>,

    /// Clone URI for arcanist.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arcanist_uri: Option<String>,

    /// Page listing the Windows PHP builds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub php_listing_url: Option<String>,

    /// Install exactly this PHP version instead of the newest one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub php_version: Option<String>,

    /// Extensions to enable in php.ini.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub php_extensions: Option<Vec<String>>,
}

impl Settings {
    /// Location of the settings file for `root`.
    pub fn path(root: &Path) -> PathBuf {
        root.join(SETTINGS_FILE)
    }

    /// Load settings for `root`.
    ///
    /// A missing file yields the defaults. A file that cannot be read or
    /// parsed is a [`TomeError::ConfigError`].
    pub fn load(root: &Path) -> Result<Self> {
        let path = Self::path(root);
        if !path.exists() {
            tracing::debug!("No settings file at {}", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|e| TomeError::ConfigError {
            path: path.clone(),
            message: e.to_string(),
        })?;
        let settings: Settings =
            serde_json::from_str(&content).map_err(|e| TomeError::ConfigError {
                path: path.clone(),
                message: e.to_string(),
            })?;

        tracing::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }
}

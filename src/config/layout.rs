//! The resolved installation layout.
//!
//! Every procedure receives a [`Layout`] instead of reading globals: it fixes
//! the install root, the directories derived from it, the upstream
//! repositories and the PHP provisioning parameters.

use std::fmt;
use std::path::PathBuf;

use crate::error::{Result, TomeError};

use super::settings::Settings;

/// Upstream repository for the libphutil library.
pub const DEFAULT_LIBPHUTIL_URI: &str = "https://github.com/phacility/libphutil.git";

/// Upstream repository for arcanist.
pub const DEFAULT_ARCANIST_URI: &str = "https://github.com/phacility/arcanist.git";

/// Listing of Windows PHP builds.
pub const DEFAULT_PHP_LISTING_URL: &str = "https://windows.php.net/downloads/releases/";

/// Extensions enabled in php.ini when settings name none.
pub const DEFAULT_PHP_EXTENSIONS: &[&str] = &["curl", "mbstring"];

/// Name of the install root below the home directory.
pub const DEFAULT_ROOT_NAME: &str = ".arcanist";

/// Where persistent PATH changes are written on Windows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PathScope {
    /// Current user only (`HKCU\Environment`).
    User,
    /// Whole machine, requires administrator rights.
    #[default]
    System,
}

impl fmt::Display for PathScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathScope::User => write!(f, "user"),
            PathScope::System => write!(f, "system"),
        }
    }
}

/// A repository to keep synchronized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSpec {
    /// Logical name used in messages.
    pub name: String,
    /// Clone URI.
    pub uri: String,
    /// Checkout directory.
    pub dir: PathBuf,
}

/// Resolved installation layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Install root (`~/.arcanist` by default).
    pub root: PathBuf,
    /// libphutil checkout. Synchronized before arcanist.
    pub libphutil: RepoSpec,
    /// arcanist checkout.
    pub arcanist: RepoSpec,
    /// PHP build listing page.
    pub php_listing_url: String,
    /// Pinned PHP version, if any.
    pub php_version: Option<String>,
    /// Extensions to enable in php.ini.
    pub php_extensions: Vec<String>,
    /// Scope for persistent PATH changes.
    pub scope: PathScope,
}

impl Layout {
    /// Layout rooted at `root` with built-in defaults.
    pub fn new(root: impl Into<PathBuf>, scope: PathScope) -> Self {
        let root = root.into();
        Self {
            libphutil: RepoSpec {
                name: "libphutil".to_string(),
                uri: DEFAULT_LIBPHUTIL_URI.to_string(),
                dir: root.join("libphutil"),
            },
            arcanist: RepoSpec {
                name: "arcanist".to_string(),
                uri: DEFAULT_ARCANIST_URI.to_string(),
                dir: root.join("arcanist"),
            },
            php_listing_url: DEFAULT_PHP_LISTING_URL.to_string(),
            php_version: None,
            php_extensions: DEFAULT_PHP_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            scope,
            root,
        }
    }

    /// Layout rooted at `root`, with overrides from its `config.json`.
    pub fn load(root: impl Into<PathBuf>, scope: PathScope) -> Result<Self> {
        let layout = Self::new(root, scope);
        let settings = Settings::load(&layout.root)?;
        Ok(layout.with_settings(settings))
    }

    /// Apply operator overrides.
    pub fn with_settings(mut self, settings: Settings) -> Self {
        if let Some(uri) = settings.libphutil_uri {
            self.libphutil.uri = uri;
        }
        if let Some(uri) = settings.arcanist_uri {
            self.arcanist.uri = uri;
        }
        if let Some(url) = settings.php_listing_url {
            self.php_listing_url = url;
        }
        if settings.php_version.is_some() {
            self.php_version = settings.php_version;
        }
        if let Some(extensions) = settings.php_extensions {
            self.php_extensions = extensions;
        }
        self
    }

    /// The default install root, `~/.arcanist`.
    pub fn default_root() -> Result<PathBuf> {
        dirs::home_dir()
            .map(|home| home.join(DEFAULT_ROOT_NAME))
            .ok_or_else(|| TomeError::EnvironmentError {
                message: "Could not determine the home directory; pass --arcbase-dir".to_string(),
            })
    }

    /// Directory holding the `arc` launcher.
    pub fn arcanist_bin(&self) -> PathBuf {
        self.arcanist.dir.join("bin")
    }

    /// Extracted PHP runtime.
    pub fn php_dir(&self) -> PathBuf {
        self.root.join("php")
    }

    /// PHP extension DLLs.
    pub fn php_ext_dir(&self) -> PathBuf {
        self.php_dir().join("ext")
    }

    /// Cached downloads.
    pub fn downloads_dir(&self) -> PathBuf {
        self.root.join("downloads")
    }

    /// Repositories in synchronization order.
    pub fn repos(&self) -> [&RepoSpec; 2] {
        [&self.libphutil, &self.arcanist]
    }
}

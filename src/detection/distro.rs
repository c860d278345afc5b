//! Linux distribution detection from `os-release`.

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static OS_RELEASE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*([A-Z][A-Z0-9_]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|(\S*))\s*$"#)
        .expect("os-release pattern is valid")
});

/// Locations of the os-release file, in lookup order.
const OS_RELEASE_PATHS: &[&str] = &["/etc/os-release", "/usr/lib/os-release"];

/// Identity of a Linux distribution.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Distro {
    /// Lowercase distribution id (`ubuntu`, `fedora`, `arch`).
    pub id: String,

    /// Distributions this one derives from (`ID_LIKE`).
    pub id_like: Vec<String>,

    /// Human-readable name, if given.
    pub pretty_name: Option<String>,
}

impl Distro {
    /// Detect the running distribution. Returns `None` off Linux or when no
    /// os-release file is readable.
    pub fn detect() -> Option<Self> {
        if !cfg!(target_os = "linux") {
            return None;
        }
        OS_RELEASE_PATHS
            .iter()
            .find_map(|p| Self::from_file(Path::new(p)))
    }

    /// Parse an os-release file.
    pub fn from_file(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        parse_os_release(&content)
    }

    /// Whether this distribution is `family` or derives from it.
    pub fn is_like(&self, family: &str) -> bool {
        self.id == family || self.id_like.iter().any(|l| l == family)
    }
}

/// Parse os-release content. Returns `None` when there is no `ID`.
pub fn parse_os_release(content: &str) -> Option<Distro> {
    let mut distro = Distro::default();

    for line in content.lines() {
        let Some(caps) = OS_RELEASE_LINE.captures(line) else {
            continue;
        };
        let value = caps
            .get(2)
            .or_else(|| caps.get(3))
            .or_else(|| caps.get(4))
            .map(|m| m.as_str())
            .unwrap_or("");

        match &caps[1] {
            "ID" => distro.id = value.to_lowercase(),
            "ID_LIKE" => {
                distro.id_like = value.split_whitespace().map(str::to_lowercase).collect()
            }
            "PRETTY_NAME" => distro.pretty_name = Some(value.to_string()),
            _ => {}
        }
    }

    if distro.id.is_empty() {
        None
    } else {
        Some(distro)
    }
}

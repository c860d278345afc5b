//! Discovery of Windows PHP builds from the vendor download listing.
//!
//! The listing is an HTML page with one link per archive. The releases page
//! prints a `sha256:` digest after each link; the plain directory index does
//! not, and its digests live in [`CHECKSUM_FILE`] next to the archives.
//! Only full runtime archives are recognized
//! (`php-X.Y.Z[-nts]-Win32-<toolset>-<arch>.zip`); debug and development
//! packs are ignored.

use regex::Regex;
use reqwest::Url;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::error::{Result, TomeError};

/// Digest file published alongside the archives.
pub const CHECKSUM_FILE: &str = "sha256sum.txt";

static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)href\s*=\s*["']?(?P<href>(?:[^"'\s>]*/)?(?P<file>php-(?P<version>\d+\.\d+\.\d+)(?P<nts>-nts)?-Win32-(?P<toolset>(?:vc|vs)(?P<toolset_num>\d+))-(?P<arch>x86|x64)\.zip))["'\s>]"#,
    )
    .unwrap()
});

static ANY_HREF_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bhref\s*=").unwrap());

static SHA256_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"sha256:\s*(?P<digest>[0-9a-fA-F]{64})").unwrap());

/// A PHP release version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PhpVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl FromStr for PhpVersion {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split('.').collect();
        if parts.len() != 3 {
            return Err(format!("expected MAJOR.MINOR.PATCH, got '{s}'"));
        }
        let parse = |p: &str| {
            p.parse::<u32>()
                .map_err(|_| format!("invalid version component '{p}' in '{s}'"))
        };
        Ok(Self {
            major: parse(parts[0])?,
            minor: parse(parts[1])?,
            patch: parse(parts[2])?,
        })
    }
}

impl fmt::Display for PhpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// CPU architecture of a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arch {
    X86,
    X64,
}

impl Arch {
    /// Architecture matching the running host, if PHP ships builds for it.
    pub fn host() -> Option<Self> {
        match std::env::consts::ARCH {
            "x86" => Some(Arch::X86),
            "x86_64" => Some(Arch::X64),
            _ => None,
        }
    }

    /// Tag used in archive names.
    pub fn tag(&self) -> &'static str {
        match self {
            Arch::X86 => "x86",
            Arch::X64 => "x64",
        }
    }

    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "x86" => Some(Arch::X86),
            "x64" => Some(Arch::X64),
            _ => None,
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A downloadable PHP build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseInfo {
    /// Release version.
    pub version: PhpVersion,
    /// Absolute download URL.
    pub url: String,
    /// SHA-256 digest printed next to the link, lowercase hex. `None` when
    /// the listing only publishes digests in [`CHECKSUM_FILE`].
    pub sha256: Option<String>,
    /// Archive file name as listed.
    pub file_name: String,
    /// Thread-safe build (no `-nts` suffix).
    pub thread_safe: bool,
    /// Compiler toolset tag, e.g. `vs16`.
    pub toolset: String,
    /// Numeric part of the toolset, used to prefer newer compilers.
    pub toolset_version: u32,
    /// Target architecture.
    pub arch: Arch,
}

/// Extract every runtime archive from a listing page.
///
/// Relative links are resolved against `base`. A `sha256:` digest is taken
/// from the text between a link and the next link of any kind, so digests
/// of unrecognized archives never attach to a runtime archive.
pub fn parse_listing(html: &str, base: &Url) -> Vec<ReleaseInfo> {
    let mut releases = Vec::new();

    for caps in LINK_RE.captures_iter(html) {
        let Some(whole) = caps.get(0) else { continue };
        let segment_end = ANY_HREF_RE
            .find_at(html, whole.end())
            .map(|m| m.start())
            .unwrap_or(html.len());
        let segment = &html[whole.end()..segment_end];

        let file_name = caps["file"].to_string();
        let Ok(url) = base.join(&caps["href"]) else {
            tracing::debug!("Unresolvable link {}", &caps["href"]);
            continue;
        };
        let (Ok(version), Some(arch)) = (
            caps["version"].parse::<PhpVersion>(),
            Arch::from_tag(&caps["arch"].to_ascii_lowercase()),
        ) else {
            continue;
        };

        releases.push(ReleaseInfo {
            version,
            url: url.to_string(),
            sha256: SHA256_RE
                .captures(segment)
                .map(|digest| digest["digest"].to_lowercase()),
            file_name,
            thread_safe: caps.name("nts").is_none(),
            toolset: caps["toolset"].to_lowercase(),
            toolset_version: caps["toolset_num"].parse().unwrap_or(0),
            arch,
        });
    }

    releases
}

/// Parse a `sha256sum`-style digest file into file name to digest.
///
/// Accepts both `DIGEST  NAME` and the binary-mode `DIGEST *NAME` form.
/// Digests are lowercased; malformed lines are skipped.
pub fn parse_checksums(text: &str) -> HashMap<String, String> {
    let mut digests = HashMap::new();
    for line in text.lines() {
        let mut fields = line.split_whitespace();
        let (Some(digest), Some(name)) = (fields.next(), fields.next()) else {
            continue;
        };
        if digest.len() != 64 || !digest.bytes().all(|b| b.is_ascii_hexdigit()) {
            continue;
        }
        digests.insert(
            name.trim_start_matches('*').to_string(),
            digest.to_lowercase(),
        );
    }
    digests
}

/// URL of the digest file for the listing at `listing_url`.
pub fn checksum_url(listing_url: &str) -> Result<String> {
    let base = listing_base(listing_url)?;
    base.join(CHECKSUM_FILE)
        .map(|url| url.to_string())
        .map_err(|e| TomeError::ReleaseNotFound {
            url: listing_url.to_string(),
            message: format!("cannot locate {CHECKSUM_FILE}: {e}"),
        })
}

fn listing_base(url: &str) -> Result<Url> {
    Url::parse(url).map_err(|e| TomeError::ReleaseNotFound {
        url: url.to_string(),
        message: format!("invalid listing URL: {e}"),
    })
}

/// Pick the build to install.
///
/// Only thread-safe builds for `arch` qualify. With `pinned`, only that
/// version qualifies; otherwise the newest version wins. Ties go to the
/// newer toolset.
pub fn select_release<'a>(
    releases: &'a [ReleaseInfo],
    arch: Arch,
    pinned: Option<PhpVersion>,
) -> Option<&'a ReleaseInfo> {
    releases
        .iter()
        .filter(|r| r.thread_safe && r.arch == arch)
        .filter(|r| pinned.is_none_or(|v| r.version == v))
        .max_by_key(|r| (r.version, r.toolset_version))
}

/// Resolve the release to install from the listing at `url`.
pub fn resolve_release(
    html: &str,
    url: &str,
    arch: Arch,
    pinned: Option<PhpVersion>,
) -> Result<ReleaseInfo> {
    let base = listing_base(url)?;
    let releases = parse_listing(html, &base);
    tracing::debug!("Found {} PHP archives at {}", releases.len(), url);

    select_release(&releases, arch, pinned)
        .cloned()
        .ok_or_else(|| TomeError::ReleaseNotFound {
            url: url.to_string(),
            message: match pinned {
                Some(v) => format!("no thread-safe {arch} build of PHP {v}"),
                None => format!("no thread-safe {arch} build listed"),
            },
        })
}

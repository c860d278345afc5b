//! PHP runtime provisioning for Windows hosts.
//!
//! Unix-like hosts get PHP from the system package manager. On Windows the
//! runtime is fetched from the vendor download listing:
//!
//! 1. [`release`] - Find the newest matching build and its published digest,
//!    falling back to the listing's `sha256sum.txt`
//! 2. [`download`] - Fetch the archive unless it is already cached
//! 3. [`checksum`] - Verify the archive before anything is unpacked
//! 4. [`extract`] - Unpack into `<root>/php`
//! 5. [`php_ini`] - Generate `php.ini` with the required extensions enabled

pub mod checksum;
pub mod download;
pub mod extract;
pub mod php_ini;
pub mod release;

use std::fs;
use std::path::PathBuf;

pub use checksum::{sha256_file, verify_sha256};
pub use download::Downloader;
pub use extract::{extract_archive, is_extracted};
pub use php_ini::{ExtensionAction, IniPatch};
pub use release::{checksum_url, parse_checksums, resolve_release, Arch, PhpVersion, ReleaseInfo};

use crate::config::{Layout, Settings};
use crate::error::{Result, TomeError};
use crate::ui::UserInterface;

/// What provisioning did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionReport {
    /// The installed build.
    pub release: ReleaseInfo,
    /// Directory containing `php.exe`; goes on PATH.
    pub php_dir: PathBuf,
    /// Whether the archive was downloaded in this run.
    pub downloaded: bool,
    /// Whether the archive was extracted in this run.
    pub extracted: bool,
}

/// Downloads, verifies and configures a PHP runtime.
pub struct PhpProvisioner<'a> {
    layout: &'a Layout,
    downloader: Downloader,
    arch: Arch,
}

impl<'a> PhpProvisioner<'a> {
    /// Create a provisioner for an explicit architecture.
    pub fn new(layout: &'a Layout, downloader: Downloader, arch: Arch) -> Self {
        Self {
            layout,
            downloader,
            arch,
        }
    }

    /// Create a provisioner with the default downloader.
    ///
    /// `arch` is `None` when PHP publishes no build for the host, which is a
    /// missing requirement.
    pub fn for_arch(layout: &'a Layout, arch: Option<Arch>) -> Result<Self> {
        let arch = arch.ok_or_else(|| TomeError::RequirementMissing {
            requirement: "php".to_string(),
            message: format!(
                "No PHP builds are published for {}. Install PHP manually and re-run tome.",
                std::env::consts::ARCH
            ),
        })?;
        Ok(Self::new(layout, Downloader::new()?, arch))
    }

    fn pinned_version(&self) -> Result<Option<PhpVersion>> {
        self.layout
            .php_version
            .as_deref()
            .map(str::parse::<PhpVersion>)
            .transpose()
            .map_err(|message| TomeError::ConfigError {
                path: Settings::path(&self.layout.root),
                message: format!("php_version: {message}"),
            })
    }

    /// Digest for `release` from the listing's digest file.
    fn published_digest(&self, release: &ReleaseInfo) -> Result<String> {
        let url = checksum_url(&self.layout.php_listing_url)?;
        tracing::debug!("Fetching digests from {}", url);
        let text = self.downloader.fetch_text(&url)?;
        parse_checksums(&text)
            .remove(&release.file_name)
            .ok_or_else(|| TomeError::ReleaseNotFound {
                url,
                message: format!("no SHA-256 published for {}", release.file_name),
            })
    }

    /// Make a configured PHP runtime available under the install root.
    ///
    /// Each step is skipped when its result is already present. The archive
    /// is verified before extraction; on a digest mismatch it is deleted and
    /// [`TomeError::ChecksumMismatch`] is returned.
    pub fn provision(&self, ui: &mut dyn UserInterface) -> Result<ProvisionReport> {
        let pinned = self.pinned_version()?;
        let listing_url = &self.layout.php_listing_url;

        ui.message(&format!("Looking up PHP releases at {listing_url}..."));
        let html = self.downloader.fetch_text(listing_url)?;
        let mut release = resolve_release(&html, listing_url, self.arch, pinned)?;
        let expected = match release.sha256.clone() {
            Some(digest) => digest,
            None => self.published_digest(&release)?,
        };
        release.sha256 = Some(expected.clone());
        tracing::info!("Selected {} ({})", release.file_name, release.url);
        ui.message(&format!(
            "Selected PHP {} ({}, {})",
            release.version, release.toolset, release.arch
        ));

        let archive = self
            .layout
            .downloads_dir()
            .join(format!("php-{}.zip", release.version));
        let downloaded = if archive.is_file() {
            ui.message(&format!("Using cached {}", archive.display()));
            false
        } else {
            let mut spinner = ui.start_spinner("Downloading PHP...");
            match self.downloader.download_to(&release.url, &archive) {
                Ok(_) => spinner.finish_success("Downloaded PHP"),
                Err(e) => {
                    spinner.finish_error("Download failed");
                    return Err(e);
                }
            }
            true
        };

        ui.message("Verifying PHP ZIP against published SHA-256...");
        if let Err(e) = verify_sha256(&archive, &expected) {
            if matches!(e, TomeError::ChecksumMismatch { .. }) {
                let _ = fs::remove_file(&archive);
            }
            return Err(e);
        }
        ui.success("Hashes match.");

        let php_dir = self.layout.php_dir();
        let version = release.version.to_string();
        let extracted = if is_extracted(&php_dir, &version) {
            ui.message(&format!("PHP {version} is already extracted."));
            false
        } else {
            ui.message("Extracting ZIP...");
            extract_archive(&archive, &php_dir, &version)?;
            true
        };

        ui.message("Updating php.ini configuration...");
        let patch = IniPatch::enabling(
            self.layout.php_ext_dir(),
            self.layout.php_extensions.as_slice(),
        );
        let ini = php_dir.join(php_ini::INI_FILE);
        let changes = patch.apply_file(&php_dir.join(php_ini::INI_TEMPLATE), &ini)?;
        for change in &changes {
            ui.message(change);
        }
        ui.success(&format!("Finished writing {}", ini.display()));

        Ok(ProvisionReport {
            release,
            php_dir,
            downloaded,
            extracted,
        })
    }
}

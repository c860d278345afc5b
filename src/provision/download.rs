//! HTTP access for the PHP listing and archive downloads.

use reqwest::blocking::{Client, Response};
use std::fs::{self, File};
use std::path::Path;
use std::time::Duration;

use crate::error::{Result, TomeError};

/// Blocking HTTP client used by the provisioner.
///
/// Only the connection is time-limited; archive transfers may take as long
/// as they need.
pub struct Downloader {
    client: Client,
    connect_timeout: Duration,
}

impl Downloader {
    /// Create a downloader with a 30-second connect timeout.
    pub fn new() -> Result<Self> {
        Self::with_connect_timeout(Duration::from_secs(30))
    }

    /// Create a downloader with a custom connect timeout.
    pub fn with_connect_timeout(connect_timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("tome/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(connect_timeout)
            .timeout(None::<Duration>)
            .build()?;
        Ok(Self {
            client,
            connect_timeout,
        })
    }

    /// Get the configured connect timeout.
    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    fn get(&self, url: &str) -> Result<Response> {
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send()?;
        if !response.status().is_success() {
            return Err(TomeError::DownloadFailed {
                url: url.to_string(),
                message: format!("HTTP {}", response.status()),
            });
        }
        Ok(response)
    }

    /// Fetch a page as text.
    pub fn fetch_text(&self, url: &str) -> Result<String> {
        Ok(self.get(url)?.text()?)
    }

    /// Download `url` to `dest`.
    ///
    /// The body is streamed to a `.part` sibling that is renamed into place
    /// once complete, so an interrupted transfer never leaves a file at
    /// `dest`. Returns the number of bytes written.
    pub fn download_to(&self, url: &str, dest: &Path) -> Result<u64> {
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut response = self.get(url)?;
        let part = dest.with_extension("part");
        let written = {
            let mut file = File::create(&part)?;
            match response.copy_to(&mut file) {
                Ok(n) => n,
                Err(e) => {
                    drop(file);
                    let _ = fs::remove_file(&part);
                    return Err(e.into());
                }
            }
        };
        fs::rename(&part, dest)?;

        tracing::info!("Downloaded {} bytes to {}", written, dest.display());
        Ok(written)
    }
}

//! Archive extraction into the PHP directory.

use std::fs::{self, File};
use std::path::Path;

use zip::ZipArchive;

use crate::error::Result;

/// Marker file recording which release a directory was extracted from.
pub const RELEASE_STAMP: &str = ".tome-release";

/// Whether `dest` already holds an extraction of `version`.
pub fn is_extracted(dest: &Path, version: &str) -> bool {
    fs::read_to_string(dest.join(RELEASE_STAMP))
        .map(|stamp| stamp.trim() == version)
        .unwrap_or(false)
}

/// Extract `archive` into `dest` and stamp it with `version`.
///
/// Entries whose names would land outside `dest` make the extraction fail.
/// Returns the number of archive entries.
pub fn extract_archive(archive: &Path, dest: &Path, version: &str) -> Result<usize> {
    let file = File::open(archive)?;
    let mut zip = ZipArchive::new(file)?;
    let entries = zip.len();

    fs::create_dir_all(dest)?;
    zip.extract(dest)?;
    fs::write(dest.join(RELEASE_STAMP), version)?;

    tracing::debug!("Extracted {} entries into {}", entries, dest.display());
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TomeError;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::{FileOptions, ZipWriter};

    fn write_zip(path: &Path, files: &[(&str, &str)]) {
        let mut zip = ZipWriter::new(File::create(path).unwrap());
        for (name, content) in files {
            zip.start_file::<_, ()>(*name, FileOptions::default())
                .unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
        zip.finish().unwrap();
    }

    #[test]
    fn extracts_and_stamps() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("php.zip");
        write_zip(
            &archive,
            &[("php.exe", "MZ"), ("ext/php_curl.dll", "dll")],
        );
        let dest = temp.path().join("php");

        let entries = extract_archive(&archive, &dest, "8.3.12").unwrap();

        assert_eq!(entries, 2);
        assert_eq!(fs::read_to_string(dest.join("php.exe")).unwrap(), "MZ");
        assert!(dest.join("ext/php_curl.dll").exists());
        assert!(is_extracted(&dest, "8.3.12"));
        assert!(!is_extracted(&dest, "8.3.13"));
    }

    #[test]
    fn missing_directory_is_not_extracted() {
        let temp = TempDir::new().unwrap();
        assert!(!is_extracted(&temp.path().join("php"), "8.3.12"));
    }

    #[test]
    fn corrupt_archive_is_archive_error() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("php.zip");
        fs::write(&archive, "definitely not a zip").unwrap();

        let err = extract_archive(&archive, &temp.path().join("php"), "8.3.12").unwrap_err();

        assert!(matches!(err, TomeError::Archive(_)));
        assert!(!temp.path().join("php").exists());
    }

    #[test]
    fn refuses_entries_escaping_destination() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("evil.zip");
        write_zip(&archive, &[("../outside.txt", "gotcha")]);
        let dest = temp.path().join("php");

        let result = extract_archive(&archive, &dest, "8.3.12");

        assert!(result.is_err());
        assert!(!temp.path().join("outside.txt").exists());
        assert!(!is_extracted(&dest, "8.3.12"));
    }
}

//! SHA-256 verification of downloaded archives.

use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{Result, TomeError};

/// Hex-encoded SHA-256 digest of the file at `path`.
pub fn sha256_file(path: &Path) -> Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 64 * 1024];

    loop {
        let n = file.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    Ok(hex::encode(&hasher.finalize()[..]))
}

/// Check that the file at `path` hashes to `expected` (hex, any case).
pub fn verify_sha256(path: &Path, expected: &str) -> Result<()> {
    let actual = sha256_file(path)?;
    if actual.eq_ignore_ascii_case(expected.trim()) {
        Ok(())
    } else {
        Err(TomeError::ChecksumMismatch {
            path: path.to_path_buf(),
            expected: expected.trim().to_lowercase(),
            actual,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    // sha256("hello world")
    const HELLO: &str = "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9";

    #[test]
    fn hashes_file_contents() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a.zip");
        fs::write(&path, "hello world").unwrap();
        assert_eq!(sha256_file(&path).unwrap(), HELLO);
    }

    #[test]
    fn comparison_ignores_case() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a.zip");
        fs::write(&path, "hello world").unwrap();
        verify_sha256(&path, &HELLO.to_uppercase()).unwrap();
    }

    #[test]
    fn one_byte_difference_is_mismatch() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a.zip");
        fs::write(&path, "hello worle").unwrap();

        let err = verify_sha256(&path, HELLO).unwrap_err();
        match err {
            TomeError::ChecksumMismatch {
                expected, actual, ..
            } => {
                assert_eq!(expected, HELLO);
                assert_ne!(actual, HELLO);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_file_is_io_error() {
        let temp = TempDir::new().unwrap();
        let err = sha256_file(&temp.path().join("nope.zip")).unwrap_err();
        assert!(matches!(err, TomeError::Io(_)));
    }
}

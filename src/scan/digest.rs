//! SHA-256 content digests, streamed in fixed size chunks.

use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};

use crate::error::ReadError;

/// Bytes read per call while hashing. Larger trades memory for fewer syscalls.
pub const CHUNK_SIZE: usize = 64 * 1024;

/// Lowercase hex SHA-256 of a file's bytes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Digest(String);

impl Digest {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Digest {
    fn from(hex: String) -> Self {
        Digest(hex)
    }
}

/// Hash everything `reader` yields until EOF.
pub fn digest_reader<R: Read>(mut reader: R) -> io::Result<Digest> {
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; CHUNK_SIZE];

    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buf[..n]);
    }

    Ok(Digest(format!("{:x}", hasher.finalize())))
}

/// Digest a file. Any failure to open or read it (missing, a directory,
/// permission denied) comes back as a ReadError for the caller to skip.
pub fn digest_file(path: &Path) -> Result<Digest, ReadError> {
    let read_error = |source| ReadError {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(read_error)?;
    digest_reader(file).map_err(read_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    // sha256("") and sha256("abc") from FIPS 180-2
    const EMPTY: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
    const ABC: &str = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";

    #[test]
    fn known_vectors() {
        assert_eq!(digest_reader(&b""[..]).unwrap().as_str(), EMPTY);
        assert_eq!(digest_reader(&b"abc"[..]).unwrap().as_str(), ABC);
    }

    #[test]
    fn file_digest_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        fs::write(&path, "same bytes").unwrap();

        let first = digest_file(&path).unwrap();
        let second = digest_file(&path).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.as_str().len(), 64);
    }

    #[test]
    fn identical_content_same_digest_different_content_differs() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a"), "payload").unwrap();
        fs::write(dir.path().join("b"), "payload").unwrap();
        fs::write(dir.path().join("c"), "payloaD").unwrap();

        let a = digest_file(&dir.path().join("a")).unwrap();
        let b = digest_file(&dir.path().join("b")).unwrap();
        let c = digest_file(&dir.path().join("c")).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn content_spanning_several_chunks() {
        let data = vec![7u8; CHUNK_SIZE * 3 + 11];
        let mut hasher = Sha256::new();
        hasher.update(&data);
        let expected = format!("{:x}", hasher.finalize());

        assert_eq!(digest_reader(&data[..]).unwrap().as_str(), expected);
    }

    #[test]
    fn missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope");
        let err = digest_file(&path).unwrap_err();
        assert_eq!(err.path, path);
        assert_eq!(err.source.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn directory_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(digest_file(dir.path()).is_err());
    }
}

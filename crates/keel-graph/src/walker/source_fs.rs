//! Source file access seam.

use std::fmt;
use std::io::ErrorKind;
use std::path::Path;

/// Why a source read failed. Only the first two are candidates for a
/// resolution fallback.
#[derive(Debug)]
pub enum ReadFailure {
    IsDirectory,
    NotFound,
    Other(std::io::Error),
}

impl fmt::Display for ReadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IsDirectory => f.write_str("is a directory"),
            Self::NotFound => f.write_str("no such file"),
            Self::Other(e) => write!(f, "{e}"),
        }
    }
}

pub trait SourceFs: Send + Sync {
    fn read_source(&self, path: &Path) -> Result<String, ReadFailure>;
}

/// Reads from the local filesystem. Invalid UTF-8 is replaced, not rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFs;

impl SourceFs for OsFs {
    fn read_source(&self, path: &Path) -> Result<String, ReadFailure> {
        match std::fs::read(path) {
            Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(ReadFailure::NotFound),
            Err(_) if path.is_dir() => Err(ReadFailure::IsDirectory),
            Err(e) => Err(ReadFailure::Other(e)),
        }
    }
}

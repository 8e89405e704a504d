//! Package registry errors.

use std::path::PathBuf;

use super::error_code::{self, KeelErrorCode};

/// Errors raised while enumerating packages or reading/writing manifests.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Unknown package: {name} (no manifest at {path})")]
    UnknownPackage { name: String, path: PathBuf },

    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid manifest {path}: {message}")]
    ManifestParse { path: PathBuf, message: String },

    #[error("Failed to write manifest {path}: {message}")]
    ManifestWrite { path: PathBuf, message: String },

    #[error("Invalid package discovery pattern {pattern}: {message}")]
    Discovery { pattern: String, message: String },
}

impl KeelErrorCode for RegistryError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownPackage { .. } => error_code::UNKNOWN_PACKAGE,
            Self::ManifestParse { .. } => error_code::MANIFEST_PARSE_ERROR,
            _ => error_code::REGISTRY_ERROR,
        }
    }
}

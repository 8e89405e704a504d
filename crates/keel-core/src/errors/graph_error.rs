//! Dependency graph errors.

use std::path::PathBuf;

use super::error_code::{self, KeelErrorCode};
use super::RegistryError;

/// Errors that can occur while building or querying the dependency graph.
///
/// None of these are retried. A failure while walking any entry point fails
/// the whole computation for the package that owns it.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("Cannot read dependencies for unnamed package (manifest of {package})")]
    InvalidPackage { package: String },

    #[error("Unresolvable entry point {path} (last tried {attempted}): {message}")]
    UnresolvableEntryPoint {
        path: PathBuf,
        attempted: PathBuf,
        message: String,
    },

    #[error("Failed to determine version for {dependency} required by {package}. Is it missing from the root manifest?")]
    UnresolvedVersion { dependency: String, package: String },

    #[error("Failed to parse {path}: {message}")]
    SourceParse { path: PathBuf, message: String },

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl GraphError {
    /// Returns true when the error originates from a query on a package the
    /// registry does not know.
    pub fn is_unknown_package(&self) -> bool {
        matches!(self, Self::Registry(RegistryError::UnknownPackage { .. }))
    }
}

impl KeelErrorCode for GraphError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidPackage { .. } => error_code::INVALID_PACKAGE,
            Self::UnresolvableEntryPoint { .. } => error_code::UNRESOLVABLE_ENTRY_POINT,
            Self::UnresolvedVersion { .. } => error_code::UNRESOLVED_VERSION,
            Self::SourceParse { .. } => error_code::SOURCE_PARSE_ERROR,
            Self::Registry(e) => e.error_code(),
        }
    }
}

//! Change-set detection errors.

use super::error_code::{self, KeelErrorCode};
use super::{GraphError, RegistryError};

/// Errors raised while mapping a version-control diff to changed packages,
/// or while expanding a change set through the dependency graph.
#[derive(Debug, thiserror::Error)]
pub enum ChangeSetError {
    #[error("Git error: {message}")]
    Git { message: String },

    #[error("Cannot resolve revision {revision}: {message}")]
    UnknownRevision { revision: String, message: String },

    #[error("Invalid testable pattern {pattern}: {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl KeelErrorCode for ChangeSetError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Graph(e) => e.error_code(),
            Self::Registry(e) => e.error_code(),
            _ => error_code::CHANGE_SET_ERROR,
        }
    }
}

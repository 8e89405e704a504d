//! Error handling for keel.
//! One error enum per subsystem, `thiserror` only.

pub mod change_set_error;
pub mod config_error;
pub mod error_code;
pub mod graph_error;
pub mod registry_error;

pub use change_set_error::ChangeSetError;
pub use config_error::ConfigError;
pub use error_code::KeelErrorCode;
pub use graph_error::GraphError;
pub use registry_error::RegistryError;

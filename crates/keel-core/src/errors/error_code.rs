//! KeelErrorCode trait for operator-facing error reporting.

/// Trait giving every keel error a stable, machine-readable code.
pub trait KeelErrorCode {
    /// Returns the error code string (e.g., "UNKNOWN_PACKAGE").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted report string: `[ERROR_CODE] message`.
    fn report_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const INVALID_PACKAGE: &str = "INVALID_PACKAGE";
pub const UNRESOLVABLE_ENTRY_POINT: &str = "UNRESOLVABLE_ENTRY_POINT";
pub const UNKNOWN_PACKAGE: &str = "UNKNOWN_PACKAGE";
pub const UNRESOLVED_VERSION: &str = "UNRESOLVED_VERSION";
pub const SOURCE_PARSE_ERROR: &str = "SOURCE_PARSE_ERROR";
pub const REGISTRY_ERROR: &str = "REGISTRY_ERROR";
pub const MANIFEST_PARSE_ERROR: &str = "MANIFEST_PARSE_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const CHANGE_SET_ERROR: &str = "CHANGE_SET_ERROR";

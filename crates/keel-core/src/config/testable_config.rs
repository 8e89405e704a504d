//! Testable-package discovery configuration.

use serde::{Deserialize, Serialize};

/// Glob patterns, relative to the package storage root, that mark a package
/// as having tests.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TestableConfig {
    #[serde(default)]
    pub patterns: Vec<String>,
}

impl TestableConfig {
    /// Returns the effective patterns, defaulting to
    /// `["**/*.test.js", "**/test/**/*.js"]`.
    pub fn effective_patterns(&self) -> Vec<String> {
        if self.patterns.is_empty() {
            vec!["**/*.test.js".to_string(), "**/test/**/*.js".to_string()]
        } else {
            self.patterns.clone()
        }
    }
}

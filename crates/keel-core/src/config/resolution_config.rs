//! Module resolution configuration.

use serde::{Deserialize, Serialize};

/// Knobs for the reduced module-resolution rules used by the walker.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ResolutionConfig {
    /// File tried when an import resolves to a directory. Default: "index.js".
    pub index_file: Option<String>,
    /// Source extensions without the leading dot. An extensionless import
    /// that is not found is retried with each one in order. Default: ["js"].
    #[serde(default)]
    pub extensions: Vec<String>,
    /// Additional module names treated as runtime builtins.
    #[serde(default)]
    pub extra_builtins: Vec<String>,
}

impl ResolutionConfig {
    /// Returns the effective index file, defaulting to "index.js".
    pub fn effective_index_file(&self) -> &str {
        self.index_file.as_deref().unwrap_or("index.js")
    }

    /// Returns the effective extension list, defaulting to `["js"]`.
    pub fn effective_extensions(&self) -> Vec<String> {
        if self.extensions.is_empty() {
            vec!["js".to_string()]
        } else {
            self.extensions.clone()
        }
    }
}

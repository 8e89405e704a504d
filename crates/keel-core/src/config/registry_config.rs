//! Package registry configuration.

use serde::{Deserialize, Serialize};

/// Where local packages live and where the root manifest is.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RegistryConfig {
    /// Package storage directory, relative to the repository root.
    /// Default: "packages/node_modules".
    pub storage_root: Option<String>,
    /// Root manifest, relative to the repository root. Default: "package.json".
    pub root_manifest: Option<String>,
}

impl RegistryConfig {
    /// Returns the effective storage root, defaulting to "packages/node_modules".
    pub fn effective_storage_root(&self) -> &str {
        self.storage_root.as_deref().unwrap_or("packages/node_modules")
    }

    /// Returns the effective root manifest, defaulting to "package.json".
    pub fn effective_root_manifest(&self) -> &str {
        self.root_manifest.as_deref().unwrap_or("package.json")
    }
}

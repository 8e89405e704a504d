//! Change-set detection configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ChangesConfig {
    /// Revision diffed against HEAD. Default: "upstream/master".
    pub base_ref: Option<String>,
    /// Path prefix whose files belong to the `docs` meta package. Default: "doc".
    pub docs_prefix: Option<String>,
}

impl ChangesConfig {
    /// Returns the effective base revision, defaulting to "upstream/master".
    pub fn effective_base_ref(&self) -> &str {
        self.base_ref.as_deref().unwrap_or("upstream/master")
    }

    /// Returns the effective docs prefix, defaulting to "doc".
    pub fn effective_docs_prefix(&self) -> &str {
        self.docs_prefix.as_deref().unwrap_or("doc")
    }
}

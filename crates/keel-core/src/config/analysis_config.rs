//! Analysis configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Worker threads for parallel package analysis. Default: rayon's choice.
    pub threads: Option<usize>,
}

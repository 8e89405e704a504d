//! Top-level keel configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{AnalysisConfig, ChangesConfig, RegistryConfig, ResolutionConfig, TestableConfig};
use crate::errors::ConfigError;

/// Project config file name, looked up in the repository root.
pub const PROJECT_CONFIG_FILE: &str = "keel.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`KEEL_*`)
/// 3. Project config (`keel.toml` in the repository root)
/// 4. User config (`~/.keel/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct KeelConfig {
    pub registry: RegistryConfig,
    pub resolution: ResolutionConfig,
    pub changes: ChangesConfig,
    pub testable: TestableConfig,
    pub analysis: AnalysisConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub storage_root: Option<String>,
    pub base_ref: Option<String>,
    pub threads: Option<usize>,
}

impl KeelConfig {
    /// Load configuration for the repository rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        ::tracing::warn!(error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        // Layer 3: project config
        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &KeelConfig) -> Result<(), ConfigError> {
        for ext in &config.resolution.extensions {
            if ext.is_empty() || ext.starts_with('.') {
                return Err(ConfigError::ValidationFailed {
                    field: "resolution.extensions".to_string(),
                    message: format!("'{ext}' must be a non-empty extension without a leading dot"),
                });
            }
        }
        if let Some(index_file) = &config.resolution.index_file {
            if index_file.is_empty() || index_file.contains('/') {
                return Err(ConfigError::ValidationFailed {
                    field: "resolution.index_file".to_string(),
                    message: "must be a plain file name".to_string(),
                });
            }
        }
        if config.analysis.threads == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "analysis.threads".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.registry.storage_root.as_deref() == Some("") {
            return Err(ConfigError::ValidationFailed {
                field: "registry.storage_root".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Absolute package storage directory for the repository at `root`.
    pub fn storage_dir(&self, root: &Path) -> PathBuf {
        root.join(self.registry.effective_storage_root())
    }

    /// Absolute root manifest path for the repository at `root`.
    pub fn root_manifest_path(&self, root: &Path) -> PathBuf {
        root.join(self.registry.effective_root_manifest())
    }

    /// Returns the user config path: `~/.keel/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".keel").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut KeelConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: KeelConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins wherever it sets a value.
    fn merge(base: &mut KeelConfig, other: &KeelConfig) {
        // Registry
        if other.registry.storage_root.is_some() {
            base.registry.storage_root = other.registry.storage_root.clone();
        }
        if other.registry.root_manifest.is_some() {
            base.registry.root_manifest = other.registry.root_manifest.clone();
        }

        // Resolution
        if other.resolution.index_file.is_some() {
            base.resolution.index_file = other.resolution.index_file.clone();
        }
        if !other.resolution.extensions.is_empty() {
            base.resolution.extensions = other.resolution.extensions.clone();
        }
        if !other.resolution.extra_builtins.is_empty() {
            base.resolution.extra_builtins = other.resolution.extra_builtins.clone();
        }

        // Changes
        if other.changes.base_ref.is_some() {
            base.changes.base_ref = other.changes.base_ref.clone();
        }
        if other.changes.docs_prefix.is_some() {
            base.changes.docs_prefix = other.changes.docs_prefix.clone();
        }

        // Testable
        if !other.testable.patterns.is_empty() {
            base.testable.patterns = other.testable.patterns.clone();
        }

        // Analysis
        if other.analysis.threads.is_some() {
            base.analysis.threads = other.analysis.threads;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `KEEL_STORAGE_ROOT`, `KEEL_BASE_REF`, `KEEL_THREADS`.
    fn apply_env_overrides(config: &mut KeelConfig) {
        if let Ok(val) = std::env::var("KEEL_STORAGE_ROOT") {
            config.registry.storage_root = Some(val);
        }
        if let Ok(val) = std::env::var("KEEL_ROOT_MANIFEST") {
            config.registry.root_manifest = Some(val);
        }
        if let Ok(val) = std::env::var("KEEL_BASE_REF") {
            config.changes.base_ref = Some(val);
        }
        if let Ok(val) = std::env::var("KEEL_THREADS") {
            if let Ok(v) = val.parse::<usize>() {
                config.analysis.threads = Some(v);
            }
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut KeelConfig, cli: &CliOverrides) {
        if let Some(ref v) = cli.storage_root {
            config.registry.storage_root = Some(v.clone());
        }
        if let Some(ref v) = cli.base_ref {
            config.changes.base_ref = Some(v.clone());
        }
        if let Some(v) = cli.threads {
            config.analysis.threads = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}

//! Configuration system for keel.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod analysis_config;
pub mod changes_config;
pub mod keel_config;
pub mod registry_config;
pub mod resolution_config;
pub mod testable_config;

pub use analysis_config::AnalysisConfig;
pub use changes_config::ChangesConfig;
pub use keel_config::{CliOverrides, KeelConfig};
pub use registry_config::RegistryConfig;
pub use resolution_config::ResolutionConfig;
pub use testable_config::TestableConfig;

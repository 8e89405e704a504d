//! # keel-core
//!
//! Shared foundation for the keel dependency graph engine:
//! package-name types, per-subsystem errors, layered TOML configuration,
//! and tracing setup.

pub mod config;
pub mod errors;
pub mod tracing;
pub mod types;

pub use config::KeelConfig;
pub use types::{FxHashMap, FxHashSet, PackageName};

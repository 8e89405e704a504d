//! Per-package dependency and dependent queries over the module walker.

pub mod dependencies;
pub mod dependents;

pub use dependencies::DependencyIndex;
pub use dependents::DependentIndex;

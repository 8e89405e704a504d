//! Shared data types for keel.

pub mod collections;
pub mod package_name;

pub use collections::{FxHashMap, FxHashSet};
pub use package_name::PackageName;

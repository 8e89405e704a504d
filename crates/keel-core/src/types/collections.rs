//! Re-exports of performance-oriented collection types.

pub use rustc_hash::{FxHashMap, FxHashSet};
pub use std::collections::{BTreeMap, BTreeSet};

/// Ordered package set. Iteration order is the sorted output order of every
/// graph query.
pub type PackageSet = BTreeSet<super::PackageName>;

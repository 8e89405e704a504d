//! # keel-graph
//!
//! Static dependency graph engine for JavaScript monorepos.
//!
//! - Registry: package discovery and manifest I/O under the storage root
//! - Entry points: a package's public source files from its manifest
//! - Resolution: builtin table, specifier classification, fallback policy
//! - Walker: tree-sitter import extraction and memoized relative-import walks
//! - Index: direct/transitive dependencies and dependents per package
//! - Graph: the query façade owning all per-run caches
//! - Manifest generation: versioned `dependencies` blocks per package
//! - Impact: changed, testable and affected packages

pub mod entry_points;
pub mod graph;
pub mod impact;
pub mod index;
pub mod manifest_gen;
pub mod registry;
pub mod resolution;
pub mod walker;

pub use graph::{DependencyGraph, DependencyQuery, DependentQuery};
pub use registry::{FsRegistry, PackageManifest, PackageRegistry};
pub use resolution::ResolutionPolicy;
pub use walker::{ModuleWalker, OsFs, SourceFs};

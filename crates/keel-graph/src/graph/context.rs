//! Shared state behind every graph query: registry, walker and caches.

use std::sync::{Arc, OnceLock};

use keel_core::errors::GraphError;
use keel_core::types::collections::PackageSet;
use keel_core::{FxHashSet, PackageName};
use moka::sync::Cache;

use crate::registry::PackageRegistry;
use crate::walker::ModuleWalker;

pub type PackageCache = Cache<PackageName, Arc<PackageSet>>;

/// One cache per query kind. Entries are never invalidated; a new
/// `DependencyGraph` starts from empty caches.
pub struct GraphCaches {
    pub direct_dependencies: PackageCache,
    pub transitive_dependencies: PackageCache,
    pub direct_dependents: PackageCache,
    pub transitive_dependents: PackageCache,
}

impl Default for GraphCaches {
    fn default() -> Self {
        Self {
            direct_dependencies: Cache::builder().name("direct-dependencies").build(),
            transitive_dependencies: Cache::builder().name("transitive-dependencies").build(),
            direct_dependents: Cache::builder().name("direct-dependents").build(),
            transitive_dependents: Cache::builder().name("transitive-dependents").build(),
        }
    }
}

/// The registered packages, listed once per run.
#[derive(Debug)]
pub struct LocalPackages {
    names: Vec<PackageName>,
    lookup: FxHashSet<PackageName>,
}

impl LocalPackages {
    pub fn new(mut names: Vec<PackageName>) -> Self {
        names.sort();
        names.dedup();
        let lookup = names.iter().cloned().collect();
        Self { names, lookup }
    }

    pub fn names(&self) -> &[PackageName] {
        &self.names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup.contains(name)
    }
}

pub struct GraphContext {
    pub registry: Arc<dyn PackageRegistry>,
    pub walker: ModuleWalker,
    pub caches: GraphCaches,
    local: OnceLock<Arc<LocalPackages>>,
}

impl GraphContext {
    pub fn new(registry: Arc<dyn PackageRegistry>, walker: ModuleWalker) -> Self {
        Self {
            registry,
            walker,
            caches: GraphCaches::default(),
            local: OnceLock::new(),
        }
    }

    pub fn local_packages(&self) -> Result<Arc<LocalPackages>, GraphError> {
        if let Some(local) = self.local.get() {
            return Ok(Arc::clone(local));
        }
        let local = Arc::new(LocalPackages::new(self.registry.list_all_packages()?));
        Ok(Arc::clone(self.local.get_or_init(|| local)))
    }
}

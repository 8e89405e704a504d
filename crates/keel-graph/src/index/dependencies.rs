//! Packages a package depends on.

use std::sync::Arc;

use keel_core::errors::GraphError;
use keel_core::types::collections::PackageSet;
use keel_core::{FxHashSet, PackageName};
use tracing::debug;

use crate::entry_points::entry_points;
use crate::graph::GraphContext;

#[derive(Clone, Copy)]
pub struct DependencyIndex<'g> {
    ctx: &'g GraphContext,
}

impl<'g> DependencyIndex<'g> {
    pub fn new(ctx: &'g GraphContext) -> Self {
        Self { ctx }
    }

    /// Union of the packages reachable from every entry point of `package`.
    pub fn direct(&self, package: &PackageName) -> Result<Arc<PackageSet>, GraphError> {
        if let Some(hit) = self.ctx.caches.direct_dependencies.get(package) {
            return Ok(hit);
        }

        let manifest = self.ctx.registry.read_manifest(package)?;
        let entries = entry_points(package, &manifest, self.ctx.registry.storage_root())?;
        debug!(%package, entry_points = entries.len(), "computing direct dependencies");

        let mut dependencies = PackageSet::new();
        for entry in &entries {
            let reached = self.ctx.walker.walk(entry)?;
            dependencies.extend(reached.iter().cloned());
        }

        let dependencies = Arc::new(dependencies);
        self.ctx
            .caches
            .direct_dependencies
            .insert(package.clone(), Arc::clone(&dependencies));
        Ok(dependencies)
    }

    /// Direct dependencies plus, for every local package among them, its own
    /// dependencies, repeated to closure. External packages are leaves.
    pub fn transitive(&self, package: &PackageName) -> Result<Arc<PackageSet>, GraphError> {
        if let Some(hit) = self.ctx.caches.transitive_dependencies.get(package) {
            return Ok(hit);
        }

        let local = self.ctx.local_packages()?;
        let mut closure = PackageSet::new();
        let mut expanded: FxHashSet<PackageName> = FxHashSet::default();
        expanded.insert(package.clone());
        let mut worklist = vec![package.clone()];

        while let Some(current) = worklist.pop() {
            if &current != package {
                if let Some(done) = self.ctx.caches.transitive_dependencies.get(&current) {
                    closure.extend(done.iter().cloned());
                    continue;
                }
            }
            for dependency in self.direct(&current)?.iter() {
                closure.insert(dependency.clone());
                if local.contains(dependency.as_str()) && expanded.insert(dependency.clone()) {
                    worklist.push(dependency.clone());
                }
            }
        }

        debug!(%package, count = closure.len(), "computed transitive dependencies");
        let closure = Arc::new(closure);
        self.ctx
            .caches
            .transitive_dependencies
            .insert(package.clone(), Arc::clone(&closure));
        Ok(closure)
    }
}

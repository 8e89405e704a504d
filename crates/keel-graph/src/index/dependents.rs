//! Local packages that depend on a package.

use std::sync::Arc;

use keel_core::errors::GraphError;
use keel_core::types::collections::PackageSet;
use keel_core::PackageName;
use rayon::prelude::*;
use tracing::debug;

use super::DependencyIndex;
use crate::graph::GraphContext;

#[derive(Clone, Copy)]
pub struct DependentIndex<'g> {
    ctx: &'g GraphContext,
    dependencies: DependencyIndex<'g>,
}

impl<'g> DependentIndex<'g> {
    pub fn new(ctx: &'g GraphContext) -> Self {
        Self {
            ctx,
            dependencies: DependencyIndex::new(ctx),
        }
    }

    /// Local packages whose direct dependencies contain `package`.
    pub fn direct(&self, package: &PackageName) -> Result<Arc<PackageSet>, GraphError> {
        if let Some(hit) = self.ctx.caches.direct_dependents.get(package) {
            return Ok(hit);
        }
        self.ctx.registry.read_manifest(package)?;

        let local = self.ctx.local_packages()?;
        self.warm(local.names());

        let mut dependents = PackageSet::new();
        for candidate in local.names() {
            if self.dependencies.direct(candidate)?.contains(package) {
                dependents.insert(candidate.clone());
            }
        }

        debug!(%package, count = dependents.len(), "computed direct dependents");
        let dependents = Arc::new(dependents);
        self.ctx
            .caches
            .direct_dependents
            .insert(package.clone(), Arc::clone(&dependents));
        Ok(dependents)
    }

    /// Closure of `direct` over the dependents found so far.
    pub fn transitive(&self, package: &PackageName) -> Result<Arc<PackageSet>, GraphError> {
        if let Some(hit) = self.ctx.caches.transitive_dependents.get(package) {
            return Ok(hit);
        }

        let mut found: PackageSet = self.direct(package)?.as_ref().clone();
        loop {
            let mut discovered = Vec::new();
            for member in &found {
                for dependent in self.direct(member)?.iter() {
                    if !found.contains(dependent) {
                        discovered.push(dependent.clone());
                    }
                }
            }
            if discovered.is_empty() {
                break;
            }
            found.extend(discovered);
        }

        debug!(%package, count = found.len(), "computed transitive dependents");
        let found = Arc::new(found);
        self.ctx
            .caches
            .transitive_dependents
            .insert(package.clone(), Arc::clone(&found));
        Ok(found)
    }

    /// Compute every local package's direct dependencies in parallel. Errors
    /// are dropped here and resurface, in package order, from the scan that
    /// follows.
    fn warm(&self, packages: &[PackageName]) {
        let dependencies = self.dependencies;
        packages.par_iter().for_each(|candidate| {
            let _ = dependencies.direct(candidate);
        });
    }
}

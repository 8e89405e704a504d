//! Query façade over the dependency and dependent indexes.
//!
//! A `DependencyGraph` is one analysis run: every result is memoized for its
//! lifetime and nothing is invalidated. Build a new graph to observe
//! filesystem changes.

pub mod context;

use std::path::Path;
use std::sync::Arc;

use keel_core::errors::GraphError;
use keel_core::types::collections::PackageSet;
use keel_core::{KeelConfig, PackageName};

pub use context::{GraphCaches, GraphContext, LocalPackages};

use crate::index::{DependencyIndex, DependentIndex};
use crate::registry::{FsRegistry, PackageRegistry};
use crate::resolution::ResolutionPolicy;
use crate::walker::{ModuleWalker, OsFs, SourceFs};

/// Options for [`DependencyGraph::list_dependencies`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DependencyQuery {
    pub include_transitive: bool,
    /// Keep only packages registered locally.
    pub local_only: bool,
}

impl Default for DependencyQuery {
    fn default() -> Self {
        Self {
            include_transitive: true,
            local_only: false,
        }
    }
}

/// Options for [`DependencyGraph::list_dependents`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DependentQuery {
    pub include_transitive: bool,
}

pub struct DependencyGraph {
    ctx: GraphContext,
}

impl DependencyGraph {
    pub fn new(
        registry: Arc<dyn PackageRegistry>,
        fs: Arc<dyn SourceFs>,
        policy: ResolutionPolicy,
    ) -> Self {
        let walker = ModuleWalker::new(fs, Arc::new(policy));
        Self {
            ctx: GraphContext::new(registry, walker),
        }
    }

    /// Graph over the on-disk repository at `root`.
    pub fn open(root: &Path, config: &KeelConfig) -> Self {
        Self::new(
            Arc::new(FsRegistry::from_config(root, config)),
            Arc::new(OsFs),
            ResolutionPolicy::from_config(&config.resolution),
        )
    }

    pub fn registry(&self) -> &dyn PackageRegistry {
        self.ctx.registry.as_ref()
    }

    pub fn policy(&self) -> &ResolutionPolicy {
        self.ctx.walker.policy()
    }

    pub fn dependencies(&self) -> DependencyIndex<'_> {
        DependencyIndex::new(&self.ctx)
    }

    pub fn dependents(&self) -> DependentIndex<'_> {
        DependentIndex::new(&self.ctx)
    }

    /// Local packages, sorted.
    pub fn list_all_packages(&self) -> Result<Vec<PackageName>, GraphError> {
        Ok(self.ctx.local_packages()?.names().to_vec())
    }

    pub fn local_packages(&self) -> Result<Arc<LocalPackages>, GraphError> {
        self.ctx.local_packages()
    }

    pub fn list_direct_dependencies(
        &self,
        package: &PackageName,
    ) -> Result<Vec<PackageName>, GraphError> {
        Ok(sorted(&*self.dependencies().direct(package)?))
    }

    pub fn list_transitive_dependencies(
        &self,
        package: &PackageName,
    ) -> Result<Vec<PackageName>, GraphError> {
        Ok(sorted(&*self.dependencies().transitive(package)?))
    }

    pub fn list_direct_dependents(
        &self,
        package: &PackageName,
    ) -> Result<Vec<PackageName>, GraphError> {
        Ok(sorted(&*self.dependents().direct(package)?))
    }

    pub fn list_transitive_dependents(
        &self,
        package: &PackageName,
    ) -> Result<Vec<PackageName>, GraphError> {
        Ok(sorted(&*self.dependents().transitive(package)?))
    }

    pub fn list_dependencies(
        &self,
        package: &PackageName,
        query: DependencyQuery,
    ) -> Result<Vec<PackageName>, GraphError> {
        let found = if query.include_transitive {
            self.dependencies().transitive(package)?
        } else {
            self.dependencies().direct(package)?
        };
        if !query.local_only {
            return Ok(sorted(&found));
        }
        let local = self.ctx.local_packages()?;
        Ok(found
            .iter()
            .filter(|name| local.contains(name.as_str()))
            .cloned()
            .collect())
    }

    /// Dependents are always local packages.
    pub fn list_dependents(
        &self,
        package: &PackageName,
        query: DependentQuery,
    ) -> Result<Vec<PackageName>, GraphError> {
        if query.include_transitive {
            self.list_transitive_dependents(package)
        } else {
            self.list_direct_dependents(package)
        }
    }
}

fn sorted(set: &PackageSet) -> Vec<PackageName> {
    set.iter().cloned().collect()
}

//! Writes each local package's `dependencies` block from its actual imports.
//!
//! Versions come from the root manifest's `dependencies`; a local package
//! missing there pins its own declared version. Packages are processed in
//! name order and the first failure stops the run, leaving already-written
//! manifests in place.

use std::collections::BTreeMap;

use keel_core::errors::GraphError;
use keel_core::PackageName;
use tracing::{debug, info};

use crate::graph::DependencyGraph;
use crate::registry::PackageManifest;

/// One rewritten manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedManifest {
    pub package: PackageName,
    pub dependencies: BTreeMap<String, String>,
}

pub struct ManifestGenerator<'g> {
    graph: &'g DependencyGraph,
}

impl<'g> ManifestGenerator<'g> {
    pub fn new(graph: &'g DependencyGraph) -> Self {
        Self { graph }
    }

    /// Regenerate every local package's manifest.
    pub fn generate_all(&self) -> Result<Vec<GeneratedManifest>, GraphError> {
        let registry = self.graph.registry();
        let root = registry.read_root_manifest()?;
        let packages = self.graph.list_all_packages()?;

        let mut written = Vec::with_capacity(packages.len());
        for package in packages {
            let dependencies = self.versioned_dependencies(&package, &root)?;
            let mut manifest = registry.read_manifest(&package)?;
            manifest.set_dependencies(&dependencies);
            registry.write_manifest(&package, &manifest)?;
            debug!(%package, count = dependencies.len(), "wrote dependencies");
            written.push(GeneratedManifest {
                package,
                dependencies,
            });
        }

        info!(packages = written.len(), "generated package manifests");
        Ok(written)
    }

    /// Direct dependencies of `package` paired with the version each should
    /// be declared at.
    pub fn versioned_dependencies(
        &self,
        package: &PackageName,
        root: &PackageManifest,
    ) -> Result<BTreeMap<String, String>, GraphError> {
        let policy = self.graph.policy();
        let local = self.graph.local_packages()?;

        let mut versioned = BTreeMap::new();
        for dependency in self.graph.list_direct_dependencies(package)? {
            if policy.is_builtin(dependency.as_str()) {
                continue;
            }
            let version = match root.dependency_version(dependency.as_str()) {
                Some(version) => version.to_string(),
                None if local.contains(dependency.as_str()) => self
                    .graph
                    .registry()
                    .read_manifest(&dependency)?
                    .version()
                    .map(str::to_string)
                    .ok_or_else(|| unresolved(&dependency, package))?,
                None => return Err(unresolved(&dependency, package)),
            };
            versioned.insert(dependency.into_inner(), version);
        }
        Ok(versioned)
    }
}

fn unresolved(dependency: &PackageName, package: &PackageName) -> GraphError {
    GraphError::UnresolvedVersion {
        dependency: dependency.to_string(),
        package: package.to_string(),
    }
}

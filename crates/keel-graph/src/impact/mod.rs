//! Change impact: which packages changed, which have tests, and which must be
//! retested because something they depend on changed.

pub mod file_map;
pub mod git;
pub mod testable;

use std::path::{Path, PathBuf};

use keel_core::errors::ChangeSetError;
use keel_core::types::collections::PackageSet;
use keel_core::{KeelConfig, PackageName};
use tracing::{debug, info};

pub use file_map::{file_to_package, is_meta_package, DOCS_PACKAGE, TOOLING_PACKAGE};
pub use git::changed_files;
pub use testable::discover_testable;

use crate::graph::DependencyGraph;

/// Repository layout and change-detection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImpactSettings {
    pub repo_root: PathBuf,
    /// Package storage directory relative to `repo_root`.
    pub storage_prefix: String,
    pub docs_prefix: String,
    pub base_ref: String,
    pub testable_patterns: Vec<String>,
}

impl ImpactSettings {
    pub fn from_config(repo_root: &Path, config: &KeelConfig) -> Self {
        Self {
            repo_root: repo_root.to_path_buf(),
            storage_prefix: config.registry.effective_storage_root().to_string(),
            docs_prefix: config.changes.effective_docs_prefix().to_string(),
            base_ref: config.changes.effective_base_ref().to_string(),
            testable_patterns: config.testable.effective_patterns(),
        }
    }
}

/// Options for [`ImpactAnalyzer::list_packages`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PackageQuery {
    /// Only packages changed since the base revision.
    pub changed: bool,
    /// Also count transitive dependents of changed packages as changed.
    pub include_transitive: bool,
}

/// Options for [`ImpactAnalyzer::select_testable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TestableQuery {
    pub changed: bool,
    /// Do not treat a tooling change as a reason to test everything.
    pub ignore_tooling: bool,
}

pub struct ImpactAnalyzer<'g> {
    graph: &'g DependencyGraph,
    settings: ImpactSettings,
}

impl<'g> ImpactAnalyzer<'g> {
    pub fn new(graph: &'g DependencyGraph, settings: ImpactSettings) -> Self {
        Self { graph, settings }
    }

    /// Owning packages (including meta packages) of the given changed files.
    pub fn packages_for_files<S: AsRef<str>>(&self, files: &[S]) -> Vec<PackageName> {
        let found: PackageSet = files
            .iter()
            .map(|file| {
                file_to_package(
                    file.as_ref(),
                    &self.settings.storage_prefix,
                    &self.settings.docs_prefix,
                )
            })
            .collect();
        found.into_iter().collect()
    }

    /// Packages touched between the base revision and `HEAD`.
    pub fn list_changed_packages(&self) -> Result<Vec<PackageName>, ChangeSetError> {
        let files = changed_files(&self.settings.repo_root, &self.settings.base_ref)?;
        let changed = self.packages_for_files(&files);
        info!(
            base_ref = %self.settings.base_ref,
            count = changed.len(),
            "found changed packages"
        );
        Ok(changed)
    }

    /// Local packages with at least one file matching a testable pattern.
    pub fn list_testable_packages(&self) -> Result<Vec<PackageName>, ChangeSetError> {
        let local = self.graph.local_packages()?;
        let mut testable =
            discover_testable(self.graph.registry().storage_root(), &self.settings.testable_patterns)?;
        testable.retain(|package| local.contains(package.as_str()));
        debug!(count = testable.len(), "found testable packages");
        Ok(testable)
    }

    /// `packages` plus the transitive dependents of every local member.
    /// Meta packages and packages no longer present are kept as given.
    pub fn expand_to_dependents(
        &self,
        packages: &[PackageName],
    ) -> Result<Vec<PackageName>, ChangeSetError> {
        let local = self.graph.local_packages()?;
        let mut expanded: PackageSet = packages.iter().cloned().collect();
        for package in packages {
            if local.contains(package.as_str()) {
                let dependents = self.graph.dependents().transitive(package)?;
                expanded.extend(dependents.iter().cloned());
            }
        }
        Ok(expanded.into_iter().collect())
    }

    pub fn list_packages(&self, query: PackageQuery) -> Result<Vec<PackageName>, ChangeSetError> {
        if !query.changed {
            return Ok(self.graph.list_all_packages()?);
        }
        let changed = self.list_changed_packages()?;
        self.packages_from_changes(&changed, query.include_transitive)
    }

    /// `list_packages` for an already known change set.
    pub fn packages_from_changes(
        &self,
        changed: &[PackageName],
        include_transitive: bool,
    ) -> Result<Vec<PackageName>, ChangeSetError> {
        if include_transitive {
            self.expand_to_dependents(changed)
        } else {
            Ok(changed.to_vec())
        }
    }

    /// Whether a test run is warranted: at least one package is selected.
    pub fn tests_required(&self, query: TestableQuery) -> Result<bool, ChangeSetError> {
        Ok(!self.select_testable(query)?.is_empty())
    }

    pub fn select_testable(&self, query: TestableQuery) -> Result<Vec<PackageName>, ChangeSetError> {
        let changed = if query.changed {
            Some(self.list_changed_packages()?)
        } else {
            None
        };
        self.testable_from_changes(changed.as_deref(), query.ignore_tooling)
    }

    /// `select_testable` for an already known change set; `None` means every
    /// package counts as changed.
    ///
    /// Changes are expanded to their transitive dependents before the
    /// testable filter applies, so a changed package without tests still
    /// selects the testable packages that depend on it.
    pub fn testable_from_changes(
        &self,
        changed: Option<&[PackageName]>,
        ignore_tooling: bool,
    ) -> Result<Vec<PackageName>, ChangeSetError> {
        let testable = self.list_testable_packages()?;
        let Some(changed) = changed else {
            return Ok(testable);
        };

        let tooling_changed = changed.iter().any(|p| p == TOOLING_PACKAGE);
        if tooling_changed && !ignore_tooling {
            info!("tooling changed, selecting every testable package");
            return Ok(testable);
        }

        let affected: PackageSet = self.expand_to_dependents(changed)?.into_iter().collect();
        Ok(testable
            .into_iter()
            .filter(|package| affected.contains(package))
            .collect())
    }
}

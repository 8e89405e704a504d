//! Shared fixtures for keel-graph integration tests.
#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use keel_core::errors::RegistryError;
use keel_core::PackageName;
use keel_graph::registry::{PackageManifest, PackageRegistry};
use keel_graph::walker::{ReadFailure, SourceFs};
use keel_graph::{DependencyGraph, ResolutionPolicy};
use serde_json::{json, Value};

pub const STORAGE_ROOT: &str = "/repo/packages/node_modules";

/// Registry held in memory. Writes replace the stored manifest.
pub struct MemoryRegistry {
    storage_root: PathBuf,
    manifests: Mutex<BTreeMap<PackageName, PackageManifest>>,
    root: PackageManifest,
}

impl MemoryRegistry {
    pub fn manifest(&self, package: &str) -> Option<PackageManifest> {
        self.manifests.lock().unwrap().get(package).cloned()
    }
}

impl PackageRegistry for MemoryRegistry {
    fn storage_root(&self) -> &Path {
        &self.storage_root
    }

    fn list_all_packages(&self) -> Result<Vec<PackageName>, RegistryError> {
        Ok(self.manifests.lock().unwrap().keys().cloned().collect())
    }

    fn read_manifest(&self, package: &PackageName) -> Result<PackageManifest, RegistryError> {
        self.manifests
            .lock()
            .unwrap()
            .get(package)
            .cloned()
            .ok_or_else(|| RegistryError::UnknownPackage {
                name: package.to_string(),
                path: self.package_dir(package).join("package.json"),
            })
    }

    fn write_manifest(
        &self,
        package: &PackageName,
        manifest: &PackageManifest,
    ) -> Result<(), RegistryError> {
        self.manifests
            .lock()
            .unwrap()
            .insert(package.clone(), manifest.clone());
        Ok(())
    }

    fn read_root_manifest(&self) -> Result<PackageManifest, RegistryError> {
        Ok(self.root.clone())
    }
}

/// In-memory sources with a read counter. Any path that is a proper prefix of
/// a stored file is a directory.
#[derive(Default)]
pub struct MemoryFs {
    files: HashMap<PathBuf, String>,
    reads: Mutex<HashMap<PathBuf, usize>>,
}

impl MemoryFs {
    pub fn reads_of(&self, path: impl AsRef<Path>) -> usize {
        self.reads
            .lock()
            .unwrap()
            .get(path.as_ref())
            .copied()
            .unwrap_or(0)
    }

    pub fn max_reads(&self) -> usize {
        self.reads.lock().unwrap().values().copied().max().unwrap_or(0)
    }

    pub fn total_reads(&self) -> usize {
        self.reads.lock().unwrap().values().sum()
    }
}

impl SourceFs for MemoryFs {
    fn read_source(&self, path: &Path) -> Result<String, ReadFailure> {
        *self
            .reads
            .lock()
            .unwrap()
            .entry(path.to_path_buf())
            .or_insert(0) += 1;
        if let Some(source) = self.files.get(path) {
            return Ok(source.clone());
        }
        if self.files.keys().any(|file| file.starts_with(path)) {
            return Err(ReadFailure::IsDirectory);
        }
        Err(ReadFailure::NotFound)
    }
}

struct FixturePackage {
    manifest: Value,
    files: Vec<(String, String)>,
}

/// A monorepo description that can live in memory or on disk.
#[derive(Default)]
pub struct Fixture {
    packages: BTreeMap<String, FixturePackage>,
    root_dependencies: Value,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            packages: BTreeMap::new(),
            root_dependencies: json!({}),
        }
    }

    /// Add a package; `manifest` should carry at least `name`.
    pub fn package(mut self, dir: &str, manifest: Value, files: &[(&str, &str)]) -> Self {
        self.packages.insert(
            dir.to_string(),
            FixturePackage {
                manifest,
                files: files
                    .iter()
                    .map(|(path, source)| (path.to_string(), source.to_string()))
                    .collect(),
            },
        );
        self
    }

    pub fn root_dependencies(mut self, dependencies: Value) -> Self {
        self.root_dependencies = dependencies;
        self
    }

    /// Three packages: `not-scoped` → `@example/second` → `@example/first`.
    pub fn example() -> Self {
        Self::new()
            .package(
                "not-scoped",
                json!({ "name": "not-scoped", "version": "1.0.0", "main": "index.js" }),
                &[
                    (
                        "index.js",
                        "const second = require('@example/second');\nconst util = require('./lib');\nmodule.exports = () => second(util);\n",
                    ),
                    ("lib/index.js", "const fs = require('fs');\nmodule.exports = require('external-dep-3/fp');\n"),
                    ("test/index.test.js", "require('../index');\n"),
                ],
            )
            .package(
                "@example/first",
                json!({ "name": "@example/first", "version": "1.0.0", "main": "./src/index.js" }),
                &[("src/index.js", "import dep from 'external-dep-1';\nexport default dep;\n")],
            )
            .package(
                "@example/second",
                json!({
                    "name": "@example/second",
                    "version": "1.0.0",
                    "main": "index.js",
                    "bin": { "second": "./bin/second.js" }
                }),
                &[
                    ("index.js", "export * from '@example/first/lib/helpers';\n"),
                    ("bin/second.js", "import path from 'node:path';\nimport dep from 'external-dep-2';\n"),
                ],
            )
            .root_dependencies(json!({
                "external-dep-1": "^0.0.1",
                "external-dep-2": "^0.2.0",
                "external-dep-3": "^3.0.0"
            }))
    }

    fn root_manifest(&self) -> Value {
        json!({ "name": "fixture-root", "private": true, "dependencies": self.root_dependencies })
    }

    pub fn in_memory(&self) -> (Arc<MemoryRegistry>, Arc<MemoryFs>) {
        let storage = PathBuf::from(STORAGE_ROOT);
        let mut manifests = BTreeMap::new();
        let mut files = HashMap::new();
        for (dir, package) in &self.packages {
            manifests.insert(
                PackageName::from(dir.as_str()),
                PackageManifest::from_value(package.manifest.clone()).unwrap(),
            );
            for (path, source) in &package.files {
                files.insert(storage.join(dir).join(path), source.clone());
            }
        }
        let registry = MemoryRegistry {
            storage_root: storage,
            manifests: Mutex::new(manifests),
            root: PackageManifest::from_value(self.root_manifest()).unwrap(),
        };
        let fs = MemoryFs {
            files,
            reads: Mutex::new(HashMap::new()),
        };
        (Arc::new(registry), Arc::new(fs))
    }

    pub fn memory_graph(&self) -> (DependencyGraph, Arc<MemoryRegistry>, Arc<MemoryFs>) {
        let (registry, fs) = self.in_memory();
        let graph = DependencyGraph::new(registry.clone(), fs.clone(), ResolutionPolicy::default());
        (graph, registry, fs)
    }

    /// Lay the fixture out under `repo` using the default layout.
    pub fn write_to(&self, repo: &Path) {
        let storage = repo.join("packages").join("node_modules");
        for (dir, package) in &self.packages {
            let package_dir = storage.join(dir);
            fs::create_dir_all(&package_dir).unwrap();
            fs::write(
                package_dir.join("package.json"),
                serde_json::to_string_pretty(&package.manifest).unwrap(),
            )
            .unwrap();
            for (path, source) in &package.files {
                let file = package_dir.join(path);
                fs::create_dir_all(file.parent().unwrap()).unwrap();
                fs::write(file, source).unwrap();
            }
        }
        fs::write(
            repo.join("package.json"),
            serde_json::to_string_pretty(&self.root_manifest()).unwrap(),
        )
        .unwrap();
    }
}

pub fn names(packages: &[PackageName]) -> Vec<&str> {
    packages.iter().map(PackageName::as_str).collect()
}

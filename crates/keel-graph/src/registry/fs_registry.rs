//! Filesystem-backed package registry.
//!
//! Packages are the directories directly under the storage root that carry a
//! `package.json`, plus `@scope/name` directories one level deeper.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use glob::Pattern;
use keel_core::errors::RegistryError;
use keel_core::{KeelConfig, PackageName};
use tracing::debug;

use super::{PackageManifest, PackageRegistry, MANIFEST_FILE};

#[derive(Debug, Clone)]
pub struct FsRegistry {
    storage_root: PathBuf,
    root_manifest: PathBuf,
}

impl FsRegistry {
    pub fn new(storage_root: impl Into<PathBuf>, root_manifest: impl Into<PathBuf>) -> Self {
        Self {
            storage_root: storage_root.into(),
            root_manifest: root_manifest.into(),
        }
    }

    /// Registry for the repository at `root` using the configured layout.
    pub fn from_config(root: &Path, config: &KeelConfig) -> Self {
        Self::new(config.storage_dir(root), config.root_manifest_path(root))
    }

    fn manifest_path(&self, package: &PackageName) -> PathBuf {
        self.package_dir(package).join(MANIFEST_FILE)
    }

    fn discover(&self, pattern: &str) -> Result<Vec<PackageName>, RegistryError> {
        let full = format!(
            "{}/{pattern}",
            Pattern::escape(&self.storage_root.to_string_lossy())
        );
        let paths = glob::glob(&full).map_err(|e| RegistryError::Discovery {
            pattern: full.clone(),
            message: e.to_string(),
        })?;

        let mut found = Vec::new();
        for entry in paths {
            let manifest = entry.map_err(|e| RegistryError::Io {
                path: e.path().to_path_buf(),
                source: e.into_error(),
            })?;
            let Some(dir) = manifest.parent() else { continue };
            let Ok(relative) = dir.strip_prefix(&self.storage_root) else {
                continue;
            };
            let name: Vec<String> = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            if !name.is_empty() {
                found.push(PackageName::new(name.join("/")));
            }
        }
        Ok(found)
    }
}

impl PackageRegistry for FsRegistry {
    fn storage_root(&self) -> &Path {
        &self.storage_root
    }

    fn list_all_packages(&self) -> Result<Vec<PackageName>, RegistryError> {
        let mut packages = self.discover(&format!("*/{MANIFEST_FILE}"))?;
        packages.extend(self.discover(&format!("@*/*/{MANIFEST_FILE}"))?);
        packages.retain(|p| !p.is_scoped() || p.as_str().contains('/'));
        packages.sort();
        packages.dedup();
        debug!(count = packages.len(), storage_root = %self.storage_root.display(), "discovered local packages");
        Ok(packages)
    }

    fn read_manifest(&self, package: &PackageName) -> Result<PackageManifest, RegistryError> {
        let path = self.manifest_path(package);
        let source = std::fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => RegistryError::UnknownPackage {
                name: package.to_string(),
                path: path.clone(),
            },
            _ => RegistryError::Io {
                path: path.clone(),
                source: e,
            },
        })?;
        PackageManifest::from_json_str(&source).map_err(|e| RegistryError::ManifestParse {
            path,
            message: e.to_string(),
        })
    }

    fn write_manifest(
        &self,
        package: &PackageName,
        manifest: &PackageManifest,
    ) -> Result<(), RegistryError> {
        let path = self.manifest_path(package);
        let contents = manifest
            .to_json_pretty()
            .map_err(|e| RegistryError::ManifestWrite {
                path: path.clone(),
                message: e.to_string(),
            })?;
        std::fs::write(&path, contents).map_err(|e| RegistryError::ManifestWrite {
            path,
            message: e.to_string(),
        })
    }

    fn read_root_manifest(&self) -> Result<PackageManifest, RegistryError> {
        let source = std::fs::read_to_string(&self.root_manifest).map_err(|e| RegistryError::Io {
            path: self.root_manifest.clone(),
            source: e,
        })?;
        PackageManifest::from_json_str(&source).map_err(|e| RegistryError::ManifestParse {
            path: self.root_manifest.clone(),
            message: e.to_string(),
        })
    }
}

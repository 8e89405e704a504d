//! Package registry seam: discovery of local packages and manifest I/O.

pub mod fs_registry;
pub mod manifest;

use std::path::{Path, PathBuf};

use keel_core::errors::RegistryError;
use keel_core::PackageName;

pub use fs_registry::FsRegistry;
pub use manifest::PackageManifest;

/// Manifest file name inside every package directory.
pub const MANIFEST_FILE: &str = "package.json";

/// Source of local packages and their manifests.
///
/// The graph engine only reads through this trait; manifest writes come from
/// manifest generation.
pub trait PackageRegistry: Send + Sync {
    /// Directory holding one sub-directory per local package.
    fn storage_root(&self) -> &Path;

    /// Every locally registered package, sorted.
    fn list_all_packages(&self) -> Result<Vec<PackageName>, RegistryError>;

    /// Load a package's manifest. Fails with `UnknownPackage` when absent.
    fn read_manifest(&self, package: &PackageName) -> Result<PackageManifest, RegistryError>;

    fn write_manifest(
        &self,
        package: &PackageName,
        manifest: &PackageManifest,
    ) -> Result<(), RegistryError>;

    /// The repository root manifest holding the canonical dependency versions.
    fn read_root_manifest(&self) -> Result<PackageManifest, RegistryError>;

    /// Directory of a package inside the storage root.
    fn package_dir(&self, package: &PackageName) -> PathBuf {
        self.storage_root().join(package.as_str())
    }
}

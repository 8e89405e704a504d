//! Entry points: the files through which a package exposes code.

use std::path::{Path, PathBuf};

use keel_core::errors::GraphError;
use keel_core::PackageName;

use crate::registry::PackageManifest;
use crate::resolution::normalize;

/// `main`, then every `bin` target, then every browser replacement file,
/// resolved against `<storage_root>/<manifest name>/`. Duplicates are
/// dropped keeping the first occurrence.
///
/// `package` only labels the error when the manifest has no name.
pub fn entry_points(
    package: &PackageName,
    manifest: &PackageManifest,
    storage_root: &Path,
) -> Result<Vec<PathBuf>, GraphError> {
    let name = manifest.name().ok_or_else(|| GraphError::InvalidPackage {
        package: package.to_string(),
    })?;
    let package_dir = storage_root.join(name);

    let declared = manifest
        .main()
        .into_iter()
        .chain(manifest.bin_entries())
        .chain(manifest.browser_entries());

    let mut entries: Vec<PathBuf> = Vec::new();
    for relative in declared {
        let path = normalize(&package_dir.join(relative));
        if !entries.contains(&path) {
            entries.push(path);
        }
    }
    Ok(entries)
}

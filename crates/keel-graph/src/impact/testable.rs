//! Packages that carry tests.

use std::path::Path;

use glob::Pattern;
use keel_core::errors::{ChangeSetError, RegistryError};
use keel_core::PackageName;

/// Packages under `storage_root` owning at least one file that matches one of
/// `patterns` (globs relative to the storage root). Sorted, deduplicated.
pub fn discover_testable(
    storage_root: &Path,
    patterns: &[String],
) -> Result<Vec<PackageName>, ChangeSetError> {
    let base = Pattern::escape(&storage_root.to_string_lossy());
    let mut packages = Vec::new();

    for pattern in patterns {
        let full = format!("{base}/{pattern}");
        let matches = glob::glob(&full).map_err(|e| ChangeSetError::InvalidPattern {
            pattern: pattern.clone(),
            message: e.to_string(),
        })?;
        for entry in matches {
            let path = entry.map_err(|e| {
                ChangeSetError::Registry(RegistryError::Io {
                    path: e.path().to_path_buf(),
                    source: e.into_error(),
                })
            })?;
            let Ok(relative) = path.strip_prefix(storage_root) else {
                continue;
            };
            let relative = relative.to_string_lossy().replace('\\', "/");
            let package = PackageName::from_specifier(&relative);
            if !package.as_str().is_empty() && relative.contains('/') {
                packages.push(package);
            }
        }
    }

    packages.sort();
    packages.dedup();
    Ok(packages)
}

//! Repository path → owning package.

use keel_core::PackageName;

/// Meta package for documentation changes.
pub const DOCS_PACKAGE: &str = "docs";
/// Meta package for everything outside package storage and docs.
pub const TOOLING_PACKAGE: &str = "tooling";

/// Map a repository-relative path to the package that owns it.
///
/// Paths under `storage_prefix` belong to the package directory they sit in;
/// paths starting with `docs_prefix` belong to [`DOCS_PACKAGE`]; anything else
/// is [`TOOLING_PACKAGE`].
pub fn file_to_package(path: &str, storage_prefix: &str, docs_prefix: &str) -> PackageName {
    let path = path.replace('\\', "/");
    let path = path.trim_start_matches("./");
    let storage_prefix = storage_prefix.trim_end_matches('/');

    if let Some(inside) = path
        .strip_prefix(storage_prefix)
        .and_then(|rest| rest.strip_prefix('/'))
    {
        let package = PackageName::from_specifier(inside);
        if !package.as_str().is_empty() {
            return package;
        }
    }
    if !docs_prefix.is_empty() && path.starts_with(docs_prefix) {
        return PackageName::from(DOCS_PACKAGE);
    }
    PackageName::from(TOOLING_PACKAGE)
}

/// Whether `package` is one of the meta packages rather than a real package.
pub fn is_meta_package(package: &PackageName) -> bool {
    package == DOCS_PACKAGE || package == TOOLING_PACKAGE
}

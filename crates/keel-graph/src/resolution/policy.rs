//! Resolution policy: specifier classification and read-failure fallbacks.

use std::path::{Path, PathBuf};

use keel_core::config::ResolutionConfig;
use keel_core::{FxHashSet, PackageName};

use super::builtins::is_node_builtin;
use super::path::normalize;
use crate::walker::ReadFailure;

/// What an import specifier refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecifierKind {
    /// A file path, relative (`./x`, `../x`) or absolute (`/x`).
    File,
    /// A runtime-provided module.
    Builtin,
    /// A package, named by the first segment (or first two when scoped).
    Package(PackageName),
    /// Nothing that can be resolved (empty specifier).
    Ignored,
}

/// A retry applied when reading a candidate file fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fallback {
    /// The path is a directory: read `<path>/<file>`.
    DirectoryIndex { file: String },
    /// The path does not exist and has no source extension: try
    /// `<path>.<ext>` for each source extension in order.
    AppendExtension,
}

/// Fallback rules plus the builtin table, applied in declaration order.
#[derive(Debug, Clone)]
pub struct ResolutionPolicy {
    fallbacks: Vec<Fallback>,
    extensions: Vec<String>,
    extra_builtins: FxHashSet<String>,
}

impl Default for ResolutionPolicy {
    fn default() -> Self {
        Self::from_config(&ResolutionConfig::default())
    }
}

impl ResolutionPolicy {
    pub fn from_config(config: &ResolutionConfig) -> Self {
        Self {
            fallbacks: vec![
                Fallback::DirectoryIndex {
                    file: config.effective_index_file().to_string(),
                },
                Fallback::AppendExtension,
            ],
            extensions: config.effective_extensions(),
            extra_builtins: config.extra_builtins.iter().cloned().collect(),
        }
    }

    /// Replace the fallback list. An empty list makes every failed read fatal.
    pub fn with_fallbacks(mut self, fallbacks: Vec<Fallback>) -> Self {
        self.fallbacks = fallbacks;
        self
    }

    pub fn is_builtin(&self, name: &str) -> bool {
        is_node_builtin(name) || self.extra_builtins.contains(name)
    }

    pub fn classify(&self, specifier: &str) -> SpecifierKind {
        if specifier.is_empty() {
            SpecifierKind::Ignored
        } else if specifier.starts_with('.') || specifier.starts_with('/') {
            SpecifierKind::File
        } else if self.is_builtin(specifier) {
            SpecifierKind::Builtin
        } else {
            let package = PackageName::from_specifier(specifier);
            if self.is_builtin(package.as_str()) {
                SpecifierKind::Builtin
            } else {
                SpecifierKind::Package(package)
            }
        }
    }

    /// Target of a file specifier imported from `importer`.
    pub fn resolve_file(&self, importer: &Path, specifier: &str) -> PathBuf {
        let base = importer.parent().unwrap_or_else(|| Path::new(""));
        normalize(&base.join(specifier))
    }

    pub fn has_source_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|known| known == ext))
    }

    /// Paths to try after `path` failed to read, in order. Empty when the
    /// failure is fatal.
    pub fn candidates(&self, path: &Path, failure: &ReadFailure) -> Vec<PathBuf> {
        for fallback in &self.fallbacks {
            match (fallback, failure) {
                (Fallback::DirectoryIndex { file }, ReadFailure::IsDirectory) => {
                    return vec![path.join(file)];
                }
                (Fallback::AppendExtension, ReadFailure::NotFound)
                    if !self.has_source_extension(path) =>
                {
                    return self
                        .extensions
                        .iter()
                        .map(|ext| {
                            let mut with_ext = path.as_os_str().to_owned();
                            with_ext.push(".");
                            with_ext.push(ext);
                            PathBuf::from(with_ext)
                        })
                        .collect();
                }
                _ => {}
            }
        }
        Vec::new()
    }
}

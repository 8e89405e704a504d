//! Package identifiers.
//!
//! A package name is either unscoped (`left-pad`) or scoped
//! (`@scope/name`, exactly two path segments).

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Name of a local or external package.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageName(String);

impl PackageName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Derive the owning package from a bare module specifier or a
    /// storage-relative path.
    ///
    /// `lodash/fp` → `lodash`, `@scope/pkg/lib/x` → `@scope/pkg`.
    pub fn from_specifier(specifier: &str) -> Self {
        let mut segments = specifier.split('/');
        let first = segments.next().unwrap_or_default();
        if first.starts_with('@') {
            match segments.next() {
                Some(second) => Self(format!("{first}/{second}")),
                None => Self(first.to_string()),
            }
        } else {
            Self(first.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is a `@scope/name` package.
    pub fn is_scoped(&self) -> bool {
        self.0.starts_with('@')
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for PackageName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PackageName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PackageName {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for PackageName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl PartialEq<str> for PackageName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for PackageName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

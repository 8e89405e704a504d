//! `package.json` model.
//!
//! The manifest keeps every field in its original order so that rewriting the
//! `dependencies` block leaves the rest of the file untouched. Typed accessors
//! cover the fields the graph engine reads.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageManifest {
    fields: Map<String, Value>,
}

impl PackageManifest {
    pub fn from_json_str(source: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(source)
    }

    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// Pretty-printed JSON with a trailing newline.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        let mut out = serde_json::to_string_pretty(self)?;
        out.push('\n');
        Ok(out)
    }

    /// The declared package name. Empty names count as missing.
    pub fn name(&self) -> Option<&str> {
        self.str_field("name")
    }

    pub fn version(&self) -> Option<&str> {
        self.str_field("version")
    }

    pub fn main(&self) -> Option<&str> {
        self.str_field("main")
    }

    /// Executable targets: the single `bin` string, or every value of the
    /// `bin` map.
    pub fn bin_entries(&self) -> Vec<&str> {
        match self.fields.get("bin") {
            Some(Value::String(target)) if !target.is_empty() => vec![target.as_str()],
            Some(Value::Object(targets)) => targets
                .values()
                .filter_map(Value::as_str)
                .filter(|target| !target.is_empty())
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Browser replacement files. Disabled (`false`) and package-valued
    /// (`@scope/...`) replacements are not files of this package.
    pub fn browser_entries(&self) -> Vec<&str> {
        match self.fields.get("browser") {
            Some(Value::String(target)) if !target.is_empty() => vec![target.as_str()],
            Some(Value::Object(targets)) => targets
                .values()
                .filter_map(Value::as_str)
                .filter(|target| !target.is_empty() && !target.starts_with('@'))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// The `dependencies` block as name → version range. Non-string ranges
    /// are skipped.
    pub fn dependencies(&self) -> BTreeMap<String, String> {
        match self.fields.get("dependencies") {
            Some(Value::Object(deps)) => deps
                .iter()
                .filter_map(|(name, range)| range.as_str().map(|r| (name.clone(), r.to_string())))
                .collect(),
            _ => BTreeMap::new(),
        }
    }

    pub fn dependency_version(&self, name: &str) -> Option<&str> {
        match self.fields.get("dependencies") {
            Some(Value::Object(deps)) => deps.get(name).and_then(Value::as_str),
            _ => None,
        }
    }

    /// Replace the `dependencies` block. An existing block keeps its position.
    pub fn set_dependencies(&mut self, dependencies: &BTreeMap<String, String>) {
        let block: Map<String, Value> = dependencies
            .iter()
            .map(|(name, version)| (name.clone(), Value::String(version.clone())))
            .collect();
        self.fields
            .insert("dependencies".to_string(), Value::Object(block));
    }

    fn str_field(&self, field: &str) -> Option<&str> {
        self.fields
            .get(field)
            .and_then(Value::as_str)
            .filter(|value| !value.is_empty())
    }
}

//! Tests for the keel error handling system.

use std::path::PathBuf;

use keel_core::errors::error_code::{self, KeelErrorCode};
use keel_core::errors::*;

#[test]
fn test_all_errors_have_error_code() {
    let graph = GraphError::InvalidPackage {
        package: "foo".into(),
    };
    assert_eq!(graph.error_code(), error_code::INVALID_PACKAGE);

    let parse = GraphError::SourceParse {
        path: PathBuf::from("/tmp/foo/index.ts"),
        message: "incompatible language version".into(),
    };
    assert_eq!(parse.error_code(), error_code::SOURCE_PARSE_ERROR);

    let registry = RegistryError::UnknownPackage {
        name: "foo".into(),
        path: PathBuf::from("/tmp/foo/package.json"),
    };
    assert_eq!(registry.error_code(), error_code::UNKNOWN_PACKAGE);

    let config = ConfigError::FileNotFound {
        path: "/tmp".into(),
    };
    assert_eq!(config.error_code(), error_code::CONFIG_ERROR);

    let change = ChangeSetError::Git {
        message: "boom".into(),
    };
    assert_eq!(change.error_code(), error_code::CHANGE_SET_ERROR);
}

#[test]
fn test_registry_error_surfaces_through_graph_error() {
    let registry = RegistryError::UnknownPackage {
        name: "missing".into(),
        path: PathBuf::from("packages/node_modules/missing/package.json"),
    };
    let graph: GraphError = registry.into();
    assert!(graph.is_unknown_package());
    assert_eq!(graph.error_code(), error_code::UNKNOWN_PACKAGE);

    let change: ChangeSetError = graph.into();
    assert_eq!(change.error_code(), error_code::UNKNOWN_PACKAGE);
}

#[test]
fn test_report_string_format() {
    let err = GraphError::UnresolvedVersion {
        dependency: "external-dep-9".into(),
        package: "not-scoped".into(),
    };
    let report = err.report_string();
    assert!(report.starts_with("[UNRESOLVED_VERSION] "));
    assert!(report.contains("external-dep-9"));
    assert!(report.contains("not-scoped"));
}

#[test]
fn test_unresolvable_entry_point_names_both_paths() {
    let err = GraphError::UnresolvableEntryPoint {
        path: PathBuf::from("/repo/pkg/lib"),
        attempted: PathBuf::from("/repo/pkg/lib.js"),
        message: "not found".into(),
    };
    let msg = err.to_string();
    assert!(msg.contains("/repo/pkg/lib"));
    assert!(msg.contains("/repo/pkg/lib.js"));
}

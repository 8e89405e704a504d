//! End-to-end dependency graph queries over a three-package monorepo.

mod common;

use common::{names, Fixture};
use keel_core::errors::{GraphError, KeelErrorCode};
use keel_core::{KeelConfig, PackageName};
use keel_graph::{DependencyGraph, DependencyQuery, DependentQuery};
use serde_json::json;

fn pkg(name: &str) -> PackageName {
    PackageName::from(name)
}

fn on_disk(fixture: &Fixture) -> (tempfile::TempDir, DependencyGraph) {
    let tmp = tempfile::tempdir().unwrap();
    fixture.write_to(tmp.path());
    let graph = DependencyGraph::open(tmp.path(), &KeelConfig::default());
    (tmp, graph)
}

#[test]
fn test_lists_all_packages_sorted() {
    let (_tmp, graph) = on_disk(&Fixture::example());
    let all = graph.list_all_packages().unwrap();
    assert_eq!(names(&all), vec!["@example/first", "@example/second", "not-scoped"]);
}

#[test]
fn test_direct_dependencies_on_disk() {
    let (_tmp, graph) = on_disk(&Fixture::example());
    assert_eq!(
        names(&graph.list_direct_dependencies(&pkg("not-scoped")).unwrap()),
        vec!["@example/second", "external-dep-3"]
    );
    assert_eq!(
        names(&graph.list_direct_dependencies(&pkg("@example/first")).unwrap()),
        vec!["external-dep-1"]
    );
    assert_eq!(
        names(&graph.list_direct_dependencies(&pkg("@example/second")).unwrap()),
        vec!["@example/first", "external-dep-2"]
    );
}

#[test]
fn test_transitive_dependencies_on_disk() {
    let (_tmp, graph) = on_disk(&Fixture::example());
    assert_eq!(
        names(&graph.list_transitive_dependencies(&pkg("not-scoped")).unwrap()),
        vec![
            "@example/first",
            "@example/second",
            "external-dep-1",
            "external-dep-2",
            "external-dep-3"
        ]
    );
}

#[test]
fn test_dependents_on_disk() {
    let (_tmp, graph) = on_disk(&Fixture::example());
    assert_eq!(
        names(&graph.list_direct_dependents(&pkg("@example/first")).unwrap()),
        vec!["@example/second"]
    );
    assert_eq!(
        names(&graph.list_transitive_dependents(&pkg("@example/first")).unwrap()),
        vec!["@example/second", "not-scoped"]
    );
    assert!(graph
        .list_transitive_dependents(&pkg("not-scoped"))
        .unwrap()
        .is_empty());
}

#[test]
fn test_combined_queries() {
    let (graph, _, _) = Fixture::example().memory_graph();
    let not_scoped = pkg("not-scoped");

    let local_direct = graph
        .list_dependencies(
            &not_scoped,
            DependencyQuery {
                include_transitive: false,
                local_only: true,
            },
        )
        .unwrap();
    assert_eq!(names(&local_direct), vec!["@example/second"]);

    let local_transitive = graph
        .list_dependencies(
            &not_scoped,
            DependencyQuery {
                include_transitive: true,
                local_only: true,
            },
        )
        .unwrap();
    assert_eq!(names(&local_transitive), vec!["@example/first", "@example/second"]);

    let everything = graph.list_dependencies(&not_scoped, DependencyQuery::default()).unwrap();
    assert_eq!(everything.len(), 5);

    let dependents = graph
        .list_dependents(&pkg("@example/first"), DependentQuery::default())
        .unwrap();
    assert_eq!(names(&dependents), vec!["@example/second"]);
}

#[test]
fn test_results_are_stable_across_runs() {
    let fixture = Fixture::example();
    let (first, _, _) = fixture.memory_graph();
    let (second, _, _) = fixture.memory_graph();
    for package in ["not-scoped", "@example/first", "@example/second"] {
        let package = pkg(package);
        let a = first.list_transitive_dependencies(&package).unwrap();
        assert_eq!(a, first.list_transitive_dependencies(&package).unwrap());
        assert_eq!(a, second.list_transitive_dependencies(&package).unwrap());
    }
}

#[test]
fn test_unknown_package_fails_every_query() {
    let (graph, _, _) = Fixture::example().memory_graph();
    let ghost = pkg("ghost");
    let errors = [
        graph.list_direct_dependencies(&ghost).unwrap_err(),
        graph.list_transitive_dependencies(&ghost).unwrap_err(),
        graph.list_direct_dependents(&ghost).unwrap_err(),
        graph.list_transitive_dependents(&ghost).unwrap_err(),
    ];
    for err in errors {
        assert!(err.is_unknown_package(), "unexpected error: {err}");
        assert_eq!(err.error_code(), "UNKNOWN_PACKAGE");
    }
}

#[test]
fn test_package_without_entry_points_has_no_dependencies() {
    let fixture = Fixture::new().package("empty", json!({ "name": "empty", "version": "1.0.0" }), &[]);
    let (graph, _, _) = fixture.memory_graph();
    assert!(graph.list_direct_dependencies(&pkg("empty")).unwrap().is_empty());
}

#[test]
fn test_unnamed_manifest_is_invalid_package() {
    let fixture = Fixture::new().package("nameless", json!({ "main": "index.js" }), &[("index.js", "")]);
    let (graph, _, _) = fixture.memory_graph();
    let err = graph.list_direct_dependencies(&pkg("nameless")).unwrap_err();
    assert!(matches!(err, GraphError::InvalidPackage { .. }));
    assert_eq!(err.error_code(), "INVALID_PACKAGE");
}

#[test]
fn test_missing_entry_file_is_unresolvable() {
    let fixture = Fixture::new().package(
        "broken",
        json!({ "name": "broken", "main": "index.js" }),
        &[],
    );
    let (graph, _, _) = fixture.memory_graph();
    let err = graph.list_direct_dependencies(&pkg("broken")).unwrap_err();
    assert!(matches!(err, GraphError::UnresolvableEntryPoint { .. }));
}

#[test]
fn test_broken_package_fails_dependents_scan() {
    let fixture = Fixture::example().package(
        "broken",
        json!({ "name": "broken", "main": "index.js" }),
        &[("index.js", "require('./missing.js');")],
    );
    let (graph, _, _) = fixture.memory_graph();
    let err = graph.list_direct_dependents(&pkg("@example/first")).unwrap_err();
    assert!(matches!(err, GraphError::UnresolvableEntryPoint { .. }));
}

#[test]
fn test_own_name_is_not_filtered() {
    let fixture = Fixture::new().package(
        "selfish",
        json!({ "name": "selfish", "main": "index.js" }),
        &[("index.js", "require('selfish/lib/other');")],
    );
    let (graph, _, _) = fixture.memory_graph();
    assert_eq!(
        names(&graph.list_direct_dependencies(&pkg("selfish")).unwrap()),
        vec!["selfish"]
    );
    assert_eq!(
        names(&graph.list_transitive_dependencies(&pkg("selfish")).unwrap()),
        vec!["selfish"]
    );
}

#[test]
fn test_package_cycles_terminate() {
    let fixture = Fixture::new()
        .package("a", json!({ "name": "a", "main": "index.js" }), &[("index.js", "require('b'); require('ext-a');")])
        .package("b", json!({ "name": "b", "main": "index.js" }), &[("index.js", "require('c');")])
        .package("c", json!({ "name": "c", "main": "index.js" }), &[("index.js", "require('a'); require('ext-c');")]);
    let (graph, _, _) = fixture.memory_graph();

    assert_eq!(
        names(&graph.list_transitive_dependencies(&pkg("a")).unwrap()),
        vec!["a", "b", "c", "ext-a", "ext-c"]
    );
    assert_eq!(
        names(&graph.list_transitive_dependents(&pkg("a")).unwrap()),
        vec!["a", "b", "c"]
    );
}

#[test]
fn test_memoization_reads_each_file_once() {
    let (graph, _, fs) = Fixture::example().memory_graph();
    let not_scoped = pkg("not-scoped");

    let first = graph.list_direct_dependencies(&not_scoped).unwrap();
    let reads_after_first = fs.total_reads();
    let second = graph.list_direct_dependencies(&not_scoped).unwrap();

    assert_eq!(first, second);
    assert_eq!(fs.total_reads(), reads_after_first);
    assert_eq!(fs.max_reads(), 1);
}

#[test]
fn test_shared_files_read_once_across_entry_points() {
    let fixture = Fixture::new().package(
        "multi",
        json!({
            "name": "multi",
            "main": "index.js",
            "bin": { "one": "bin/one.js", "two": "bin/two.js" }
        }),
        &[
            ("index.js", "require('./shared');"),
            ("bin/one.js", "require('../shared');"),
            ("bin/two.js", "require('../shared.js'); require('yargs');"),
            ("shared.js", "require('lodash');"),
        ],
    );
    let (graph, _, fs) = fixture.memory_graph();
    let multi = pkg("multi");
    assert_eq!(
        names(&graph.list_direct_dependencies(&multi).unwrap()),
        vec!["lodash", "yargs"]
    );
    graph.list_transitive_dependents(&multi).unwrap();
    assert_eq!(fs.reads_of(format!("{}/multi/shared.js", common::STORAGE_ROOT)), 1);
    assert_eq!(fs.max_reads(), 1);
}

#[test]
fn test_directory_cycles_terminate_with_full_sets() {
    let fixture = Fixture::new().package(
        "loop",
        json!({ "name": "loop", "main": "a.js", "bin": { "b": "b.js" } }),
        &[
            ("a.js", "require('./b'); require('dep-a');"),
            ("b.js", "require('./a'); require('dep-b');"),
        ],
    );
    let (graph, _, _) = fixture.memory_graph();
    assert_eq!(
        names(&graph.list_direct_dependencies(&pkg("loop")).unwrap()),
        vec!["dep-a", "dep-b"]
    );
}

use clap::{Args, Subcommand};
use keel_core::PackageName;
use keel_graph::manifest_gen::ManifestGenerator;
use keel_graph::{DependencyQuery, DependentQuery};

use super::{fail, print_packages, Workspace};

#[derive(Args)]
pub struct DepsArgs {
    #[command(subcommand)]
    pub command: DepsCommand,
}

#[derive(Subcommand)]
pub enum DepsCommand {
    /// List the dependencies (or dependents) of a package
    List(DepsListArgs),
    /// Rewrite every package's dependencies from its imports
    Generate,
}

#[derive(Args)]
pub struct DepsListArgs {
    /// Package to inspect
    pub package: String,
    /// List packages that depend on this one instead
    #[arg(long, requires = "local_only")]
    pub dependents: bool,
    /// Follow local packages to their own dependencies (or dependents)
    #[arg(long)]
    pub include_transitive: bool,
    /// Only list packages that live in this repository
    #[arg(long)]
    pub local_only: bool,
}

pub fn cmd_deps_list(workspace: &Workspace, args: DepsListArgs) {
    let graph = workspace.graph();
    let package = PackageName::new(args.package);

    let result = if args.dependents {
        graph.list_dependents(
            &package,
            DependentQuery {
                include_transitive: args.include_transitive,
            },
        )
    } else {
        graph.list_dependencies(
            &package,
            DependencyQuery {
                include_transitive: args.include_transitive,
                local_only: args.local_only,
            },
        )
    };

    match result {
        Ok(packages) => print_packages(&packages),
        Err(e) => fail(&e),
    }
}

pub fn cmd_deps_generate(workspace: &Workspace) {
    let graph = workspace.graph();
    match ManifestGenerator::new(&graph).generate_all() {
        Ok(generated) => {
            for manifest in generated {
                eprintln!(
                    "{}: {} dependencies",
                    manifest.package,
                    manifest.dependencies.len()
                );
            }
        }
        Err(e) => fail(&e),
    }
}

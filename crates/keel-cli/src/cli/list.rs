use clap::{Args, Subcommand};
use keel_graph::impact::{ImpactAnalyzer, ImpactSettings, PackageQuery, TestableQuery};

use super::{fail, print_packages, Workspace};

#[derive(Args)]
pub struct ListArgs {
    #[command(subcommand)]
    pub command: Option<ListCommand>,
    /// Only list packages that changed since the base revision
    #[arg(long)]
    pub changed: bool,
    /// Count transitive dependents of changed packages as changed
    #[arg(long, requires = "changed")]
    pub include_transitive: bool,
}

#[derive(Subcommand)]
pub enum ListCommand {
    /// List packages with tests
    Testable(TestableArgs),
}

#[derive(Args)]
pub struct TestableArgs {
    /// Only list testable packages (or their dependents) that changed
    #[arg(long)]
    pub changed: bool,
    /// Do not test everything just because tooling changed
    #[arg(long, requires = "changed")]
    pub ignore_tooling: bool,
}

pub fn cmd_list(workspace: &Workspace, args: ListArgs) {
    let graph = workspace.graph();
    let impact = ImpactAnalyzer::new(
        &graph,
        ImpactSettings::from_config(&workspace.root, &workspace.config),
    );

    let result = match args.command {
        Some(ListCommand::Testable(testable)) => impact.select_testable(TestableQuery {
            changed: testable.changed,
            ignore_tooling: testable.ignore_tooling,
        }),
        None => impact.list_packages(PackageQuery {
            changed: args.changed,
            include_transitive: args.include_transitive,
        }),
    };

    match result {
        Ok(packages) => print_packages(&packages),
        Err(e) => fail(&e),
    }
}

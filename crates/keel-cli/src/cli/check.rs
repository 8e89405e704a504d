use clap::{Args, Subcommand};
use keel_graph::impact::{ImpactAnalyzer, ImpactSettings, TestableQuery};

use super::{fail, Workspace};

#[derive(Args)]
pub struct CheckArgs {
    #[command(subcommand)]
    pub command: CheckCommand,
}

#[derive(Subcommand)]
pub enum CheckCommand {
    /// Print "run" if any package needs testing, "skip" otherwise
    Testable(CheckTestableArgs),
}

#[derive(Args)]
pub struct CheckTestableArgs {
    /// Only consider testable packages (or their dependents) that changed
    #[arg(long)]
    pub changed: bool,
    /// Do not test everything just because tooling changed
    #[arg(long, requires = "changed")]
    pub ignore_tooling: bool,
    /// Always answer "skip"
    #[arg(long, hide = true)]
    pub ci_skip: bool,
}

pub fn cmd_check_testable(workspace: &Workspace, args: CheckTestableArgs) {
    if args.ci_skip {
        println!("skip");
        return;
    }

    let graph = workspace.graph();
    let impact = ImpactAnalyzer::new(
        &graph,
        ImpactSettings::from_config(&workspace.root, &workspace.config),
    );
    let query = TestableQuery {
        changed: args.changed,
        ignore_tooling: args.ignore_tooling,
    };

    match impact.tests_required(query) {
        Ok(true) => println!("run"),
        Ok(false) => println!("skip"),
        Err(e) => fail(&e),
    }
}

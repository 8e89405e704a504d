pub mod check;
pub mod deps;
pub mod list;

use std::fmt::Display;
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use keel_core::config::CliOverrides;
use keel_core::errors::KeelErrorCode;
use keel_core::{KeelConfig, PackageName};
use keel_graph::DependencyGraph;
use tracing::debug;

#[derive(Parser)]
#[command(name = "keel", version, about = "Static dependency graph for JavaScript monorepos")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args)]
pub struct GlobalArgs {
    /// Repository root
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,
    /// Package storage directory, relative to the root
    #[arg(long, global = true)]
    pub storage_root: Option<String>,
    /// Revision to diff HEAD against for --changed
    #[arg(long, global = true)]
    pub base_ref: Option<String>,
    /// Worker threads for package analysis
    #[arg(long, global = true)]
    pub threads: Option<usize>,
    /// Log at debug level unless KEEL_LOG says otherwise
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Answer yes/no questions for CI scripts
    Check(check::CheckArgs),
    /// Inspect or generate package dependencies
    Deps(deps::DepsArgs),
    /// List packages
    List(list::ListArgs),
}

pub use check::CheckCommand;
pub use deps::DepsCommand;

/// Repository root plus its resolved configuration.
pub struct Workspace {
    pub root: PathBuf,
    pub config: KeelConfig,
}

impl Workspace {
    pub fn graph(&self) -> DependencyGraph {
        DependencyGraph::open(&self.root, &self.config)
    }
}

/// Load configuration and size the worker pool, exiting on failure.
pub fn open_workspace(global: &GlobalArgs) -> Workspace {
    let overrides = CliOverrides {
        storage_root: global.storage_root.clone(),
        base_ref: global.base_ref.clone(),
        threads: global.threads,
    };
    let config = match KeelConfig::load(&global.root, Some(&overrides)) {
        Ok(config) => config,
        Err(e) => fail(&e),
    };

    if let Some(threads) = config.analysis.threads {
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
        {
            debug!(error = %e, "rayon pool already initialized");
        }
    }

    Workspace {
        root: global.root.clone(),
        config,
    }
}

/// Print `error: [CODE] message` and exit with status 1.
pub fn fail<E: KeelErrorCode + Display>(err: &E) -> ! {
    eprintln!("error: {}", err.report_string());
    process::exit(1);
}

/// One package per line on stdout.
pub fn print_packages(packages: &[PackageName]) {
    for package in packages {
        println!("{package}");
    }
}

mod cli;

use clap::Parser;

use cli::{CheckCommand, Cli, Command, DepsCommand};

fn main() {
    let cli = Cli::parse();
    if cli.global.verbose {
        keel_core::tracing::init_tracing_with_default("keel=debug");
    } else {
        keel_core::tracing::init_tracing();
    }

    let workspace = cli::open_workspace(&cli.global);
    match cli.command {
        Command::Check(check) => match check.command {
            CheckCommand::Testable(args) => cli::check::cmd_check_testable(&workspace, args),
        },
        Command::Deps(deps) => match deps.command {
            DepsCommand::List(args) => cli::deps::cmd_deps_list(&workspace, args),
            DepsCommand::Generate => cli::deps::cmd_deps_generate(&workspace),
        },
        Command::List(args) => cli::list::cmd_list(&workspace, args),
    }
}

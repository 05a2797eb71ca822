//! Tally CLI: the `tally` command.

mod cli;
mod commands;
mod suites;
mod support;

use clap::Parser;
use cli::{Cli, Commands};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    support::init_logging(cli.verbose);
    let config = support::load_config_or_exit(&cli.report);

    match cli.command {
        Commands::Selftest => commands::selftest::run(&config),
        Commands::Demo { suite } => commands::demo::run(suite, &config),
    }
}

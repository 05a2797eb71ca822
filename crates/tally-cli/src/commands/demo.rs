use crate::cli::DemoSuite;
use crate::suites;
use crate::support::run_suites_or_exit;
use std::process::ExitCode;
use tally_kernel::RunnerConfig;

pub fn run(which: DemoSuite, config: &RunnerConfig) -> ExitCode {
    let suites = suites::demo(which);
    tracing::debug!(?which, suites = suites.len(), "running demonstration suites");
    run_suites_or_exit(&suites, config)
}

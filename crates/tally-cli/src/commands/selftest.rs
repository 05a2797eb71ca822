use crate::suites;
use crate::support::run_suites_or_exit;
use std::process::ExitCode;
use tally_kernel::RunnerConfig;

pub fn run(config: &RunnerConfig) -> ExitCode {
    let suites = suites::selftest();
    tracing::debug!(suites = suites.len(), "running self-test suites");
    run_suites_or_exit(&suites, config)
}

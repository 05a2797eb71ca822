use crate::cli::ReportArgs;
use crate::suites::RunSuite;
use serde_json::json;
use std::fmt::Display;
use std::io::{self, Write};
use std::process::ExitCode;
use tally_kernel::{ReportFormat, RunnerConfig, Summary, TallyError, TestRunner};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `TALLY_LOG=debug`.
pub const LOG_ENV: &str = "TALLY_LOG";

/// Log to stderr so that stdout carries nothing but the report.
pub fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

pub fn exit_with(e: impl Display) -> ! {
    eprintln!("error: {e}");
    std::process::exit(1);
}

/// The config file (if any), overridden by command-line flags.
pub fn load_config_or_exit(args: &ReportArgs) -> RunnerConfig {
    let mut config = match &args.config {
        Some(path) => RunnerConfig::load(path).unwrap_or_else(|e| exit_with(e)),
        None => RunnerConfig::default(),
    };
    if let Some(width) = args.indent {
        config = config.with_indent_width(width);
    }
    if args.json {
        config.format = ReportFormat::Json;
    }
    tracing::debug!(?config, "runner config");
    config
}

fn run_into(
    out: &mut dyn Write,
    suites: &[Box<dyn RunSuite>],
    config: &RunnerConfig,
) -> Result<Summary, TallyError> {
    let mut runner = TestRunner::with_config(out, config);
    let mut summary = Summary::new();
    for suite in suites {
        let results = suite.run_on(&mut runner)?;
        summary.record(suite.name(), results);
    }
    Ok(summary)
}

/// Run `suites` in order, print the report, and map the outcome to the
/// process exit code: failure iff any test failed.
pub fn run_suites_or_exit(suites: &[Box<dyn RunSuite>], config: &RunnerConfig) -> ExitCode {
    let summary = match config.format {
        ReportFormat::Text => {
            run_into(&mut io::stdout().lock(), suites, config).unwrap_or_else(|e| exit_with(e))
        }
        ReportFormat::Json => {
            let mut report = Vec::new();
            let summary = run_into(&mut report, suites, config).unwrap_or_else(|e| exit_with(e));
            let totals = summary.totals();
            let payload = json!({
                "runs": summary.runs(),
                "passed": totals.passed,
                "failed": totals.failed,
                "exitStatus": summary.exit_status(),
                "report": String::from_utf8_lossy(&report),
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&payload).expect("json serialization")
            );
            summary
        }
    };

    let totals = summary.totals();
    tracing::info!(
        runs = summary.runs().len(),
        passed = totals.passed,
        failed = totals.failed,
        "all runs finished"
    );
    summary.exit_code()
}

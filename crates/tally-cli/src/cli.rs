use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "tally",
    about = "Tally: run assertion suites and report only what failed",
    version
)]
pub struct Cli {
    /// Log at debug level (TALLY_LOG takes precedence)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub report: ReportArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Spaces per report indentation level
    #[arg(long, global = true)]
    pub indent: Option<usize>,

    /// Path to a TOML runner config
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run tally's own suites against the kernel
    Selftest,

    /// Run the demonstration suites (some tests fail on purpose)
    Demo {
        /// Which demonstration to run
        #[arg(value_enum, default_value = "all")]
        suite: DemoSuite,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum DemoSuite {
    /// Plain assertions and a fail-fast loop
    Arithmetic,
    /// Tests sharing a fixture
    Numbers,
    /// Sums over slices
    Sum,
    /// Every demonstration, in order
    All,
}

//! Sequential test execution, reporting, and aggregation.
//!
//! The runner executes tests strictly in order, one at a time, and writes a
//! report of the form
//!
//! ```text
//! Running <name> tests...
//!   pass:  <test-name>
//!   fail:  <test-name>
//!     false:  <expr>
//!       (for <witness> = <value>, ...)
//! Finished <name> tests: <P> passed, and <F> failed.
//! ```
//!
//! where each level of indentation is the configured indent unit. Failed
//! assertions are the only non-fatal outcome; they are counted, never
//! raised.

use crate::config::RunnerConfig;
use crate::error::TallyError;
use crate::suite::{Suite, Test, Verdict, verdict_passes};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::ops::AddAssign;
use std::process::ExitCode;

/// Pass/fail counts of one or more runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResults {
    pub passed: usize,
    pub failed: usize,
}

impl TestResults {
    pub fn total(&self) -> usize {
        self.passed + self.failed
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    fn record(&mut self, passed: bool) {
        if passed {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
    }
}

impl AddAssign for TestResults {
    fn add_assign(&mut self, other: Self) {
        self.passed += other.passed;
        self.failed += other.failed;
    }
}

/// Runs tests and writes the report to `W`.
pub struct TestRunner<W> {
    out: W,
    indent: String,
}

impl<W: Write> TestRunner<W> {
    /// A runner with the default configuration.
    pub fn new(out: W) -> Self {
        Self::with_config(out, &RunnerConfig::default())
    }

    pub fn with_config(out: W, config: &RunnerConfig) -> Self {
        Self {
            out,
            indent: config.indent.clone(),
        }
    }

    /// The indent unit of one report level.
    pub fn indent(&self) -> &str {
        &self.indent
    }

    /// Run `tests` in order under the display name `name`.
    pub fn run<F>(&mut self, name: &str, tests: &[Test<F>]) -> Result<TestResults, TallyError> {
        let _span = tracing::info_span!("run", suite = name).entered();
        tracing::info!(tests = tests.len(), "running tests");

        writeln!(self.out, "Running {name} tests...")?;
        let mut results = TestResults::default();
        for test in tests {
            let verdict = test.invoke();
            let passed = verdict_passes(&verdict);
            tracing::debug!(test = test.name(), passed, "test finished");
            self.report(test, &verdict, passed)?;
            results.record(passed);
        }
        writeln!(
            self.out,
            "Finished {name} tests: {} passed, and {} failed.",
            results.passed, results.failed
        )?;
        self.out.flush()?;

        tracing::info!(passed = results.passed, failed = results.failed, "finished tests");
        Ok(results)
    }

    /// Run every test of `suite` under the suite's name.
    pub fn run_suite<F>(&mut self, suite: &Suite<F>) -> Result<TestResults, TallyError> {
        self.run(suite.name(), suite.tests())
    }

    fn report<F>(&mut self, test: &Test<F>, verdict: &Verdict, passed: bool) -> io::Result<()> {
        let indent = &self.indent;
        if passed {
            return writeln!(self.out, "{indent}pass:  {}", test.name());
        }
        writeln!(self.out, "{indent}fail:  {}", test.name())?;
        if let Some(assertions) = verdict {
            assertions.print(false, &mut self.out, &indent.repeat(2), &indent.repeat(3))?;
        }
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// The results of one named run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub name: String,
    #[serde(flatten)]
    pub results: TestResults,
}

/// Results of several named runs, and the exit status they imply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    runs: Vec<RunSummary>,
}

impl Summary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, name: impl Into<String>, results: TestResults) {
        self.runs.push(RunSummary {
            name: name.into(),
            results,
        });
    }

    pub fn runs(&self) -> &[RunSummary] {
        &self.runs
    }

    /// Sum over every run.
    pub fn totals(&self) -> TestResults {
        let mut totals = TestResults::default();
        for run in &self.runs {
            totals += run.results;
        }
        totals
    }

    /// Whether any run had a failing test.
    pub fn failed(&self) -> bool {
        self.runs.iter().any(|run| run.results.failed > 0)
    }

    /// `1` if any run failed, else `0`.
    pub fn exit_status(&self) -> u8 {
        exit_status(self.runs.iter().map(|run| run.results.failed))
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_status())
    }
}

/// Map failure counts to a process exit status: `1` if any is non-zero,
/// else `0`.
pub fn exit_status<I: IntoIterator<Item = usize>>(failure_counts: I) -> u8 {
    u8::from(failure_counts.into_iter().any(|failed| failed > 0))
}

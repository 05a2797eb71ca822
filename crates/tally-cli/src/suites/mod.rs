//! Suites the `tally` binary knows how to run.
//!
//! Suites differ in their fixture type, so they are handed around as
//! `Box<dyn RunSuite>`.

mod demo;
mod selftest;

use std::io::Write;
use tally_kernel::{Suite, TallyError, TestResults, TestRunner};

pub use demo::demo;
pub use selftest::selftest;

/// A suite of any fixture type.
pub trait RunSuite {
    fn name(&self) -> &str;

    fn run_on(&self, runner: &mut TestRunner<&mut dyn Write>) -> Result<TestResults, TallyError>;
}

impl<F> RunSuite for Suite<F> {
    fn name(&self) -> &str {
        Suite::name(self)
    }

    fn run_on(&self, runner: &mut TestRunner<&mut dyn Write>) -> Result<TestResults, TallyError> {
        runner.run_suite(self)
    }
}

pub type Suites = Vec<Box<dyn RunSuite>>;

fn boxed<F: 'static>(suite: Suite<F>) -> Box<dyn RunSuite> {
    Box::new(suite)
}

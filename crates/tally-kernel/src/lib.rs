//! # Tally Kernel
//!
//! Assertion aggregation for small test programs: a test function evaluates
//! boolean expressions, records each one with its source text and the
//! witnesses that identify the iteration it came from, and returns the lot.
//! The runner decides pass or fail per test, prints only what went wrong,
//! and folds everything into a process exit status.
//!
//! Failed assertions are data, not errors. Only broken invariants (an
//! out-of-range index, an empty name) are fatal.
//!
//! ## Architecture
//!
//! ```text
//! Witness               ← (name, value), e.g. x = 17
//!     │
//! WitnessList           ← Ordered witnesses: (for x = 17, y = 3)
//!     │
//! Assertion             ← Expression text + result + witnesses
//!     │
//! AssertionList         ← A test function's verdict
//!     │
//! Test / Suite          ← Named functions with optional fixtures
//!     │
//! TestRunner            ← Sequential execution, report, counts
//!     │
//! Summary               ← Exit status: 1 iff any test failed
//! ```
//!
//! Both lists are [`Slots`], a growable container that tracks a logical
//! capacity next to its elements.

#[macro_use]
mod macros;

pub mod assertion;
pub mod config;
pub mod error;
pub mod runner;
pub mod slots;
pub mod suite;
pub mod witness;

pub use assertion::{ASSERTION_LIST_INITIAL_CAPACITY, Assertion, AssertionList};
pub use config::{DEFAULT_INDENT, ReportFormat, RunnerConfig};
pub use error::TallyError;
pub use runner::{RunSummary, Summary, TestResults, TestRunner, exit_status};
pub use slots::{Element, Slots};
pub use suite::{Setup, Suite, Teardown, Test, TestFn, Verdict, verdict_passes};
pub use witness::{WITNESS_LIST_INITIAL_CAPACITY, Witness, WitnessList};

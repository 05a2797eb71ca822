//! Tests, fixtures, and suites.
//!
//! A [`Test`] is a named function producing a [`Verdict`], optionally
//! bracketed by fixture functions. Per invocation the test moves through
//!
//! ```text
//! Init → FixtureSetup → Running → FixtureTeardown → Reported
//! ```
//!
//! `setup` creates a fresh fixture for every invocation, `run` borrows it,
//! and `teardown` consumes it. Teardown always runs once setup has run,
//! including while unwinding from a panicking test function.
//!
//! A [`Suite`] is an explicit, ordered, named list of tests; there is no
//! global registry.

use crate::assertion::AssertionList;
use crate::error::TallyError;
use std::fmt;

/// What a test function produced.
///
/// `None` is the "no assertions" verdict: the test made no checkable claims
/// but did not crash, and passes.
pub type Verdict = Option<AssertionList>;

/// A test function. The fixture is absent when the test has no setup.
pub type TestFn<F> = fn(Option<&mut F>) -> Verdict;

/// Creates the fixture for one invocation.
pub type Setup<F> = fn() -> F;

/// Releases the fixture of one invocation.
pub type Teardown<F> = fn(F);

/// Whether a verdict passes: no assertions, or all of them true.
pub fn verdict_passes(verdict: &Verdict) -> bool {
    verdict.as_ref().is_none_or(AssertionList::all_true)
}

/// A named test function with optional fixture functions.
pub struct Test<F = ()> {
    name: String,
    run: TestFn<F>,
    setup: Option<Setup<F>>,
    teardown: Option<Teardown<F>>,
}

impl<F> Test<F> {
    /// Create a test without fixtures.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty; use [`Test::try_new`] to handle that.
    pub fn new(name: impl Into<String>, run: TestFn<F>) -> Self {
        Self::try_new(name, run).unwrap_or_else(|e| panic!("{e}"))
    }

    pub fn try_new(name: impl Into<String>, run: TestFn<F>) -> Result<Self, TallyError> {
        let name = name.into();
        if name.is_empty() {
            return Err(TallyError::EmptyTestName);
        }
        Ok(Self {
            name,
            run,
            setup: None,
            teardown: None,
        })
    }

    /// Attach fixture functions.
    pub fn with_fixture(mut self, setup: Setup<F>, teardown: Teardown<F>) -> Self {
        self.setup = Some(setup);
        self.teardown = Some(teardown);
        self
    }

    /// Attach only a setup function; the fixture is dropped after the run.
    pub fn with_setup(mut self, setup: Setup<F>) -> Self {
        self.setup = Some(setup);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn setup(&self) -> Option<Setup<F>> {
        self.setup
    }

    pub fn teardown(&self) -> Option<Teardown<F>> {
        self.teardown
    }

    /// Set up the fixture, run the test function, and tear the fixture down.
    pub fn invoke(&self) -> Verdict {
        let mut guard = FixtureGuard {
            fixture: self.setup.map(|setup| setup()),
            teardown: self.teardown,
        };
        (self.run)(guard.fixture.as_mut())
    }
}

/// Owns the fixture while the test function runs, so that teardown happens
/// on return and on unwind alike.
struct FixtureGuard<F> {
    fixture: Option<F>,
    teardown: Option<Teardown<F>>,
}

impl<F> Drop for FixtureGuard<F> {
    fn drop(&mut self) {
        if let (Some(fixture), Some(teardown)) = (self.fixture.take(), self.teardown) {
            teardown(fixture);
        }
    }
}

fn same_setup<F>(a: Option<Setup<F>>, b: Option<Setup<F>>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => std::ptr::fn_addr_eq(a, b),
        (a, b) => a.is_none() && b.is_none(),
    }
}

fn same_teardown<F>(a: Option<Teardown<F>>, b: Option<Teardown<F>>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => std::ptr::fn_addr_eq(a, b),
        (a, b) => a.is_none() && b.is_none(),
    }
}

/// Names compare by value, functions by identity.
impl<F> PartialEq for Test<F> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && std::ptr::fn_addr_eq(self.run, other.run)
            && same_setup(self.setup, other.setup)
            && same_teardown(self.teardown, other.teardown)
    }
}

impl<F> Clone for Test<F> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            run: self.run,
            setup: self.setup,
            teardown: self.teardown,
        }
    }
}

impl<F> fmt::Debug for Test<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Test")
            .field("name", &self.name)
            .field("setup", &self.setup.is_some())
            .field("teardown", &self.teardown.is_some())
            .finish()
    }
}

/// A named, ordered collection of tests sharing a fixture type.
pub struct Suite<F = ()> {
    name: String,
    tests: Vec<Test<F>>,
}

impl<F> Suite<F> {
    pub fn new(name: impl Into<String>, tests: Vec<Test<F>>) -> Self {
        Self {
            name: name.into(),
            tests,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tests(&self) -> &[Test<F>] {
        &self.tests
    }

    /// Append a test; the suite keeps insertion order.
    pub fn push(&mut self, test: Test<F>) {
        self.tests.push(test);
    }
}

impl<F> fmt::Debug for Suite<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Suite")
            .field("name", &self.name)
            .field("tests", &self.tests)
            .finish()
    }
}

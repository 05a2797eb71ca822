//! Assertions and assertion lists.
//!
//! An [`Assertion`] is a boolean expression's source text, its truth value,
//! and the [`WitnessList`] identifying where it was made. Test functions
//! return an [`AssertionList`]; the runner judges a test by whether every
//! assertion in it holds.

use crate::error::TallyError;
use crate::slots::{Element, Slots};
use crate::witness::{Witness, WitnessList};
use serde::Serialize;
use std::io::{self, Write};

/// Initial capacity of an [`AssertionList`].
pub const ASSERTION_LIST_INITIAL_CAPACITY: usize = 32;

/// One boolean check.
///
/// Two assertions are equal iff their results, expression texts, and
/// witness sequences are equal. Witness capacity does not matter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assertion {
    expr: String,
    result: bool,
    witnesses: WitnessList,
}

impl Assertion {
    /// Create an assertion identified by clones of `witnesses`.
    ///
    /// # Panics
    ///
    /// Panics if `expr` is empty; use [`Assertion::try_new`] to handle that.
    pub fn new(expr: impl Into<String>, result: bool, witnesses: &[Witness]) -> Self {
        Self::with_witnesses(expr, result, WitnessList::from_slice(witnesses))
    }

    /// Create an assertion that takes ownership of `witnesses`.
    pub fn with_witnesses(expr: impl Into<String>, result: bool, witnesses: WitnessList) -> Self {
        Self::try_with_witnesses(expr, result, witnesses).unwrap_or_else(|e| panic!("{e}"))
    }

    pub fn try_new(
        expr: impl Into<String>,
        result: bool,
        witnesses: &[Witness],
    ) -> Result<Self, TallyError> {
        Self::try_with_witnesses(expr, result, WitnessList::from_slice(witnesses))
    }

    fn try_with_witnesses(
        expr: impl Into<String>,
        result: bool,
        witnesses: WitnessList,
    ) -> Result<Self, TallyError> {
        let expr = expr.into();
        if expr.is_empty() {
            return Err(TallyError::EmptyExpression);
        }
        witnesses.assert_structure();
        Ok(Self {
            expr,
            result,
            witnesses,
        })
    }

    pub fn expr(&self) -> &str {
        &self.expr
    }

    pub fn result(&self) -> bool {
        self.result
    }

    pub fn witnesses(&self) -> &WitnessList {
        &self.witnesses
    }

    /// Whether at least one witness identifies this assertion.
    pub fn has_witnesses(&self) -> bool {
        !self.witnesses.is_empty()
    }

    /// Write `true:  <expr>` or `false:  <expr>`, then the witness line
    /// (prefixed by `witness_indent`) if there are witnesses.
    pub fn print(&self, out: &mut impl Write, witness_indent: &str) -> io::Result<()> {
        writeln!(out, "{}:  {}", self.result, self.expr)?;
        if self.has_witnesses() {
            write!(out, "{witness_indent}")?;
            self.witnesses.print(out)?;
        }
        Ok(())
    }
}

impl Element for Assertion {
    const INITIAL_CAPACITY: usize = ASSERTION_LIST_INITIAL_CAPACITY;

    fn is_valid(&self) -> bool {
        !self.expr.is_empty() && self.witnesses.is_valid()
    }
}

/// An owned, growable sequence of [`Assertion`]s.
///
/// `add` deep-copies, `add_owned` moves, and `clone` duplicates every
/// assertion together with its witnesses.
pub type AssertionList = Slots<Assertion>;

impl Slots<Assertion> {
    /// A list holding exactly `assertion`.
    pub fn single(assertion: Assertion) -> Self {
        let mut list = Self::empty();
        list.add_owned(assertion);
        list
    }

    /// Fail-fast check: `Ok(())` if `result` holds, otherwise the
    /// single-element list a test function should return as its verdict.
    ///
    /// [`require!`](crate::require) wraps this with the early return.
    pub fn require(
        expr: impl Into<String>,
        result: bool,
        witnesses: &[Witness],
    ) -> Result<(), AssertionList> {
        if result {
            Ok(())
        } else {
            Err(Self::single(Assertion::new(expr, false, witnesses)))
        }
    }

    /// Record an assertion and keep going, whatever its result.
    pub fn check(&mut self, expr: impl Into<String>, result: bool, witnesses: &[Witness]) {
        self.add_owned(Assertion::new(expr, result, witnesses));
    }

    /// Whether every assertion holds. Vacuously true when empty.
    pub fn all_true(&self) -> bool {
        self.assert_structure();
        self.iter().all(Assertion::result)
    }

    /// The assertions that do not hold, in order.
    pub fn failures(&self) -> impl Iterator<Item = &Assertion> {
        self.iter().filter(|a| !a.result())
    }

    /// Print every assertion whose result equals `result`.
    ///
    /// Each assertion line is prefixed by `assertion_indent` and each
    /// witness line by `witness_indent`. When consecutive printed assertions
    /// share an expression, only the witness line of the later ones is
    /// written.
    pub fn print(
        &self,
        result: bool,
        out: &mut impl Write,
        assertion_indent: &str,
        witness_indent: &str,
    ) -> io::Result<()> {
        self.assert_structure();
        let mut last_expr: Option<&str> = None;
        for assertion in self.iter().filter(|a| a.result() == result) {
            if last_expr == Some(assertion.expr()) {
                if assertion.has_witnesses() {
                    write!(out, "{witness_indent}")?;
                    assertion.witnesses().print(out)?;
                }
            } else {
                write!(out, "{assertion_indent}")?;
                assertion.print(out, witness_indent)?;
            }
            last_expr = Some(assertion.expr());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AssertionList {
        AssertionList::from_vec(vec![
            Assertion::new("5 < 10", true, &[]),
            Assertion::new("10 * 10 == 100", true, &[]),
            Assertion::new("5 + 4 < 8", false, &[]),
            Assertion::new("\"test\"[2] == 'x'", false, &[Witness::new("i", 2)]),
            Assertion::new("6 / 3 == 2", true, &[]),
        ])
    }

    fn printed(list: &AssertionList, result: bool) -> String {
        let mut out = Vec::new();
        list.print(result, &mut out, "> ", "| ").unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn equality_discriminates_every_field() {
        let base = Assertion::new("a == b", true, &[Witness::new("a", 1)]);
        assert_eq!(base, base.clone());
        assert_ne!(base, Assertion::new("a == b", false, &[Witness::new("a", 1)]));
        assert_ne!(base, Assertion::new("a != b", true, &[Witness::new("a", 1)]));
        assert_ne!(base, Assertion::new("a == b", true, &[Witness::new("a", 2)]));
        assert_ne!(base, Assertion::new("a == b", true, &[]));
    }

    #[test]
    fn witness_capacity_does_not_affect_equality() {
        let witnesses = [Witness::new("x", 1)];
        let roomy = Assertion::with_witnesses("x > 0", true, WitnessList::with_values(&witnesses, 64));
        assert_eq!(roomy, Assertion::new("x > 0", true, &witnesses));
    }

    #[test]
    fn empty_expression_is_rejected() {
        assert!(matches!(
            Assertion::try_new("", true, &[]),
            Err(TallyError::EmptyExpression)
        ));
    }

    #[test]
    fn get_supports_both_index_directions() {
        let list = sample();
        for i in 0..5isize {
            assert_eq!(list.get(i).unwrap(), list.get(i - 5).unwrap());
        }
        assert_eq!(list.get(2).unwrap().expr(), "5 + 4 < 8");
        assert!(!list.get(-2).unwrap().result());
    }

    #[test]
    fn add_copies_and_add_owned_moves() {
        let mut list = AssertionList::empty();
        let assertion = Assertion::new("x == 1", true, &[Witness::new("x", 1)]);
        list.add(&assertion);
        list.add_owned(assertion.clone());
        assert_eq!(list.len(), 2);
        assert_eq!(list[0], list[1]);
        assert_eq!(list[-1], assertion);
    }

    #[test]
    fn clone_is_deep() {
        let mut source = sample();
        let copy = source.clone();
        assert_eq!(copy, source);
        assert_eq!(copy.capacity(), source.capacity());

        source.decrease_capacity();
        source.decrease_capacity();
        source.decrease_capacity();
        assert_eq!(source.capacity(), 4);
        assert_eq!(source.len(), 4);
        assert_eq!(copy.len(), 5);
        assert_eq!(copy[-1].expr(), "6 / 3 == 2");
    }

    #[test]
    fn truncation_keeps_the_leading_elements() {
        let original = sample();
        let mut shrunk = original.clone();
        while shrunk.capacity() > 2 {
            shrunk.decrease_capacity();
        }
        assert!(shrunk.eq_slice(&original.as_slice()[..2]));
    }

    #[test]
    fn increase_capacity_preserves_contents() {
        let original = sample();
        let mut grown = original.clone();
        grown.increase_capacity();
        assert!(grown.capacity() > original.capacity());
        assert_eq!(grown, original);
    }

    #[test]
    fn all_true_and_failures() {
        let list = sample();
        assert!(!list.all_true());
        assert_eq!(list.failures().count(), 2);
        assert!(AssertionList::empty().all_true());
    }

    #[test]
    fn require_only_fails_on_false() {
        assert!(AssertionList::require("x != 17", true, &[Witness::new("x", 3)]).is_ok());
        let failure = AssertionList::require("x != 17", false, &[Witness::new("x", 17)])
            .expect_err("false result must fail");
        assert!(failure.eq_slice(&[Assertion::new(
            "x != 17",
            false,
            &[Witness::new("x", 17)]
        )]));
    }

    #[test]
    fn print_selects_by_result() {
        let list = sample();
        assert_eq!(
            printed(&list, false),
            "> false:  5 + 4 < 8\n> false:  \"test\"[2] == 'x'\n| (for i = 2)\n"
        );
        assert_eq!(
            printed(&list, true),
            "> true:  5 < 10\n> true:  10 * 10 == 100\n> true:  6 / 3 == 2\n"
        );
    }

    #[test]
    fn print_collapses_repeated_expressions() {
        let mut list = AssertionList::empty();
        for x in [1, 2, 3] {
            list.check("x < 0", false, &[Witness::new("x", x)]);
        }
        list.check("x < 0", false, &[]);
        list.check("y < 0", false, &[]);
        list.check("y < 0", true, &[]);
        list.check("x < 0", false, &[Witness::new("x", 9)]);
        assert_eq!(
            printed(&list, false),
            "> false:  x < 0\n| (for x = 1)\n| (for x = 2)\n| (for x = 3)\n\
             > false:  y < 0\n\
             > false:  x < 0\n| (for x = 9)\n"
        );
    }
}

//! Macros that capture expression text with `stringify!`.
//!
//! The kernel itself only stores caller-supplied text; these macros are the
//! convenient way to supply it.

/// Build an array of [`Witness`](crate::Witness)es, each named after its
/// expression.
///
/// Values of any integer type are accepted; one that does not fit in `i64`
/// panics rather than being reported wrong.
///
/// ```
/// let (x, y) = (3, 4);
/// let ws = tally_kernel::witnesses![x, y * 2];
/// assert_eq!(ws[1].name(), "y * 2");
/// assert_eq!(ws[1].value(), 8);
/// ```
#[macro_export]
macro_rules! witnesses {
    ($($w:expr),* $(,)?) => {
        [$($crate::Witness::from_int(::core::stringify!($w), $w)),*]
    };
}

/// Build an [`AssertionList`](crate::AssertionList) from boolean
/// expressions, each recorded with its source text.
///
/// ```
/// let list = tally_kernel::assertions![2 + 2 == 4, 1 + 1 == 3];
/// assert_eq!(list.len(), 2);
/// assert_eq!(list[1].expr(), "1 + 1 == 3");
/// assert!(!list[1].result());
/// ```
#[macro_export]
macro_rules! assertions {
    ($($cond:expr),* $(,)?) => {
        $crate::AssertionList::from_vec(::std::vec![
            $($crate::Assertion::new(::core::stringify!($cond), $cond, &[])),*
        ])
    };
}

/// Fail fast: if `cond` is false, return from the enclosing test function
/// with a single failing assertion identified by the given witnesses.
///
/// Nothing is recorded while `cond` holds, so a loop stops at its first
/// failing iteration and reports only that one.
///
/// ```
/// use tally_kernel::{Verdict, require};
///
/// fn no_seventeen(_: Option<&mut ()>) -> Verdict {
///     for x in 0..100 {
///         require!(x != 17, x);
///     }
///     None
/// }
///
/// let list = no_seventeen(None).unwrap();
/// assert_eq!(list.len(), 1);
/// assert_eq!(list[0].witnesses().to_string(), "(for x = 17)");
/// ```
#[macro_export]
macro_rules! require {
    ($cond:expr $(, $w:expr)* $(,)?) => {
        if !$cond {
            return ::core::option::Option::Some($crate::AssertionList::single(
                $crate::Assertion::new(
                    ::core::stringify!($cond),
                    false,
                    &$crate::witnesses![$($w),*],
                ),
            ));
        }
    };
}

/// Record `cond` in `list`, identified by the given witnesses, and carry on.
#[macro_export]
macro_rules! check {
    ($list:expr, $cond:expr $(, $w:expr)* $(,)?) => {
        $list.check(::core::stringify!($cond), $cond, &$crate::witnesses![$($w),*])
    };
}

/// Build a [`Test`](crate::Test) named after its function expression.
#[macro_export]
macro_rules! test_case {
    ($run:expr) => {
        $crate::Test::new(::core::stringify!($run), $run)
    };
}

/// Build a `Vec` of tests named after their function expressions.
///
/// The `setup = ..., teardown = ...;` prefix attaches the same fixture
/// functions to every test.
#[macro_export]
macro_rules! tests {
    (setup = $setup:expr, teardown = $teardown:expr; $($run:expr),+ $(,)?) => {
        ::std::vec![$($crate::test_case!($run).with_fixture($setup, $teardown)),+]
    };
    ($($run:expr),* $(,)?) => {
        ::std::vec![$($crate::test_case!($run)),*]
    };
}

//! Demonstration suites. Several of their tests fail on purpose, to show
//! what a failure report looks like.

use super::{Suites, boxed};
use crate::cli::DemoSuite;

pub fn demo(which: DemoSuite) -> Suites {
    match which {
        DemoSuite::Arithmetic => vec![boxed(arithmetic::suite())],
        DemoSuite::Numbers => vec![boxed(numbers::suite())],
        DemoSuite::Sum => vec![boxed(sum::suite())],
        DemoSuite::All => vec![
            boxed(arithmetic::suite()),
            boxed(numbers::suite()),
            boxed(sum::suite()),
        ],
    }
}

mod arithmetic {
    use tally_kernel::{Suite, Verdict, assertions, require, tests};

    fn addition_works(_: Option<&mut ()>) -> Verdict {
        let (one, three, six, nine) = (1, 3, 6, 9);
        assertions![2 + 2 == 4, one + one == three || nine - three == six].into()
    }

    fn multiplication_works(_: Option<&mut ()>) -> Verdict {
        let (one, five) = (1, 5);
        assertions![one * five == 1, 9 * 2 == 18, 3 * 4 != 12].into()
    }

    fn some_numbers_dont_exist(_: Option<&mut ()>) -> Verdict {
        for x in 0..100 {
            require!(x != 17 && x != 42, x);
        }
        None
    }

    pub fn suite() -> Suite {
        Suite::new(
            "arithmetic",
            tests![addition_works, multiplication_works, some_numbers_dont_exist],
        )
    }
}

mod numbers {
    use tally_kernel::{Suite, Verdict, assertions, require, tests};

    fn before_each() -> Vec<i64> {
        vec![1, 2, 4]
    }

    fn after_each(xs: Vec<i64>) {
        tracing::trace!(?xs, "releasing fixture");
    }

    fn addition_works(fixture: Option<&mut Vec<i64>>) -> Verdict {
        require!(fixture.is_some());
        let xs = fixture?;
        xs[1] = 3;
        assertions![xs[1] + 8 == 11].into()
    }

    // Sees xs[1] == 2: every test gets a fresh fixture.
    fn multiplication_works(fixture: Option<&mut Vec<i64>>) -> Verdict {
        require!(fixture.is_some());
        let xs = fixture?;
        assertions![2 * 2 == 5, 3 * xs[1] == 6, xs[2] * 4 != 16].into()
    }

    fn some_numbers_dont_exist(_: Option<&mut Vec<i64>>) -> Verdict {
        for n in 0..100 {
            require!(n != 17 && n != 42, n);
        }
        None
    }

    pub fn suite() -> Suite<Vec<i64>> {
        Suite::new(
            "numbers",
            tests![
                setup = before_each, teardown = after_each;
                addition_works, multiplication_works, some_numbers_dont_exist
            ],
        )
    }
}

mod sum {
    use tally_kernel::{Suite, Verdict, assertions, tests};

    fn sum(xs: &[i64]) -> i64 {
        xs.iter().sum()
    }

    fn sum_declared(_: Option<&mut ()>) -> Verdict {
        let xs = [1, 2, 3];
        let ys = [4, 5, 6, 7, 8];
        assertions![sum(&xs) == 6, sum(&ys) == 30].into()
    }

    fn sum_literal(_: Option<&mut ()>) -> Verdict {
        assertions![sum(&[]) == 0, sum(&[-1, 8]) == 7, sum(&[1, 0, 1]) == 2].into()
    }

    pub fn suite() -> Suite {
        Suite::new("sum", tests![sum_declared, sum_literal])
    }
}

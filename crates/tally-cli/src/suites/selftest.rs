//! The kernel, tested with itself.
//!
//! Every test here is expected to pass; `tally selftest` exits non-zero
//! otherwise.

use super::{Suites, boxed};
use tally_kernel::{
    ASSERTION_LIST_INITIAL_CAPACITY, Assertion, AssertionList, Suite, Test, TestResults,
    TestRunner, Verdict, WITNESS_LIST_INITIAL_CAPACITY, Witness, WitnessList, assertions, check,
    exit_status, require, tests, verdict_passes, witnesses,
};

pub fn selftest() -> Suites {
    vec![
        boxed(Suite::new(
            "Witness",
            tests![witness_equality, witness_display, witness_rejects_empty_names],
        )),
        boxed(Suite::new(
            "WitnessList",
            tests![
                witness_list_new,
                witness_list_add_then_get,
                witness_list_bounds,
                witness_list_capacity_changes,
                witness_list_copy_is_independent,
                witness_list_display,
            ],
        )),
        boxed(Suite::new(
            "Assertion",
            tests![
                assertion_equality,
                assertion_print,
                assertion_rejects_empty_expressions,
            ],
        )),
        boxed(Suite::new(
            "AssertionList",
            tests![
                assertion_list_new,
                assertion_list_indexing,
                assertion_list_all_true,
                assertion_list_require,
                assertion_list_copy_is_deep,
                assertion_list_print,
            ],
        )),
        boxed(Suite::new(
            "Test",
            tests![
                test_equality,
                test_fixtures_are_fresh,
                test_runner_counts,
                test_exit_status,
            ],
        )),
    ]
}

// Witness

fn witness_examples() -> Vec<Witness> {
    vec![
        Witness::new("a", 0),
        Witness::new("ab", 0),
        Witness::new("a", 1),
        Witness::new("ab", 1),
        Witness::new("a", -2),
        Witness::new("ab", -2),
    ]
}

fn witness_equality(_: Option<&mut ()>) -> Verdict {
    let examples = witness_examples();
    let mut list = AssertionList::empty();
    for (i, x) in examples.iter().enumerate() {
        for (j, y) in examples.iter().enumerate() {
            check!(list, (x == y) == (i == j), i, j);
            check!(list, (y == x) == (i == j), i, j);
        }
    }
    Some(list)
}

fn witness_display(_: Option<&mut ()>) -> Verdict {
    assertions![
        Witness::new("x", 17).to_string() == "x = 17",
        Witness::new("i * 2", -4).to_string() == "i * 2 = -4",
    ]
    .into()
}

fn witness_rejects_empty_names(_: Option<&mut ()>) -> Verdict {
    assertions![
        Witness::try_new("", 1).is_err(),
        Witness::try_new("x", 1).is_ok(),
    ]
    .into()
}

// WitnessList

fn witness_list_new(_: Option<&mut ()>) -> Verdict {
    let mut list = AssertionList::empty();
    for requested in 0..10usize {
        let ws = WitnessList::new(requested);
        check!(
            list,
            ws.capacity() == requested.max(WITNESS_LIST_INITIAL_CAPACITY),
            requested
        );
        check!(list, ws.is_empty() && ws.is_valid(), requested);
    }
    Some(list)
}

fn witness_list_add_then_get(_: Option<&mut ()>) -> Verdict {
    let mut ws = WitnessList::empty();
    for i in 0..10i64 {
        let w = Witness::new("i", i);
        ws.add(&w);
        require!(ws.get(-1).ok() == Some(&w), i);
        require!(ws.get(i as isize).ok() == Some(&w), i);
    }
    assertions![ws.len() == 10, ws.capacity() == 16].into()
}

fn witness_list_bounds(_: Option<&mut ()>) -> Verdict {
    let (a, b, c) = (1, 2, 3);
    let ws = WitnessList::from_slice(&witnesses![a, b, c]);
    assertions![
        ws.get(0).is_ok_and(|w| w.name() == "a"),
        ws.get(-1).is_ok_and(|w| w.value() == 3),
        ws.get(-3).ok() == ws.get(0).ok(),
        ws.get(3).is_err(),
        ws.get(-4).is_err(),
    ]
    .into()
}

fn witness_list_capacity_changes(_: Option<&mut ()>) -> Verdict {
    let original = WitnessList::from_slice(&witness_examples());
    let mut grown = original.clone();
    grown.increase_capacity();
    let mut shrunk = original.clone();
    shrunk.decrease_capacity();
    let mut emptied = WitnessList::empty();
    for _ in 0..4 {
        emptied.decrease_capacity();
    }
    let drained = emptied.capacity();
    emptied.increase_capacity();

    assertions![
        original.capacity() == 6,
        grown.capacity() > original.capacity(),
        grown == original,
        shrunk.capacity() == 3,
        shrunk.eq_slice(&witness_examples()[..3]),
        drained == 0,
        emptied.capacity() == WITNESS_LIST_INITIAL_CAPACITY,
    ]
    .into()
}

fn witness_list_copy_is_independent(_: Option<&mut ()>) -> Verdict {
    let mut source = WitnessList::from_slice(&witness_examples());
    let copy = source.clone();
    source.add_owned(Witness::new("z", 9));
    assertions![
        source.len() == 7,
        copy.eq_slice(&witness_examples()),
        copy.capacity() == 6,
    ]
    .into()
}

fn witness_list_display(_: Option<&mut ()>) -> Verdict {
    let (x, y) = (17, -3);
    let ws = WitnessList::from_slice(&witnesses![x, y]);
    assertions![ws.to_string() == "(for x = 17, y = -3)"].into()
}

// Assertion

fn assertion_examples() -> Vec<Assertion> {
    let (i, j) = (0, 1);
    vec![
        Assertion::new("a", true, &[]),
        Assertion::new("a", false, &[]),
        Assertion::new("ab", true, &[]),
        Assertion::new("a", true, &witnesses![i]),
        Assertion::new("a", true, &witnesses![j]),
        Assertion::new("a", true, &witnesses![i, j]),
        Assertion::new("a", true, &witnesses![j, i]),
    ]
}

fn assertion_equality(_: Option<&mut ()>) -> Verdict {
    let examples = assertion_examples();
    let mut list = AssertionList::empty();
    for (i, x) in examples.iter().enumerate() {
        for (j, y) in examples.iter().enumerate() {
            check!(list, (x == y) == (i == j), i, j);
        }
    }
    Some(list)
}

fn assertion_print(_: Option<&mut ()>) -> Verdict {
    let x = 17;
    let failing = Assertion::new("x != 17", false, &witnesses![x]);
    let mut witnessed = Vec::new();
    require!(failing.print(&mut witnessed, "  ").is_ok());
    let mut bare = Vec::new();
    require!(Assertion::new("y", true, &[]).print(&mut bare, "  ").is_ok());

    assertions![
        witnessed == b"false:  x != 17\n  (for x = 17)\n",
        bare == b"true:  y\n",
        failing.has_witnesses(),
    ]
    .into()
}

fn assertion_rejects_empty_expressions(_: Option<&mut ()>) -> Verdict {
    assertions![
        Assertion::try_new("", true, &[]).is_err(),
        Assertion::try_new("x", true, &[]).is_ok(),
    ]
    .into()
}

// AssertionList

fn assertion_list_new(_: Option<&mut ()>) -> Verdict {
    let list = AssertionList::empty();
    let sized = AssertionList::from_vec(assertion_examples());
    assertions![
        list.capacity() == ASSERTION_LIST_INITIAL_CAPACITY,
        list.is_empty(),
        sized.len() == assertion_examples().len(),
        sized.capacity() == ASSERTION_LIST_INITIAL_CAPACITY,
    ]
    .into()
}

fn assertion_list_indexing(_: Option<&mut ()>) -> Verdict {
    let list = AssertionList::from_vec(assertion_examples());
    let n = list.len() as isize;
    for i in 0..n {
        require!(list.get(i).ok() == list.get(i - n).ok(), i);
    }
    assertions![list.get(n).is_err(), list.get(-n - 1).is_err()].into()
}

fn assertion_list_all_true(_: Option<&mut ()>) -> Verdict {
    let (one, two) = (1, 2);
    let holds = assertions![one < two, two > one];
    let breaks = assertions![one < two, one > two];
    assertions![
        AssertionList::empty().all_true(),
        holds.all_true(),
        !breaks.all_true(),
        breaks.failures().count() == 1,
    ]
    .into()
}

fn assertion_list_require(_: Option<&mut ()>) -> Verdict {
    let x = 17;
    let failed = AssertionList::require("x != 17", false, &witnesses![x]);
    assertions![
        AssertionList::require("x != 3", true, &[]).is_ok(),
        failed.as_ref().is_err_and(|list| list.len() == 1),
        failed.is_err_and(|list| list[0] == Assertion::new("x != 17", false, &witnesses![x])),
    ]
    .into()
}

fn assertion_list_copy_is_deep(_: Option<&mut ()>) -> Verdict {
    let mut source = AssertionList::from_vec(assertion_examples());
    let copy = source.clone();
    for _ in 0..3 {
        source.decrease_capacity();
    }
    assertions![
        source.len() == 4,
        copy.len() == 7,
        copy.eq_slice(&assertion_examples()),
        copy.capacity() == ASSERTION_LIST_INITIAL_CAPACITY,
    ]
    .into()
}

fn assertion_list_print(_: Option<&mut ()>) -> Verdict {
    let mut list = AssertionList::empty();
    for x in 0..3 {
        list.check("x > 0", x > 0, &witnesses![x]);
    }
    for x in 0..2 {
        list.check("x < 0", x < 0, &witnesses![x]);
    }
    let mut out = Vec::new();
    require!(list.print(false, &mut out, "", "  ").is_ok());
    assertions![out == b"false:  x > 0\n  (for x = 0)\nfalse:  x < 0\n  (for x = 0)\n  (for x = 1)\n"]
        .into()
}

// Test

fn passes(_: Option<&mut ()>) -> Verdict {
    let one = 1;
    assertions![one == 1].into()
}

fn fails(_: Option<&mut ()>) -> Verdict {
    let one = 1;
    assertions![one == 2].into()
}

fn silent(_: Option<&mut ()>) -> Verdict {
    None
}

fn test_equality(_: Option<&mut ()>) -> Verdict {
    let examples = [
        Test::new("a", passes),
        Test::new("b", passes),
        Test::new("a", fails),
        Test::new("a", silent),
    ];
    let mut list = AssertionList::empty();
    for (i, x) in examples.iter().enumerate() {
        for (j, y) in examples.iter().enumerate() {
            check!(list, (x == y) == (i == j), i, j);
        }
    }
    Some(list)
}

fn fresh() -> Vec<i64> {
    vec![1, 2, 4]
}

fn release(_: Vec<i64>) {}

fn overwrites(fixture: Option<&mut Vec<i64>>) -> Verdict {
    require!(fixture.is_some());
    let xs = fixture?;
    let untouched = xs[1] == 2;
    xs[1] = 3;
    assertions![untouched].into()
}

fn test_fixtures_are_fresh(_: Option<&mut ()>) -> Verdict {
    let test = Test::new("overwrites", overwrites).with_fixture(fresh, release);
    let bare = Test::new("overwrites", overwrites);
    assertions![
        verdict_passes(&test.invoke()),
        verdict_passes(&test.invoke()),
        !verdict_passes(&bare.invoke()),
    ]
    .into()
}

fn test_runner_counts(_: Option<&mut ()>) -> Verdict {
    let mut runner = TestRunner::new(Vec::new());
    let results = runner.run("inner", &tests![silent, passes, fails]);
    require!(results.is_ok());
    let report = String::from_utf8(runner.into_inner()).unwrap_or_default();
    assertions![
        results.is_ok_and(|r| r == TestResults { passed: 2, failed: 1 }),
        report.starts_with("Running inner tests...\n  pass:  silent\n"),
        report.contains("  fail:  fails\n    false:  one == 2\n"),
        report.ends_with("Finished inner tests: 2 passed, and 1 failed.\n"),
    ]
    .into()
}

fn test_exit_status(_: Option<&mut ()>) -> Verdict {
    assertions![
        exit_status(std::iter::empty()) == 0,
        exit_status([0, 0]) == 0,
        exit_status([0, 2]) == 1,
        exit_status([1, 0, 0]) == 1,
    ]
    .into()
}

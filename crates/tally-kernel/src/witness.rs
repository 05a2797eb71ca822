//! Witnesses: named integers that identify which iteration or
//! parameterization produced an assertion.
//!
//! A failing assertion inside a loop is only useful if the report says
//! *which* loop iteration failed. A [`Witness`] records that, e.g.
//! `x = 17`, and a [`WitnessList`] holds any number of them in order.

use crate::error::TallyError;
use crate::slots::{Element, Slots};
use serde::Serialize;
use std::fmt;
use std::io::{self, Write};

/// Initial capacity of a [`WitnessList`].
pub const WITNESS_LIST_INITIAL_CAPACITY: usize = 4;

/// An immutable (name, value) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Witness {
    name: String,
    value: i64,
}

impl Witness {
    /// Create a witness.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty; use [`Witness::try_new`] to handle that.
    pub fn new(name: impl Into<String>, value: i64) -> Self {
        Self::try_new(name, value).unwrap_or_else(|e| panic!("{e}"))
    }

    pub fn try_new(name: impl Into<String>, value: i64) -> Result<Self, TallyError> {
        let name = name.into();
        if name.is_empty() {
            return Err(TallyError::EmptyName);
        }
        Ok(Self { name, value })
    }

    /// Create a witness from any integer type.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty or `value` does not fit in `i64`.
    pub fn from_int<V>(name: impl Into<String>, value: V) -> Self
    where
        V: TryInto<i64> + fmt::Display + Copy,
    {
        Self::try_from_int(name, value).unwrap_or_else(|e| panic!("{e}"))
    }

    pub fn try_from_int<V>(name: impl Into<String>, value: V) -> Result<Self, TallyError>
    where
        V: TryInto<i64> + fmt::Display + Copy,
    {
        let name = name.into();
        match value.try_into() {
            Ok(value) => Self::try_new(name, value),
            Err(_) => Err(TallyError::WitnessOutOfRange {
                name,
                value: value.to_string(),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> i64 {
        self.value
    }
}

impl fmt::Display for Witness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.name, self.value)
    }
}

impl Element for Witness {
    const INITIAL_CAPACITY: usize = WITNESS_LIST_INITIAL_CAPACITY;

    fn is_valid(&self) -> bool {
        !self.name.is_empty()
    }
}

/// An owned, growable sequence of [`Witness`]es.
pub type WitnessList = Slots<Witness>;

impl Slots<Witness> {
    /// Write the witness line, `(for a = 1, b = 2)`, followed by a newline.
    pub fn print(&self, out: &mut impl Write) -> io::Result<()> {
        self.assert_structure();
        writeln!(out, "{self}")
    }
}

/// Renders as `(for a = 1, b = 2)`.
impl fmt::Display for Slots<Witness> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(for ")?;
        for (i, witness) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{witness}")?;
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Witness> {
        vec![
            Witness::new("x", 17),
            Witness::new("y", -3),
            Witness::new("i * 2", 8),
        ]
    }

    #[test]
    fn witness_equality_uses_name_and_value() {
        assert_eq!(Witness::new("x", 1), Witness::new("x", 1));
        assert_ne!(Witness::new("x", 1), Witness::new("x", 2));
        assert_ne!(Witness::new("x", 1), Witness::new("y", 1));
    }

    #[test]
    fn empty_name_is_rejected() {
        assert!(matches!(Witness::try_new("", 3), Err(TallyError::EmptyName)));
    }

    #[test]
    #[should_panic(expected = "must not be empty")]
    fn empty_name_panics_in_new() {
        let _ = Witness::new(String::new(), 0);
    }

    #[test]
    fn integer_witnesses_are_converted_exactly() {
        assert_eq!(Witness::from_int("i", 3usize), Witness::new("i", 3));
        assert_eq!(Witness::from_int("n", -7i8), Witness::new("n", -7));
        assert_eq!(
            Witness::from_int("max", i64::MAX as u64).value(),
            i64::MAX
        );

        let err = Witness::try_from_int("big", u64::MAX).unwrap_err();
        assert!(matches!(err, TallyError::WitnessOutOfRange { .. }));
        assert_eq!(
            err.to_string(),
            "witness big = 18446744073709551615 does not fit in i64"
        );
        assert!(matches!(
            Witness::try_from_int("", 1u8),
            Err(TallyError::EmptyName)
        ));
    }

    #[test]
    fn list_starts_at_initial_capacity() {
        let list = WitnessList::empty();
        assert_eq!(list.capacity(), WITNESS_LIST_INITIAL_CAPACITY);
        assert!(list.is_empty());
    }

    #[test]
    fn list_from_slice_preserves_order() {
        let list = WitnessList::from_slice(&sample());
        assert_eq!(list.len(), 3);
        assert_eq!(list.get(0).unwrap().name(), "x");
        assert_eq!(list.get(-1).unwrap().value(), 8);
        assert!(list.eq_slice(&sample()));
    }

    #[test]
    fn list_equality_is_order_sensitive() {
        let forward = WitnessList::from_slice(&sample());
        let mut reversed = sample();
        reversed.reverse();
        assert_ne!(forward, WitnessList::from_slice(&reversed));
    }

    #[test]
    fn copy_survives_mutation_of_the_source() {
        let mut source = WitnessList::from_slice(&sample());
        let copy = source.clone();
        source.add_owned(Witness::new("z", 0));
        source.decrease_capacity();
        source.decrease_capacity();
        assert!(copy.eq_slice(&sample()));
    }

    #[test]
    fn renders_witness_line() {
        let list = WitnessList::from_slice(&sample());
        assert_eq!(list.to_string(), "(for x = 17, y = -3, i * 2 = 8)");

        let mut out = Vec::new();
        WitnessList::from_slice(&[Witness::new("n", 42)])
            .print(&mut out)
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "(for n = 42)\n");
    }
}

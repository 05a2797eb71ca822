//! Growable, invariant-checked containers.
//!
//! [`Slots<T>`] is the one container behind both
//! [`WitnessList`](crate::WitnessList) and
//! [`AssertionList`](crate::AssertionList). It tracks a logical `capacity`
//! separately from its length so that growth and shrinking follow a fixed
//! policy:
//!
//! - `add` on a full container doubles the capacity first;
//! - `decrease_capacity` halves it, dropping elements past the new capacity;
//! - a zero capacity means no backing storage at all.
//!
//! Invariants (checked by [`Slots::is_valid`] and, fatally, by
//! [`Slots::assert_valid`]):
//!
//! 1. `len <= capacity`
//! 2. backing storage is absent iff `capacity == 0`
//! 3. every live element is itself valid ([`Element::is_valid`])
//!
//! Every operation checks 1 and 2 in constant time. Elements are immutable
//! once inserted, so 3 is enforced when they are added.
//!
//! Indexing is Python-style: `-1` is the last element.

use crate::error::TallyError;
use serde::{Serialize, Serializer};
use std::ops::Index;

/// An element type that a [`Slots`] container can hold.
pub trait Element: Clone + PartialEq {
    /// Capacity a fresh container of this element type starts with.
    const INITIAL_CAPACITY: usize;

    /// Whether this element satisfies its own invariants.
    fn is_valid(&self) -> bool;
}

/// An owned, growable sequence with an explicit capacity policy.
#[derive(Debug)]
pub struct Slots<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T: Element> Slots<T> {
    /// Create an empty container with room for at least `capacity` elements.
    ///
    /// The effective capacity is never below `T::INITIAL_CAPACITY`.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(T::INITIAL_CAPACITY);
        let slots = Self {
            items: Vec::with_capacity(capacity),
            capacity,
        };
        slots.assert_structure();
        slots
    }

    /// Create an empty container with the initial capacity.
    pub fn empty() -> Self {
        Self::new(T::INITIAL_CAPACITY)
    }

    /// Create a container holding clones of `values`.
    ///
    /// If `values` is longer than `capacity`, its length becomes the
    /// capacity.
    pub fn with_values(values: &[T], capacity: usize) -> Self {
        let mut slots = Self::new(capacity.max(values.len()));
        slots.add_all(values);
        slots
    }

    /// Create a container holding clones of `values`, with default capacity.
    pub fn from_slice(values: &[T]) -> Self {
        Self::with_values(values, T::INITIAL_CAPACITY)
    }

    /// Create a container that takes ownership of `values`.
    pub fn from_vec(values: Vec<T>) -> Self {
        let mut slots = Self::new(values.len());
        for value in values {
            slots.add_owned(value);
        }
        slots
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Logical capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Resolve a possibly-negative index into a position in `[0, len)`.
    fn position(&self, index: isize) -> Result<usize, TallyError> {
        let size = self.items.len();
        let out_of_bounds = TallyError::OutOfBounds { index, size };
        let position = if index < 0 {
            size.checked_sub(index.unsigned_abs())
        } else {
            usize::try_from(index).ok().filter(|&i| i < size)
        };
        position.ok_or(out_of_bounds)
    }

    /// Element at `index`; negative indices count from the end.
    pub fn get(&self, index: isize) -> Result<&T, TallyError> {
        self.assert_structure();
        let position = self.position(index)?;
        Ok(&self.items[position])
    }

    /// Append a clone of `value`, growing the capacity if the container is
    /// full.
    pub fn add(&mut self, value: &T) {
        self.add_owned(value.clone());
    }

    /// Append `value` without copying it.
    pub fn add_owned(&mut self, value: T) {
        self.assert_structure();
        if !value.is_valid() {
            fatal(TallyError::InvalidContainer(
                "refusing to add an invalid element".to_string(),
            ));
        }
        if self.items.len() == self.capacity {
            self.increase_capacity();
        }
        self.items.push(value);
    }

    /// Append clones of every element of `values`, in order.
    pub fn add_all(&mut self, values: &[T]) {
        for value in values {
            self.add(value);
        }
    }

    /// Double the capacity (a zero capacity grows back to the initial one).
    pub fn increase_capacity(&mut self) {
        self.assert_structure();
        let capacity = if self.capacity == 0 {
            T::INITIAL_CAPACITY
        } else {
            self.capacity * 2
        };
        tracing::trace!(from = self.capacity, to = capacity, "growing slots");
        self.items.reserve_exact(capacity - self.items.len());
        self.capacity = capacity;
    }

    /// Halve the capacity, dropping any elements that no longer fit.
    ///
    /// A zero capacity stays zero.
    pub fn decrease_capacity(&mut self) {
        self.assert_structure();
        if self.capacity == 0 {
            return;
        }
        let capacity = self.capacity / 2;
        tracing::trace!(from = self.capacity, to = capacity, "shrinking slots");
        self.items.truncate(capacity);
        self.items.shrink_to(capacity);
        self.capacity = capacity;
    }

    /// Whether this container holds exactly the elements of `values`, in
    /// order.
    pub fn eq_slice(&self, values: &[T]) -> bool {
        self.assert_structure();
        self.items.as_slice() == values
    }

    fn storage_matches_capacity(&self) -> bool {
        let storage = self.items.capacity();
        (self.capacity == 0) == (storage == 0) && storage >= self.capacity
    }

    /// Whether every container invariant holds.
    pub fn is_valid(&self) -> bool {
        self.items.len() <= self.capacity
            && self.storage_matches_capacity()
            && self.items.iter().all(Element::is_valid)
    }

    /// Panic with [`TallyError::InvalidContainer`] if an invariant is broken.
    ///
    /// Scans every element; container operations only run the constant-time
    /// structural part of this check.
    pub fn assert_valid(&self) {
        self.assert_structure();
        if let Some(position) = self.items.iter().position(|item| !item.is_valid()) {
            fatal(TallyError::InvalidContainer(format!(
                "element {position} is invalid"
            )));
        }
    }

    /// Invariants 1 and 2. Elements are checked once, on insertion.
    pub(crate) fn assert_structure(&self) {
        if self.items.len() > self.capacity {
            fatal(TallyError::InvalidContainer(format!(
                "size {} exceeds capacity {}",
                self.items.len(),
                self.capacity
            )));
        }
        if !self.storage_matches_capacity() {
            fatal(TallyError::InvalidContainer(format!(
                "storage of {} slots does not match capacity {}",
                self.items.capacity(),
                self.capacity
            )));
        }
    }
}

/// Container errors are programming errors; a corrupted container cannot be
/// trusted to report results, so they end the run.
fn fatal(error: TallyError) -> ! {
    panic!("{error}")
}

impl<T: Element> Default for Slots<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Deep, independent copy with the same capacity.
impl<T: Element> Clone for Slots<T> {
    fn clone(&self) -> Self {
        self.assert_structure();
        let mut copy = Self {
            items: Vec::with_capacity(self.capacity),
            capacity: self.capacity,
        };
        copy.items.extend(self.items.iter().cloned());
        copy
    }
}

impl<T: Element> PartialEq for Slots<T> {
    fn eq(&self, other: &Self) -> bool {
        self.assert_structure();
        other.assert_structure();
        self.items == other.items
    }
}

impl<T: Element + Eq> Eq for Slots<T> {}

impl<T: Element> Index<isize> for Slots<T> {
    type Output = T;

    fn index(&self, index: isize) -> &T {
        self.get(index).unwrap_or_else(|e| fatal(e))
    }
}

impl<'a, T> IntoIterator for &'a Slots<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: Element> FromIterator<T> for Slots<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<T: Serialize> Serialize for Slots<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Tiny(u8);

    impl Element for Tiny {
        const INITIAL_CAPACITY: usize = 2;

        fn is_valid(&self) -> bool {
            self.0 != 0
        }
    }

    fn tinies(values: &[u8]) -> Slots<Tiny> {
        values.iter().copied().map(Tiny).collect()
    }

    #[test]
    fn new_never_goes_below_initial_capacity() {
        assert_eq!(Slots::<Tiny>::new(0).capacity(), 2);
        assert_eq!(Slots::<Tiny>::new(1).capacity(), 2);
        assert_eq!(Slots::<Tiny>::new(9).capacity(), 9);
        assert!(Slots::<Tiny>::empty().is_empty());
    }

    #[test]
    fn with_values_widens_capacity_to_fit() {
        let values = [Tiny(1), Tiny(2), Tiny(3), Tiny(4), Tiny(5)];
        let slots = Slots::with_values(&values, 3);
        assert_eq!(slots.capacity(), 5);
        assert!(slots.eq_slice(&values));
    }

    #[test]
    fn add_doubles_when_full() {
        let mut slots = Slots::<Tiny>::empty();
        slots.add_owned(Tiny(1));
        slots.add_owned(Tiny(2));
        assert_eq!(slots.capacity(), 2);
        slots.add_owned(Tiny(3));
        assert_eq!(slots.capacity(), 4);
        assert_eq!(slots.len(), 3);
        assert!(slots.is_valid());
    }

    #[test]
    fn negative_indices_count_from_the_end() {
        let slots = tinies(&[1, 2, 3]);
        assert_eq!(slots.get(-1).unwrap(), &Tiny(3));
        assert_eq!(slots.get(-3).unwrap(), &Tiny(1));
        assert_eq!(slots[1], Tiny(2));
    }

    #[test]
    fn out_of_range_indices_are_rejected() {
        let slots = tinies(&[1, 2, 3]);
        for index in [3, 4, -4, isize::MIN, isize::MAX] {
            assert!(matches!(
                slots.get(index),
                Err(TallyError::OutOfBounds { size: 3, .. })
            ));
        }
        assert!(Slots::<Tiny>::empty().get(0).is_err());
        assert!(Slots::<Tiny>::empty().get(-1).is_err());
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn indexing_out_of_range_is_fatal() {
        let slots = tinies(&[1]);
        let _ = &slots[1];
    }

    #[test]
    fn decrease_capacity_truncates_and_reaches_zero() {
        let mut slots = tinies(&[1, 2, 3, 4]);
        assert_eq!(slots.capacity(), 4);
        slots.decrease_capacity();
        assert_eq!(slots.capacity(), 2);
        assert!(slots.eq_slice(&[Tiny(1), Tiny(2)]));
        slots.decrease_capacity();
        slots.decrease_capacity();
        assert_eq!(slots.capacity(), 0);
        assert!(slots.is_empty());
        assert!(slots.is_valid());
        slots.decrease_capacity();
        assert_eq!(slots.capacity(), 0);
    }

    #[test]
    fn zero_capacity_grows_back_on_add() {
        let mut slots = tinies(&[1]);
        slots.decrease_capacity();
        slots.decrease_capacity();
        assert_eq!(slots.capacity(), 0);
        slots.add_owned(Tiny(7));
        assert_eq!(slots.capacity(), 2);
        assert_eq!(slots[-1], Tiny(7));
    }

    #[test]
    fn clone_keeps_capacity_and_is_independent() {
        let mut original = tinies(&[1, 2, 3]);
        original.increase_capacity();
        let mut copy = original.clone();
        assert_eq!(copy.capacity(), original.capacity());
        assert_eq!(copy, original);
        copy.add_owned(Tiny(4));
        assert_ne!(copy, original);
        assert_eq!(original.len(), 3);
    }

    thread_local! {
        static VALIDATIONS: std::cell::Cell<usize> = const { std::cell::Cell::new(0) };
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Counted(usize);

    impl Element for Counted {
        const INITIAL_CAPACITY: usize = 4;

        fn is_valid(&self) -> bool {
            VALIDATIONS.with(|n| n.set(n.get() + 1));
            true
        }
    }

    #[test]
    fn elements_are_validated_once_on_insertion() {
        const N: usize = 5_000;
        VALIDATIONS.with(|n| n.set(0));

        let mut slots = Slots::empty();
        for i in 0..N {
            slots.add_owned(Counted(i));
        }
        for i in 0..N as isize {
            assert_eq!(slots[i], Counted(i as usize));
            assert!(slots.get(-1 - i).is_ok());
        }
        let copy = slots.clone();
        assert_eq!(copy, slots);
        slots.increase_capacity();
        slots.decrease_capacity();
        assert_eq!(VALIDATIONS.with(std::cell::Cell::get), N);

        assert!(copy.is_valid());
        assert_eq!(VALIDATIONS.with(std::cell::Cell::get), 2 * N);
    }

    #[test]
    #[should_panic(expected = "invalid element")]
    fn adding_an_invalid_element_is_fatal() {
        let mut slots = Slots::<Tiny>::empty();
        slots.add_owned(Tiny(0));
    }
}

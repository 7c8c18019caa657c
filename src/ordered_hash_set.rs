use alloc::vec::Vec;
use core::fmt::Debug;
use core::ops::Index;

use crate::equality::DefaultEquality;
use crate::equality::Equality;
use crate::error::Error;
use crate::error::Result;
use crate::index_table::IndexTable;
use crate::index_table::Probe;
use crate::macros::debug;
use crate::macros::trace;
use crate::set::ReadOnlySet;

/// Capacity of a set created without an explicit capacity.
const INITIAL_CAPACITY: usize = 3;

/// Number of index slots for `capacity` values: a quarter of headroom, and
/// always at least one slot more than values.
#[inline(always)]
fn table_len_for(capacity: usize) -> usize {
    (capacity + capacity / 4).max(capacity + 1)
}

/// A duplicate-free list: a set that remembers insertion order and can be
/// indexed like a `Vec`.
///
/// Values and their hashes live in two parallel arrays in insertion order. An
/// [`IndexTable`] maps hashes to positions in those arrays, so membership
/// tests and appends are O(1) amortized while iteration walks a dense slice.
///
/// Removal keeps the arrays dense and ordered: later values shift down by one
/// and every stored position after the removed one is decremented, which
/// costs O(capacity). Iteration and indexing stay as fast as a `Vec`'s in
/// exchange.
///
/// # Performance Characteristics
///
/// - **Memory**: a `u64` hash per value plus about 1.25 index slots per unit
///   of capacity, plus the size of `T`.
#[derive(Clone)]
pub struct OrderedHashSet<T, E = DefaultEquality> {
    values: Vec<T>,
    hashes: Vec<u64>,
    table: IndexTable,
    capacity: usize,
    equality: E,
}

impl<T, E> PartialEq for OrderedHashSet<T, E>
where
    E: Equality<T>,
{
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter().all(|v| other.contains(v))
    }
}

impl<T, E> Eq for OrderedHashSet<T, E> where E: Equality<T> {}

impl<T, E> Debug for OrderedHashSet<T, E>
where
    T: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T> OrderedHashSet<T> {
    /// Creates an empty set using the natural equality of `T`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_sets::OrderedHashSet;
    ///
    /// let set: OrderedHashSet<i32> = OrderedHashSet::new();
    /// assert!(set.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_equality(DefaultEquality::default())
    }

    /// Creates an empty set whose initial [`capacity`](Self::capacity) is at
    /// least `capacity`. The first resize happens when the set would reach
    /// that capacity, so it holds `capacity - 1` values without growing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_sets::OrderedHashSet;
    ///
    /// let set: OrderedHashSet<i32> = OrderedHashSet::with_capacity(100);
    /// assert!(set.capacity() >= 100);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_equality(capacity, DefaultEquality::default())
    }
}

impl<T> Default for OrderedHashSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S> OrderedHashSet<T, DefaultEquality<S>> {
    /// Creates an empty set that hashes with `hash_builder`.
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_equality(DefaultEquality::with_hasher(hash_builder))
    }
}

impl<T, E> OrderedHashSet<T, E> {
    /// Creates an empty set comparing values with `equality`.
    pub fn with_equality(equality: E) -> Self {
        Self::with_capacity_and_equality(INITIAL_CAPACITY, equality)
    }

    /// Creates an empty set with the given capacity and equality strategy.
    ///
    /// Capacities below the default initial capacity are rounded up to it.
    pub fn with_capacity_and_equality(capacity: usize, equality: E) -> Self {
        let capacity = capacity.max(INITIAL_CAPACITY);
        Self {
            values: Vec::with_capacity(capacity),
            hashes: Vec::with_capacity(capacity),
            table: IndexTable::with_len(table_len_for(capacity)),
            capacity,
            equality,
        }
    }

    /// Returns the number of values in the set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_sets::OrderedHashSet;
    ///
    /// let mut set = OrderedHashSet::new();
    /// assert_eq!(set.len(), 0);
    /// set.add(1);
    /// assert_eq!(set.len(), 1);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the set contains no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the length of the value storage. One position stays in
    /// reserve, so `capacity() - 1` values fit before the next resize.
    ///
    /// Adding grows the set once `len() + 1` reaches this number.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of slots in the index table.
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.table.len()
    }

    /// Returns the equality strategy of the set.
    #[inline]
    pub fn equality(&self) -> &E {
        &self.equality
    }

    /// Returns the value at `index`, or `None` when out of range.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_sets::OrderedHashSet;
    ///
    /// let mut set = OrderedHashSet::new();
    /// set.add(3);
    /// set.add(1);
    /// assert_eq!(set.get(1), Some(&1));
    /// assert_eq!(set.get(2), None);
    /// ```
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.values.get(index)
    }

    /// Returns the value at `index`, failing with [`Error::OutOfRange`].
    pub fn try_get(&self, index: usize) -> Result<&T> {
        self.values.get(index).ok_or(Error::OutOfRange {
            index,
            len: self.values.len(),
        })
    }

    /// Returns the first value added that is still present.
    pub fn first(&self) -> Option<&T> {
        self.values.first()
    }

    /// Returns the most recently added value that is still present.
    pub fn last(&self) -> Option<&T> {
        self.values.last()
    }

    /// Returns the values in insertion order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    /// Returns an iterator over the values in insertion order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_sets::OrderedHashSet;
    ///
    /// let mut set = OrderedHashSet::new();
    /// set.add(3);
    /// set.add(1);
    /// set.add(2);
    ///
    /// let values: Vec<_> = set.iter().copied().collect();
    /// assert_eq!(values, [3, 1, 2]);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.values.iter(),
        }
    }

    /// Removes all values, keeping the allocated capacity.
    pub fn clear(&mut self) {
        self.values.clear();
        self.hashes.clear();
        self.table.clear();
    }

    /// Returns a histogram of probe displacements: entry `d` counts the
    /// values stored `d` slots after their home slot.
    #[cfg(feature = "stats")]
    pub fn probe_histogram(&self) -> ProbeHistogram {
        ProbeHistogram {
            counts: self.table.displacements(&self.hashes),
        }
    }

    fn resize(&mut self) {
        let capacity = self.capacity * 2 + 1;
        let table_len = table_len_for(capacity);
        trace!(
            "growing ordered set from {} to {} values ({} index slots)",
            self.capacity, capacity, table_len
        );

        self.values.reserve_exact(capacity - self.values.len());
        self.hashes.reserve_exact(capacity - self.hashes.len());
        self.table.rebuild(table_len, &self.hashes);
        self.capacity = capacity;
    }

    /// Rebuilds the index at its current size when tombstones leave at most
    /// one free slot, so every probe still ends at a free slot after the next
    /// insertion.
    fn ensure_free_slot(&mut self) {
        if self.table.free() <= 1 && self.table.tombstones() > 0 {
            debug!(
                "purging {} tombstones from {} index slots",
                self.table.tombstones(),
                self.table.len()
            );
            self.table.rebuild(self.table.len(), &self.hashes);
        }
    }

    /// Returns the slot holding `position`.
    fn slot_of(&self, position: usize) -> usize {
        match self.table.probe(self.hashes[position], |p| p == position) {
            Probe::Found { slot, .. } => slot,
            Probe::Vacant { .. } => {
                unreachable!("position {position} is missing from {:?}", self.table)
            }
        }
    }

    fn remove_found(&mut self, slot: usize, position: usize) -> T {
        self.table.release(slot);
        let value = self.values.remove(position);
        self.hashes.remove(position);
        self.table.shift_down_after(position);
        value
    }

    /// Removes and returns the value at `index`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_sets::Error;
    /// use ordered_sets::OrderedHashSet;
    ///
    /// let mut set: OrderedHashSet<i32> = [1, 2, 3].into_iter().collect();
    /// assert_eq!(set.remove_at(0), Ok(1));
    /// assert_eq!(set.as_slice(), &[2, 3]);
    /// assert_eq!(set.remove_at(5), Err(Error::OutOfRange { index: 5, len: 2 }));
    /// ```
    pub fn remove_at(&mut self, index: usize) -> Result<T> {
        if index >= self.values.len() {
            return Err(Error::OutOfRange {
                index,
                len: self.values.len(),
            });
        }
        let slot = self.slot_of(index);
        Ok(self.remove_found(slot, index))
    }

    /// Keeps only the values for which `keep` returns `true`, preserving
    /// their order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_sets::OrderedHashSet;
    ///
    /// let mut set: OrderedHashSet<i32> = (1..=6).collect();
    /// set.retain(|v| v % 2 == 0);
    /// assert_eq!(set.as_slice(), &[2, 4, 6]);
    /// ```
    pub fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) {
        let len = self.values.len();
        let mut kept = 0;
        for read in 0..len {
            if keep(&self.values[read]) {
                self.values.swap(kept, read);
                self.hashes.swap(kept, read);
                kept += 1;
            }
        }

        if kept == len {
            return;
        }
        self.values.truncate(kept);
        self.hashes.truncate(kept);
        self.table.rebuild(self.table.len(), &self.hashes);
    }
}

impl<T, E> OrderedHashSet<T, E>
where
    E: Equality<T>,
{
    /// Returns the `(slot, position)` of `value`, if present.
    fn find(&self, value: &T) -> Option<(usize, usize)> {
        if self.equality.is_absent(value) {
            return None;
        }
        let hash = self.equality.hash_of(value);
        match self.table.probe(hash, |p| {
            self.hashes[p] == hash && self.equality.equivalent(value, &self.values[p])
        }) {
            Probe::Found { slot, position } => Some((slot, position)),
            Probe::Vacant { .. } => None,
        }
    }

    /// Appends a value to the set.
    ///
    /// Returns whether the value was newly inserted. That is:
    ///
    /// - If the set did not previously contain this value, `true` is returned
    ///   and the value takes the last position.
    /// - If the set already contained this value, `false` is returned.
    /// - If the equality strategy reports the value as absent, it is treated
    ///   as already present and `false` is returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_sets::OrderedHashSet;
    ///
    /// let mut set = OrderedHashSet::new();
    /// assert_eq!(set.add(37), true);
    /// assert_eq!(set.add(37), false);
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn add(&mut self, value: T) -> bool {
        if self.equality.is_absent(&value) {
            return false;
        }

        if self.values.len() + 1 >= self.capacity {
            self.resize();
        } else {
            self.ensure_free_slot();
        }

        let hash = self.equality.hash_of(&value);
        match self.table.probe(hash, |p| {
            self.hashes[p] == hash && self.equality.equivalent(&value, &self.values[p])
        }) {
            Probe::Found { .. } => false,
            Probe::Vacant { slot } => {
                let position = self.values.len();
                self.values.push(value);
                self.hashes.push(hash);
                self.table.occupy(slot, position);
                true
            }
        }
    }

    /// Returns `true` if the set contains a value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_sets::OrderedHashSet;
    ///
    /// let mut set = OrderedHashSet::new();
    /// set.add(1);
    /// assert!(set.contains(&1));
    /// assert!(!set.contains(&2));
    /// ```
    pub fn contains(&self, value: &T) -> bool {
        self.find(value).is_some()
    }

    /// Returns the position of `value` in insertion order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_sets::OrderedHashSet;
    ///
    /// let mut set: OrderedHashSet<i32> = [1, 2, 3, 4].into_iter().collect();
    /// set.remove(&3);
    /// assert_eq!(set.index_of(&4), Some(2));
    /// assert_eq!(set.index_of(&3), None);
    /// ```
    pub fn index_of(&self, value: &T) -> Option<usize> {
        self.find(value).map(|(_, position)| position)
    }

    /// Removes a value from the set. Returns whether the value was present.
    ///
    /// Later values move down one position; their order is unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_sets::OrderedHashSet;
    ///
    /// let mut set = OrderedHashSet::new();
    /// set.add(1);
    /// assert_eq!(set.remove(&1), true);
    /// assert_eq!(set.remove(&1), false);
    /// ```
    pub fn remove(&mut self, value: &T) -> bool {
        self.take(value).is_some()
    }

    /// Removes and returns the stored value equal to `value`.
    pub fn take(&mut self, value: &T) -> Option<T> {
        let (slot, position) = self.find(value)?;
        Some(self.remove_found(slot, position))
    }

    /// Replaces the value at `index`, returning the previous one.
    ///
    /// Fails without modifying the set when `index` is out of range, when
    /// `value` is absent, or when `value` equals an element at another
    /// position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_sets::Error;
    /// use ordered_sets::OrderedHashSet;
    ///
    /// let mut set: OrderedHashSet<i32> = [1, 2, 3].into_iter().collect();
    /// assert_eq!(set.set(1, 20), Ok(2));
    /// assert_eq!(set.as_slice(), &[1, 20, 3]);
    /// assert_eq!(set.set(0, 3), Err(Error::DuplicateViolation { index: 0 }));
    /// ```
    pub fn set(&mut self, index: usize, value: T) -> Result<T> {
        if index >= self.values.len() {
            return Err(Error::OutOfRange {
                index,
                len: self.values.len(),
            });
        }
        if self.equality.is_absent(&value) {
            return Err(Error::NullArgument);
        }

        self.ensure_free_slot();

        let old_slot = self.slot_of(index);
        let hash = self.equality.hash_of(&value);
        match self.table.probe(hash, |p| {
            self.hashes[p] == hash && self.equality.equivalent(&value, &self.values[p])
        }) {
            Probe::Found { slot, .. } if slot != old_slot => {
                return Err(Error::DuplicateViolation { index });
            }
            Probe::Found { .. } => {}
            Probe::Vacant { slot } => {
                self.table.release(old_slot);
                self.table.occupy(slot, index);
            }
        }

        self.hashes[index] = hash;
        Ok(core::mem::replace(&mut self.values[index], value))
    }

    /// Adds every value of `other` that is not already present, in order.
    pub fn union_with(&mut self, other: impl IntoIterator<Item = T>) {
        for value in other {
            self.add(value);
        }
    }

    /// Keeps only the values that are also members of `other`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_sets::OrderedHashSet;
    ///
    /// let mut a: OrderedHashSet<i32> = [1, 2, 3, 4].into_iter().collect();
    /// let b: OrderedHashSet<i32> = [4, 2, 9].into_iter().collect();
    /// a.intersect_with(&b);
    /// assert_eq!(a.as_slice(), &[2, 4]);
    /// ```
    pub fn intersect_with<O>(&mut self, other: &O)
    where
        O: ReadOnlySet<T> + ?Sized,
    {
        self.retain(|v| other.contains(v));
    }

    /// Removes every value that appears in `other`.
    pub fn except_with<'a>(&mut self, other: impl IntoIterator<Item = &'a T>)
    where
        T: 'a,
    {
        for value in other {
            self.remove(value);
        }
    }

    /// Keeps the values present in exactly one of `self` and `other`: shared
    /// values are removed, values only in `other` are appended.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_sets::OrderedHashSet;
    ///
    /// let mut a: OrderedHashSet<i32> = [1, 2, 3].into_iter().collect();
    /// a.symmetric_except_with([3, 4]);
    /// assert_eq!(a.as_slice(), &[1, 2, 4]);
    /// ```
    pub fn symmetric_except_with(&mut self, other: impl IntoIterator<Item = T>) {
        let mut incoming = OrderedHashSet::with_equality(&self.equality);
        incoming.extend(other);
        for value in incoming {
            if !self.remove(&value) {
                self.add(value);
            }
        }
    }
}

impl<T, E> Index<usize> for OrderedHashSet<T, E> {
    type Output = T;

    /// # Panics
    ///
    /// Panics when `index` is out of range.
    fn index(&self, index: usize) -> &T {
        match self.values.get(index) {
            Some(value) => value,
            None => panic!(
                "{}",
                Error::OutOfRange {
                    index,
                    len: self.values.len(),
                }
            ),
        }
    }
}

impl<T, E> ReadOnlySet<T> for OrderedHashSet<T, E>
where
    E: Equality<T>,
{
    type Equality = E;
    type Iter<'a>
        = Iter<'a, T>
    where
        Self: 'a,
        T: 'a;

    fn len(&self) -> usize {
        self.values.len()
    }

    fn equality(&self) -> &E {
        &self.equality
    }

    fn contains(&self, value: &T) -> bool {
        OrderedHashSet::contains(self, value)
    }

    fn iter(&self) -> Iter<'_, T> {
        OrderedHashSet::iter(self)
    }
}

/// Probe displacement counts, see [`OrderedHashSet::probe_histogram`].
#[cfg(feature = "stats")]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeHistogram {
    counts: Vec<usize>,
}

#[cfg(feature = "stats")]
impl ProbeHistogram {
    /// Entry `d` is the number of values stored `d` slots past their home.
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Returns the longest displacement, or `None` for an empty set.
    pub fn max_displacement(&self) -> Option<usize> {
        self.counts.len().checked_sub(1)
    }

    /// Pretty-print the histogram.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        let total: usize = self.counts.iter().sum();
        println!("=== Probe Displacement Histogram ===");
        for (distance, count) in self.counts.iter().enumerate() {
            if *count == 0 {
                continue;
            }
            println!(
                "{:>4}: {:>8} ({:.2}%)",
                distance,
                count,
                *count as f64 / total.max(1) as f64 * 100.0
            );
        }
    }
}

/// An iterator over the values of an [`OrderedHashSet`], in insertion order.
#[derive(Clone)]
pub struct Iter<'a, T> {
    inner: core::slice::Iter<'a, T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

/// A consuming iterator over the values of an [`OrderedHashSet`].
pub struct IntoIter<T> {
    inner: alloc::vec::IntoIter<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T, E> IntoIterator for OrderedHashSet<T, E> {
    type IntoIter = IntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.values.into_iter(),
        }
    }
}

impl<'a, T, E> IntoIterator for &'a OrderedHashSet<T, E> {
    type IntoIter = Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, E> FromIterator<T> for OrderedHashSet<T, E>
where
    E: Equality<T> + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = OrderedHashSet::with_equality(E::default());
        set.extend(iter);
        set
    }
}

impl<T, E> Extend<T> for OrderedHashSet<T, E>
where
    E: Equality<T>,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

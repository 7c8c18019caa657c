use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::equality::DefaultEquality;
use crate::equality::Equality;
use crate::macros::trace;
use crate::set::ReadOnlySet;

/// Number of slots of a set created without an explicit capacity.
const INITIAL_SLOTS: usize = 4;

/// Returns `true` if holding `len` values in `slots` slots exceeds the 80%
/// load limit.
#[inline(always)]
fn over_load(len: usize, slots: usize) -> bool {
    len * 5 > slots * 4
}

/// An unordered hash set using open addressing over a single packed slot
/// array.
///
/// `HashSet<T, E>` uses the same home slot and linear probe as
/// [`OrderedHashSet`](crate::OrderedHashSet) but stores the values directly in
/// the slots. There are no tombstones and no removal, and iteration follows
/// slot order rather than insertion order. Use it when neither order nor
/// deletion is needed.
///
/// # Performance Characteristics
///
/// - **Memory**: one `Option<T>` per slot, at most 80% of slots occupied.
#[derive(Clone)]
pub struct HashSet<T, E = DefaultEquality> {
    slots: Box<[Option<T>]>,
    len: usize,
    equality: E,
}

impl<T, E> PartialEq for HashSet<T, E>
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

impl<T, E> Eq for HashSet<T, E> where E: Equality<T> {}

impl<T, E> Debug for HashSet<T, E>
where
    T: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T> HashSet<T> {
    /// Creates an empty set using the natural equality of `T`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_sets::HashSet;
    ///
    /// let set: HashSet<i32> = HashSet::new();
    /// assert!(set.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_equality(DefaultEquality::default())
    }

    /// Creates an empty set that holds at least `capacity` values before
    /// growing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_sets::HashSet;
    ///
    /// let set: HashSet<i32> = HashSet::with_capacity(100);
    /// assert!(set.capacity() >= 100);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_equality(capacity, DefaultEquality::default())
    }
}

impl<T> Default for HashSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S> HashSet<T, DefaultEquality<S>> {
    /// Creates an empty set that hashes with `hash_builder`.
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_equality(DefaultEquality::with_hasher(hash_builder))
    }
}

impl<T, E> HashSet<T, E> {
    /// Creates an empty set comparing values with `equality`.
    pub fn with_equality(equality: E) -> Self {
        Self::with_slots(INITIAL_SLOTS, equality)
    }

    /// Creates an empty set with room for `capacity` values and the given
    /// equality strategy.
    pub fn with_capacity_and_equality(capacity: usize, equality: E) -> Self {
        let mut slots = INITIAL_SLOTS;
        while over_load(capacity, slots) {
            slots = slots * 2 + 1;
        }
        Self::with_slots(slots, equality)
    }

    fn with_slots(slots: usize, equality: E) -> Self {
        Self {
            slots: empty_slots(slots),
            len: 0,
            equality,
        }
    }

    /// Returns the number of values in the set.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the set contains no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns how many values fit before the slot array grows.
    pub fn capacity(&self) -> usize {
        self.slots.len() * 4 / 5
    }

    /// Returns the number of slots.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Returns the equality strategy of the set.
    pub fn equality(&self) -> &E {
        &self.equality
    }

    /// Removes all values, keeping the slot array.
    pub fn clear(&mut self) {
        self.slots.fill_with(|| None);
        self.len = 0;
    }

    /// Returns an iterator over the values in slot order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_sets::HashSet;
    ///
    /// let mut set = HashSet::new();
    /// set.add(1);
    /// set.add(2);
    ///
    /// let mut values: Vec<_> = set.iter().copied().collect();
    /// values.sort();
    /// assert_eq!(values, [1, 2]);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.slots.iter(),
            remaining: self.len,
        }
    }
}

fn empty_slots<T>(len: usize) -> Box<[Option<T>]> {
    let mut slots = Vec::with_capacity(len);
    slots.resize_with(len, || None);
    slots.into_boxed_slice()
}

impl<T, E> HashSet<T, E>
where
    E: Equality<T>,
{
    /// Probes for `value`: `Ok(slot)` where it is stored, or `Err(slot)` of
    /// the empty slot that ended the probe.
    fn probe(&self, value: &T, hash: u64) -> Result<usize, usize> {
        let len = self.slots.len();
        let mut slot = (hash % len as u64) as usize;
        loop {
            match &self.slots[slot] {
                None => return Err(slot),
                Some(existing) if self.equality.equivalent(existing, value) => return Ok(slot),
                Some(_) => {}
            }

            slot += 1;
            if slot == len {
                slot = 0;
            }
        }
    }

    fn grow(&mut self) {
        let len = self.slots.len() * 2 + 1;
        trace!(
            "growing unordered set from {} to {} slots",
            self.slots.len(),
            len
        );

        let old = core::mem::replace(&mut self.slots, empty_slots(len));
        for value in old.into_vec().into_iter().flatten() {
            let hash = self.equality.hash_of(&value);
            if let Err(slot) = self.probe(&value, hash) {
                self.slots[slot] = Some(value);
            }
        }
    }

    /// Adds a value to the set. Returns `false` if it was already present or
    /// the equality strategy reports it as absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_sets::HashSet;
    ///
    /// let mut set = HashSet::new();
    /// assert_eq!(set.add(37), true);
    /// assert_eq!(set.add(37), false);
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn add(&mut self, value: T) -> bool {
        if self.equality.is_absent(&value) {
            return false;
        }
        if over_load(self.len + 1, self.slots.len()) {
            self.grow();
        }

        let hash = self.equality.hash_of(&value);
        match self.probe(&value, hash) {
            Ok(_) => false,
            Err(slot) => {
                self.slots[slot] = Some(value);
                self.len += 1;
                true
            }
        }
    }

    /// Returns `true` if the set contains a value.
    pub fn contains(&self, value: &T) -> bool {
        if self.equality.is_absent(value) {
            return false;
        }
        let hash = self.equality.hash_of(value);
        self.probe(value, hash).is_ok()
    }

    /// Returns a reference to the stored value equal to `value`.
    pub fn get(&self, value: &T) -> Option<&T> {
        if self.equality.is_absent(value) {
            return None;
        }
        let hash = self.equality.hash_of(value);
        let slot = self.probe(value, hash).ok()?;
        self.slots[slot].as_ref()
    }
}

impl<T, E> ReadOnlySet<T> for HashSet<T, E>
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
        self.len
    }

    fn equality(&self) -> &E {
        &self.equality
    }

    fn contains(&self, value: &T) -> bool {
        HashSet::contains(self, value)
    }

    fn iter(&self) -> Iter<'_, T> {
        HashSet::iter(self)
    }
}

/// An iterator over the values of a [`HashSet`].
#[derive(Clone)]
pub struct Iter<'a, T> {
    inner: core::slice::Iter<'a, Option<T>>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.inner.find_map(|slot| slot.as_ref())?;
        self.remaining -= 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

/// A consuming iterator over the values of a [`HashSet`].
pub struct IntoIter<T> {
    inner: alloc::vec::IntoIter<Option<T>>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.find_map(|slot| slot)
    }
}

impl<T, E> IntoIterator for HashSet<T, E> {
    type IntoIter = IntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.slots.into_vec().into_iter(),
        }
    }
}

impl<'a, T, E> IntoIterator for &'a HashSet<T, E> {
    type IntoIter = Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, E> FromIterator<T> for HashSet<T, E>
where
    E: Equality<T> + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = HashSet::with_equality(E::default());
        set.extend(iter);
        set
    }
}

impl<T, E> Extend<T> for HashSet<T, E>
where
    E: Equality<T>,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

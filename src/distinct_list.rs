use alloc::vec::Vec;
use core::fmt::Debug;
use core::ops::Index;

use crate::equality::DefaultEquality;
use crate::equality::Equality;
use crate::error::Error;
use crate::error::Result;
use crate::set::ReadOnlySet;

/// Capacity of the first allocation.
const INITIAL_CAPACITY: usize = 4;

/// An insertion-ordered set that finds elements by linear scan.
///
/// For a few dozen elements a scan over a contiguous array beats hashing, and
/// no index table has to be kept. Beyond roughly 50 elements prefer
/// [`OrderedHashSet`](crate::OrderedHashSet).
///
/// # Examples
///
/// ```rust
/// use ordered_sets::DistinctList;
///
/// let mut list = DistinctList::new();
/// assert!(list.add("b"));
/// assert!(list.add("a"));
/// assert!(!list.add("b"));
///
/// assert_eq!(list.as_slice(), &["b", "a"]);
/// assert!(list.remove(&"b"));
/// assert_eq!(list[0], "a");
/// ```
#[derive(Clone)]
pub struct DistinctList<T, E = DefaultEquality> {
    items: Vec<T>,
    equality: E,
}

impl<T, E> PartialEq for DistinctList<T, E>
where
    E: Equality<T>,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|v| other.contains(v))
    }
}

impl<T, E> Eq for DistinctList<T, E> where E: Equality<T> {}

impl<T, E> Debug for DistinctList<T, E>
where
    T: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.items.iter()).finish()
    }
}

impl<T> DistinctList<T> {
    /// Creates an empty list using the natural equality of `T`. Does not
    /// allocate until the first element is added.
    pub fn new() -> Self {
        Self::with_equality(DefaultEquality::default())
    }

    /// Creates an empty list with room for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_equality(capacity, DefaultEquality::default())
    }
}

impl<T> Default for DistinctList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> DistinctList<T, E> {
    /// Creates an empty list comparing elements with `equality`.
    pub fn with_equality(equality: E) -> Self {
        Self::with_capacity_and_equality(0, equality)
    }

    /// Creates an empty list with room for `capacity` elements and the given
    /// equality strategy.
    pub fn with_capacity_and_equality(capacity: usize, equality: E) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            equality,
        }
    }

    /// Returns the number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the list has no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of elements that fit without reallocating.
    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    /// Returns the equality strategy of the list.
    pub fn equality(&self) -> &E {
        &self.equality
    }

    /// Returns the element at `index`, or `None` if out of range.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Returns the element at `index`, or [`Error::OutOfRange`].
    pub fn try_get(&self, index: usize) -> Result<&T> {
        self.items.get(index).ok_or(Error::OutOfRange {
            index,
            len: self.items.len(),
        })
    }

    /// Returns the elements in insertion order.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Iterates over the elements in insertion order.
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Removes all elements, keeping the allocation.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T, E> DistinctList<T, E>
where
    E: Equality<T>,
{
    /// Returns the position of the element equivalent to `value`.
    pub fn index_of(&self, value: &T) -> Option<usize> {
        if self.equality.is_absent(value) {
            return None;
        }
        self.items
            .iter()
            .position(|x| self.equality.equivalent(x, value))
    }

    /// Returns `true` if an equivalent element is present.
    pub fn contains(&self, value: &T) -> bool {
        self.index_of(value).is_some()
    }

    /// Appends `value` unless an equivalent element is present or it is
    /// absent. Returns `true` if it was appended.
    pub fn add(&mut self, value: T) -> bool {
        if self.equality.is_absent(&value) || self.contains(&value) {
            return false;
        }

        let capacity = self.items.capacity();
        if self.items.len() == capacity {
            let grown = if capacity == 0 {
                INITIAL_CAPACITY
            } else {
                capacity * 2
            };
            self.items.reserve_exact(grown - self.items.len());
        }
        self.items.push(value);
        true
    }

    /// Removes the element equivalent to `value`, shifting later elements
    /// down by one. Returns `true` if one was removed.
    pub fn remove(&mut self, value: &T) -> bool {
        self.take(value).is_some()
    }

    /// Removes and returns the element equivalent to `value`.
    pub fn take(&mut self, value: &T) -> Option<T> {
        let index = self.index_of(value)?;
        Some(self.items.remove(index))
    }
}

impl<T, E> Index<usize> for DistinctList<T, E> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        match self.items.get(index) {
            Some(value) => value,
            None => panic!(
                "{}",
                Error::OutOfRange {
                    index,
                    len: self.items.len()
                }
            ),
        }
    }
}

impl<T, E> ReadOnlySet<T> for DistinctList<T, E>
where
    E: Equality<T>,
{
    type Equality = E;
    type Iter<'a>
        = core::slice::Iter<'a, T>
    where
        Self: 'a,
        T: 'a;

    fn len(&self) -> usize {
        self.items.len()
    }

    fn equality(&self) -> &E {
        &self.equality
    }

    fn contains(&self, value: &T) -> bool {
        DistinctList::contains(self, value)
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.items.iter()
    }
}

impl<'a, T, E> IntoIterator for &'a DistinctList<T, E> {
    type IntoIter = core::slice::Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T, E> IntoIterator for DistinctList<T, E> {
    type IntoIter = alloc::vec::IntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<T, E> FromIterator<T> for DistinctList<T, E>
where
    E: Equality<T> + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = DistinctList::with_equality(E::default());
        list.extend(iter);
        list
    }
}

impl<T, E> Extend<T> for DistinctList<T, E>
where
    E: Equality<T>,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn test_add_unique_value() {
        let mut list = DistinctList::new();
        assert!(list.add(1));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_add_rejects_duplicates() {
        let mut list = DistinctList::new();
        assert!(list.add(1));
        assert!(!list.add(1));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_contains_only_added_values() {
        let mut list = DistinctList::new();
        list.add(1);
        assert!(list.contains(&1));
        assert!(!list.contains(&2));
    }

    #[test]
    fn test_insertion_order() {
        let list: DistinctList<i32> = [3, 1, 2, 1].into_iter().collect();
        assert_eq!(list.as_slice(), &[3, 1, 2]);
        assert_eq!(list.index_of(&2), Some(2));
        assert_eq!(list.index_of(&9), None);
    }

    #[test]
    fn test_remove_shifts_later_elements_down() {
        let mut list: DistinctList<i32> = (1..=4).collect();
        assert!(list.remove(&2));
        assert!(!list.remove(&2));
        assert_eq!(list.as_slice(), &[1, 3, 4]);
        assert_eq!(list.index_of(&3), Some(1));

        assert!(list.remove(&4));
        assert_eq!(list.as_slice(), &[1, 3]);
        assert!(list.add(2));
        assert_eq!(list.as_slice(), &[1, 3, 2]);
    }

    #[test]
    fn test_grows_by_doubling_from_four() {
        let mut list = DistinctList::new();
        assert_eq!(list.capacity(), 0);
        list.add(0);
        assert!(list.capacity() >= 4);
        for i in 1..5 {
            list.add(i);
        }
        assert!(list.capacity() >= 8);
    }

    #[test]
    fn test_positional_access() {
        let list: DistinctList<String> =
            ["x", "y"].iter().map(|s| s.to_string()).collect();
        assert_eq!(list[1], "y");
        assert_eq!(list.get(2), None);
        assert_eq!(list.try_get(2), Err(Error::OutOfRange { index: 2, len: 2 }));
    }

    #[test]
    fn test_clear_keeps_allocation() {
        let mut list: DistinctList<i32> = (0..10).collect();
        let capacity = list.capacity();
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.capacity(), capacity);
        assert_eq!(list.into_iter().count(), 0);
    }

    #[test]
    fn test_take_returns_the_stored_value() {
        let mut list: DistinctList<i32> = [5, 6].into_iter().collect();
        assert_eq!(list.take(&5), Some(5));
        assert_eq!(list.take(&5), None);
        assert_eq!(list.len(), 1);
    }
}

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::ops::Index;

use crate::equality::DefaultEquality;
use crate::equality::Equality;
use crate::error::Error;
use crate::error::Result;
use crate::set::ReadOnlySet;

/// Capacity of a builder's first allocation.
const INITIAL_CAPACITY: usize = 4;

/// A small immutable set stored as an exact-length slice.
///
/// Membership is a linear scan, so this is meant for a handful of elements.
/// Sets are produced by an [`ArraySetBuilder`], which rejects duplicates as
/// they are added and freezes the result on [`build`](ArraySetBuilder::build).
///
/// # Examples
///
/// ```rust
/// use ordered_sets::ArraySet;
///
/// let mut builder = ArraySet::<&str>::builder();
/// assert!(builder.add("a"));
/// assert!(builder.add("b"));
/// assert!(!builder.add("a"));
///
/// let set = builder.build();
/// assert_eq!(set.len(), 2);
/// assert_eq!(set[1], "b");
/// assert!(set.contains(&"a"));
/// ```
#[derive(Clone)]
pub struct ArraySet<T, E = DefaultEquality> {
    items: Box<[T]>,
    equality: E,
}

impl<T, E> PartialEq for ArraySet<T, E>
where
    E: Equality<T>,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|v| other.contains(v))
    }
}

impl<T, E> Eq for ArraySet<T, E> where E: Equality<T> {}

impl<T, E> Debug for ArraySet<T, E>
where
    T: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.items.iter()).finish()
    }
}

impl<T> ArraySet<T> {
    /// Returns a builder using the natural equality of `T`.
    pub fn builder() -> ArraySetBuilder<T> {
        ArraySetBuilder::new()
    }
}

impl<T, E> ArraySet<T, E> {
    /// Returns a builder with room for `capacity` elements that compares
    /// them with `equality`.
    pub fn builder_with(capacity: usize, equality: E) -> ArraySetBuilder<T, E> {
        ArraySetBuilder {
            items: Vec::with_capacity(capacity),
            equality,
        }
    }

    /// Returns the number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the set has no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
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

    /// Returns the elements in build order.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Returns the equality strategy of the set.
    pub fn equality(&self) -> &E {
        &self.equality
    }

    /// Iterates over the elements in build order.
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T, E> ArraySet<T, E>
where
    E: Equality<T>,
{
    /// Returns `true` if an equivalent element is present.
    pub fn contains(&self, value: &T) -> bool {
        !self.equality.is_absent(value)
            && self.items.iter().any(|x| self.equality.equivalent(x, value))
    }

    /// Returns a new set with the elements of `self` followed by those of
    /// `other` that `self` lacks.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_sets::ArraySet;
    ///
    /// let a: ArraySet<i32> = [1, 2].into_iter().collect();
    /// let b: ArraySet<i32> = [2, 3].into_iter().collect();
    ///
    /// assert_eq!(a.union(&b).as_slice(), &[1, 2, 3]);
    /// ```
    pub fn union<O>(&self, other: &O) -> ArraySet<T, E>
    where
        O: ReadOnlySet<T> + ?Sized,
        T: Clone,
        E: Clone,
    {
        if other.is_empty() {
            return self.clone();
        }

        let mut builder =
            ArraySet::builder_with(self.len() + other.len(), self.equality.clone());
        builder.items.extend_from_slice(&self.items);
        builder.add_all(other.iter().cloned());
        builder.build()
    }
}

impl<T, E> Index<usize> for ArraySet<T, E> {
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

impl<T, E> ReadOnlySet<T> for ArraySet<T, E>
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
        ArraySet::contains(self, value)
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.items.iter()
    }
}

impl<'a, T, E> IntoIterator for &'a ArraySet<T, E> {
    type IntoIter = core::slice::Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T, E> IntoIterator for ArraySet<T, E> {
    type IntoIter = alloc::vec::IntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_vec().into_iter()
    }
}

impl<T, E> FromIterator<T> for ArraySet<T, E>
where
    E: Equality<T> + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut builder = ArraySet::builder_with(0, E::default());
        builder.add_all(iter);
        builder.build()
    }
}

/// Collects distinct elements for an [`ArraySet`].
pub struct ArraySetBuilder<T, E = DefaultEquality> {
    items: Vec<T>,
    equality: E,
}

impl<T> ArraySetBuilder<T> {
    /// Creates an empty builder using the natural equality of `T`.
    pub fn new() -> Self {
        ArraySet::builder_with(0, DefaultEquality::default())
    }
}

impl<T> Default for ArraySetBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> ArraySetBuilder<T, E> {
    /// Returns the number of elements added so far.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if nothing has been added.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the equality strategy of the builder.
    pub fn equality(&self) -> &E {
        &self.equality
    }

    /// Freezes the elements into an [`ArraySet`] of exactly [`len`](Self::len)
    /// elements.
    pub fn build(self) -> ArraySet<T, E> {
        ArraySet {
            items: self.items.into_boxed_slice(),
            equality: self.equality,
        }
    }

    fn ensure_capacity(&mut self, required: usize) {
        let capacity = self.items.capacity();
        if required > capacity {
            let grown = if capacity == 0 {
                INITIAL_CAPACITY
            } else {
                capacity * 2
            };
            self.items.reserve_exact(grown.max(required) - self.items.len());
        }
    }
}

impl<T, E> ArraySetBuilder<T, E>
where
    E: Equality<T>,
{
    /// Adds `value` unless an equivalent one was already added or it is
    /// absent. Returns `true` if it was added.
    pub fn add(&mut self, value: T) -> bool {
        if self.equality.is_absent(&value)
            || self.items.iter().any(|x| self.equality.equivalent(x, &value))
        {
            return false;
        }

        self.ensure_capacity(self.items.len() + 1);
        self.items.push(value);
        true
    }

    /// Adds every element of `values`, skipping duplicates.
    pub fn add_all<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = T>,
    {
        for value in values {
            self.add(value);
        }
    }
}

impl<T, E> Extend<T> for ArraySetBuilder<T, E>
where
    E: Equality<T>,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.add_all(iter);
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::single_set::SingleSet;

    #[test]
    fn test_builder_rejects_duplicates() {
        let mut builder = ArraySet::builder();
        assert!(builder.add(1));
        assert!(builder.add(2));
        assert!(!builder.add(1));
        assert_eq!(builder.len(), 2);

        let set = builder.build();
        assert_eq!(set.as_slice(), &[1, 2]);
        assert!(set.contains(&2));
        assert!(!set.contains(&3));
    }

    #[test]
    fn test_builder_grows_by_doubling_from_four() {
        let mut builder = ArraySet::builder();
        builder.add(0);
        assert!(builder.items.capacity() >= 4);

        for i in 1..5 {
            builder.add(i);
        }
        assert!(builder.items.capacity() >= 8);
        assert_eq!(builder.len(), 5);
    }

    #[test]
    fn test_build_freezes_exact_length() {
        let mut builder: ArraySetBuilder<i32> =
            ArraySet::builder_with(16, DefaultEquality::default());
        builder.add_all([5, 6, 7]);
        let set = builder.build();
        assert_eq!(set.len(), 3);
        assert_eq!(set.items.len(), 3);
    }

    #[test]
    fn test_positional_access() {
        let set: ArraySet<i32> = [9, 8, 7].into_iter().collect();
        assert_eq!(set[0], 9);
        assert_eq!(set.get(2), Some(&7));
        assert_eq!(set.get(3), None);
        assert_eq!(set.try_get(3), Err(Error::OutOfRange { index: 3, len: 3 }));
    }

    #[test]
    #[should_panic(expected = "index 5 is out of range")]
    fn test_index_out_of_range_panics() {
        let set: ArraySet<i32> = [1].into_iter().collect();
        let _ = set[5];
    }

    #[test]
    fn test_union_keeps_left_order_then_new_elements() {
        let a: ArraySet<i32> = [1, 2, 3].into_iter().collect();
        let b: ArraySet<i32> = [4, 2, 5].into_iter().collect();

        let union = a.union(&b);
        assert_eq!(union.as_slice(), &[1, 2, 3, 4, 5]);
        assert_eq!(a.union(&SingleSet::<i32>::empty()), a);
    }

    #[test]
    fn test_owned_iteration() {
        let set: ArraySet<i32> = [3, 1].into_iter().collect();
        assert_eq!(set.into_iter().collect::<Vec<_>>(), vec![3, 1]);
    }
}

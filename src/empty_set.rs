use core::fmt::Debug;
use core::marker::PhantomData;

use crate::equality::DefaultEquality;
use crate::equality::Equality;
use crate::set::ReadOnlySet;

/// A set with no members.
///
/// Holds only its equality strategy. Useful as the identity of a union or
/// the absorbing element of an intersection when building sets out of
/// smaller pieces.
///
/// # Examples
///
/// ```rust
/// use ordered_sets::EmptySet;
/// use ordered_sets::OrderedHashSet;
/// use ordered_sets::ReadOnlySet;
///
/// let empty = EmptySet::<i32>::new();
/// let other: OrderedHashSet<i32> = [1, 2].into_iter().collect();
///
/// assert!(!empty.contains(&1));
/// assert_eq!(empty.union(&other).len(), 2);
/// assert!(empty.intersect(&other).is_empty());
/// ```
pub struct EmptySet<T, E = DefaultEquality> {
    equality: E,
    _marker: PhantomData<fn() -> T>,
}

impl<T> EmptySet<T> {
    /// Creates an empty set using the natural equality of `T`.
    pub fn new() -> Self {
        Self::with_equality(DefaultEquality::default())
    }
}

impl<T> Default for EmptySet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> EmptySet<T, E> {
    /// Creates an empty set carrying `equality`.
    pub fn with_equality(equality: E) -> Self {
        Self {
            equality,
            _marker: PhantomData,
        }
    }

    /// Returns 0.
    #[inline]
    pub fn len(&self) -> usize {
        0
    }

    /// Returns `true`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        true
    }

    /// Returns `false` for every value.
    #[inline]
    pub fn contains(&self, _value: &T) -> bool {
        false
    }

    /// Returns an iterator that yields nothing.
    pub fn iter(&self) -> core::iter::Empty<&T> {
        core::iter::empty()
    }

    /// The union with an empty set is `other` itself.
    pub fn union<O>(&self, other: O) -> O
    where
        O: ReadOnlySet<T>,
    {
        other
    }

    /// The intersection with an empty set is empty.
    pub fn intersect<O>(&self, _other: &O) -> Self
    where
        O: ReadOnlySet<T> + ?Sized,
        E: Clone,
    {
        Self::with_equality(self.equality.clone())
    }
}

impl<T, E> Clone for EmptySet<T, E>
where
    E: Clone,
{
    fn clone(&self) -> Self {
        Self::with_equality(self.equality.clone())
    }
}

impl<T, E> Debug for EmptySet<T, E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("{}")
    }
}

impl<T, E> ReadOnlySet<T> for EmptySet<T, E>
where
    E: Equality<T>,
{
    type Equality = E;
    type Iter<'a>
        = core::iter::Empty<&'a T>
    where
        Self: 'a,
        T: 'a;

    fn len(&self) -> usize {
        0
    }

    fn equality(&self) -> &E {
        &self.equality
    }

    fn contains(&self, _value: &T) -> bool {
        false
    }

    fn iter(&self) -> Self::Iter<'_> {
        core::iter::empty()
    }
}

//! The capability contract shared by every set in this crate.
//!
//! A backing strategy only has to answer four questions to take part in the
//! generic algorithms of [`crate::algebra`]: how many elements it holds, which
//! [`Equality`] it compares them with, whether a value is a member, and what
//! its elements are.

use crate::equality::Equality;

/// A duplicate-free collection that can be queried but not necessarily
/// mutated.
///
/// # Examples
///
/// ```rust
/// use ordered_sets::DistinctList;
/// use ordered_sets::OrderedHashSet;
/// use ordered_sets::ReadOnlySet;
///
/// fn describe<S: ReadOnlySet<i32>>(set: &S) -> usize {
///     set.iter().filter(|v| set.contains(v)).count()
/// }
///
/// let hashed: OrderedHashSet<i32> = [1, 2, 3].into_iter().collect();
/// let scanned: DistinctList<i32> = [1, 2].into_iter().collect();
/// assert_eq!(describe(&hashed), 3);
/// assert_eq!(describe(&scanned), 2);
/// ```
pub trait ReadOnlySet<T> {
    /// The strategy members are compared with.
    type Equality: Equality<T>;

    /// Iterator over the members. Ordered strategies yield insertion order.
    type Iter<'a>: Iterator<Item = &'a T>
    where
        Self: 'a,
        T: 'a;

    /// Returns the number of members.
    fn len(&self) -> usize;

    /// Returns `true` if there are no members.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the equality strategy of this set.
    fn equality(&self) -> &Self::Equality;

    /// Returns `true` if `value` is a member.
    fn contains(&self, value: &T) -> bool;

    /// Iterates over the members.
    fn iter(&self) -> Self::Iter<'_>;
}

impl<T, S> ReadOnlySet<T> for &S
where
    S: ReadOnlySet<T> + ?Sized,
{
    type Equality = S::Equality;
    type Iter<'a>
        = S::Iter<'a>
    where
        Self: 'a,
        T: 'a;

    fn len(&self) -> usize {
        (**self).len()
    }

    fn equality(&self) -> &Self::Equality {
        (**self).equality()
    }

    fn contains(&self, value: &T) -> bool {
        (**self).contains(value)
    }

    fn iter(&self) -> Self::Iter<'_> {
        (**self).iter()
    }
}

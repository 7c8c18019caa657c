use core::fmt::Debug;
use core::hash::Hash;

use crate::array_set::ArraySet;
use crate::equality::DefaultEquality;
use crate::equality::Equality;
use crate::set::ReadOnlySet;

/// A set holding zero or one element, without allocating.
///
/// # Examples
///
/// ```rust
/// use ordered_sets::SingleSet;
///
/// let one = SingleSet::new(2);
/// assert_eq!(one.len(), 1);
/// assert!(one.contains(&2));
///
/// let none = SingleSet::<i32>::empty();
/// assert!(none.is_empty());
/// ```
#[derive(Clone)]
pub struct SingleSet<T, E = DefaultEquality> {
    item: Option<T>,
    equality: E,
}

impl<T, E> Debug for SingleSet<T, E>
where
    T: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.item.iter()).finish()
    }
}

impl<T, E> PartialEq for SingleSet<T, E>
where
    E: Equality<T>,
{
    fn eq(&self, other: &Self) -> bool {
        match (&self.item, &other.item) {
            (None, None) => true,
            (Some(a), Some(b)) => self.equality.equivalent(a, b),
            _ => false,
        }
    }
}

impl<T, E> Eq for SingleSet<T, E> where E: Equality<T> {}

impl<T> SingleSet<T> {
    /// Creates a set holding `item`, using the natural equality of `T`.
    pub fn new(item: T) -> Self
    where
        T: Hash + Eq,
    {
        Self::with_equality(item, DefaultEquality::default())
    }

    /// Creates a set with no element.
    pub fn empty() -> Self {
        Self::empty_with_equality(DefaultEquality::default())
    }
}

impl<T> Default for SingleSet<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T, E> SingleSet<T, E> {
    /// Creates a set with no element that compares with `equality`.
    pub fn empty_with_equality(equality: E) -> Self {
        Self {
            item: None,
            equality,
        }
    }

    /// Returns 0 or 1.
    #[inline]
    pub fn len(&self) -> usize {
        usize::from(self.item.is_some())
    }

    /// Returns `true` if there is no element.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.item.is_none()
    }

    /// Returns the element, if any.
    pub fn get(&self) -> Option<&T> {
        self.item.as_ref()
    }

    /// Returns the equality strategy of the set.
    pub fn equality(&self) -> &E {
        &self.equality
    }

    /// Iterates over the element, if any.
    pub fn iter(&self) -> core::option::Iter<'_, T> {
        self.item.iter()
    }
}

impl<T, E> SingleSet<T, E>
where
    E: Equality<T>,
{
    /// Creates a set holding `item`. An item the strategy reports as absent
    /// gives an empty set.
    pub fn with_equality(item: T, equality: E) -> Self {
        let item = (!equality.is_absent(&item)).then_some(item);
        Self { item, equality }
    }

    /// Returns `true` if the element is equivalent to `value`.
    pub fn contains(&self, value: &T) -> bool {
        self.item
            .as_ref()
            .is_some_and(|item| self.equality.equivalent(item, value))
    }

    /// Returns the union with `other`.
    ///
    /// Stays a [`SmallUnion::Single`] while the result has at most one
    /// element, otherwise builds an [`ArraySet`] holding this element first.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_sets::SingleSet;
    /// use ordered_sets::SmallUnion;
    ///
    /// let a = SingleSet::new(1);
    /// assert!(matches!(a.union(&SingleSet::new(1)), SmallUnion::Single(_)));
    ///
    /// let both = a.union(&SingleSet::new(2));
    /// assert_eq!(both.len(), 2);
    /// assert!(both.contains(&2));
    /// ```
    pub fn union<O>(&self, other: &O) -> SmallUnion<T, E>
    where
        O: ReadOnlySet<T> + ?Sized,
        T: Clone,
        E: Clone,
    {
        let Some(item) = &self.item else {
            return match other.len() {
                0 => SmallUnion::Single(self.clone()),
                _ => {
                    let mut builder =
                        ArraySet::builder_with(other.len(), self.equality.clone());
                    builder.add_all(other.iter().cloned());
                    SmallUnion::from_array(builder.build())
                }
            };
        };

        if other.iter().all(|v| self.equality.equivalent(item, v)) {
            return SmallUnion::Single(self.clone());
        }

        let mut builder = ArraySet::builder_with(1 + other.len(), self.equality.clone());
        builder.add(item.clone());
        builder.add_all(other.iter().cloned());
        SmallUnion::Array(builder.build())
    }
}

impl<T, E> ReadOnlySet<T> for SingleSet<T, E>
where
    E: Equality<T>,
{
    type Equality = E;
    type Iter<'a>
        = core::option::Iter<'a, T>
    where
        Self: 'a,
        T: 'a;

    fn len(&self) -> usize {
        SingleSet::len(self)
    }

    fn equality(&self) -> &E {
        &self.equality
    }

    fn contains(&self, value: &T) -> bool {
        SingleSet::contains(self, value)
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.item.iter()
    }
}

/// The result of [`SingleSet::union`].
#[derive(Clone, Debug)]
pub enum SmallUnion<T, E = DefaultEquality> {
    /// At most one element.
    Single(SingleSet<T, E>),
    /// Two or more elements.
    Array(ArraySet<T, E>),
}

impl<T, E> PartialEq for SmallUnion<T, E>
where
    E: Equality<T>,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|v| other.contains(v))
    }
}

impl<T, E> Eq for SmallUnion<T, E> where E: Equality<T> {}

impl<T, E> SmallUnion<T, E>
where
    E: Equality<T>,
{
    fn from_array(set: ArraySet<T, E>) -> Self
    where
        T: Clone,
        E: Clone,
    {
        match set.len() {
            0 => SmallUnion::Single(SingleSet::empty_with_equality(
                set.equality().clone(),
            )),
            1 => SmallUnion::Single(SingleSet {
                item: set.get(0).cloned(),
                equality: set.equality().clone(),
            }),
            _ => SmallUnion::Array(set),
        }
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        match self {
            SmallUnion::Single(set) => set.len(),
            SmallUnion::Array(set) => set.len(),
        }
    }

    /// Returns `true` if there are no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if `value` is a member.
    pub fn contains(&self, value: &T) -> bool {
        match self {
            SmallUnion::Single(set) => set.contains(value),
            SmallUnion::Array(set) => set.contains(value),
        }
    }

    /// Iterates over the elements.
    pub fn iter(&self) -> SmallUnionIter<'_, T> {
        match self {
            SmallUnion::Single(set) => SmallUnionIter::Single(set.iter()),
            SmallUnion::Array(set) => SmallUnionIter::Array(set.iter()),
        }
    }
}

impl<T, E> ReadOnlySet<T> for SmallUnion<T, E>
where
    E: Equality<T>,
{
    type Equality = E;
    type Iter<'a>
        = SmallUnionIter<'a, T>
    where
        Self: 'a,
        T: 'a;

    fn len(&self) -> usize {
        SmallUnion::len(self)
    }

    fn equality(&self) -> &E {
        match self {
            SmallUnion::Single(set) => set.equality(),
            SmallUnion::Array(set) => set.equality(),
        }
    }

    fn contains(&self, value: &T) -> bool {
        SmallUnion::contains(self, value)
    }

    fn iter(&self) -> Self::Iter<'_> {
        SmallUnion::iter(self)
    }
}

/// Iterator over the elements of a [`SmallUnion`].
#[derive(Clone)]
pub enum SmallUnionIter<'a, T> {
    /// Iterating a single-element set.
    Single(core::option::Iter<'a, T>),
    /// Iterating an array set.
    Array(core::slice::Iter<'a, T>),
}

impl<'a, T> Iterator for SmallUnionIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            SmallUnionIter::Single(iter) => iter.next(),
            SmallUnionIter::Array(iter) => iter.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            SmallUnionIter::Single(iter) => iter.size_hint(),
            SmallUnionIter::Array(iter) => iter.size_hint(),
        }
    }
}

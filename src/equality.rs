use core::fmt::Debug;
use core::hash::BuildHasher;
use core::hash::Hash;

use crate::DefaultHashBuilder;

/// An equality strategy: how values are hashed and compared.
///
/// Every collection in this crate is parameterized by a strategy rather than
/// relying on `T: Hash + Eq` directly, so the same element type can be stored
/// under different notions of sameness (case-insensitive strings, keys of a
/// record, and so on).
///
/// Implementations must be consistent: if `equivalent(a, b)` then
/// `hash_of(a) == hash_of(b)`.
///
/// # Examples
///
/// ```rust
/// use ordered_sets::Equality;
/// use ordered_sets::OrderedHashSet;
///
/// #[derive(Clone, Default)]
/// struct CaseInsensitive;
///
/// impl Equality<String> for CaseInsensitive {
///     fn hash_of(&self, value: &String) -> u64 {
///         value
///             .bytes()
///             .fold(0xcbf29ce484222325, |h, b| {
///                 (h ^ b.to_ascii_lowercase() as u64).wrapping_mul(0x100000001b3)
///             })
///     }
///
///     fn equivalent(&self, a: &String, b: &String) -> bool {
///         a.eq_ignore_ascii_case(b)
///     }
/// }
///
/// let mut set = OrderedHashSet::with_equality(CaseInsensitive);
/// assert!(set.add("Hello".to_string()));
/// assert!(!set.add("HELLO".to_string()));
/// assert_eq!(set.len(), 1);
/// ```
pub trait Equality<T: ?Sized> {
    /// Hashes `value`. Equivalent values must produce equal hashes.
    fn hash_of(&self, value: &T) -> u64;

    /// Returns `true` if `a` and `b` are the same element.
    fn equivalent(&self, a: &T, b: &T) -> bool;

    /// Returns `true` if `value` stands for "no value" and must never be
    /// stored.
    ///
    /// The default accepts every value. Strategies for types with a sentinel
    /// (an empty key, `None`, a reserved id) can override this; the
    /// collections then reject the sentinel on insertion.
    fn is_absent(&self, value: &T) -> bool {
        let _ = value;
        false
    }
}

/// The natural equality of `T`: `Hash + Eq`, hashed with `S`.
#[derive(Clone, Default)]
pub struct DefaultEquality<S = DefaultHashBuilder> {
    hash_builder: S,
}

impl<S> DefaultEquality<S> {
    /// Creates a strategy that hashes with `hash_builder`.
    pub fn with_hasher(hash_builder: S) -> Self {
        Self { hash_builder }
    }

    /// Returns the hasher builder used by this strategy.
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }
}

impl<S> Debug for DefaultEquality<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DefaultEquality").finish_non_exhaustive()
    }
}

impl<T, S> Equality<T> for DefaultEquality<S>
where
    T: Hash + Eq + ?Sized,
    S: BuildHasher,
{
    #[inline]
    fn hash_of(&self, value: &T) -> u64 {
        self.hash_builder.hash_one(value)
    }

    #[inline]
    fn equivalent(&self, a: &T, b: &T) -> bool {
        a == b
    }
}

impl<T, E> Equality<T> for &E
where
    T: ?Sized,
    E: Equality<T> + ?Sized,
{
    #[inline]
    fn hash_of(&self, value: &T) -> u64 {
        (**self).hash_of(value)
    }

    #[inline]
    fn equivalent(&self, a: &T, b: &T) -> bool {
        (**self).equivalent(a, b)
    }

    #[inline]
    fn is_absent(&self, value: &T) -> bool {
        (**self).is_absent(value)
    }
}

#[cfg(test)]
mod tests {
    use siphasher::sip::SipHasher;

    use super::*;

    #[derive(Clone, Default)]
    struct FixedSip;

    impl BuildHasher for FixedSip {
        type Hasher = SipHasher;

        fn build_hasher(&self) -> Self::Hasher {
            SipHasher::new_with_keys(7, 11)
        }
    }

    #[test]
    fn test_default_equality_agrees_with_eq() {
        let eq = DefaultEquality::with_hasher(FixedSip);
        assert!(eq.equivalent(&5u32, &5u32));
        assert!(!eq.equivalent(&5u32, &6u32));
        assert_eq!(eq.hash_of(&5u32), eq.hash_of(&5u32));
        assert!(!Equality::<u32>::is_absent(&eq, &0));
    }

    #[test]
    fn test_references_forward_to_the_strategy() {
        let eq = DefaultEquality::with_hasher(FixedSip);
        let by_ref = &eq;
        assert_eq!(by_ref.hash_of(&"abc"), eq.hash_of(&"abc"));
        assert!(by_ref.equivalent(&"abc", &"abc"));
    }
}

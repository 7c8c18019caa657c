use crate::equality::Equality;
use crate::set::ReadOnlySet;

/// Returns `true` if some member of `set` is equivalent to `value` under
/// `equality`, regardless of the strategy `set` itself compares with.
fn scan_contains<T, S, E>(set: &S, equality: &E, value: &T) -> bool
where
    S: ReadOnlySet<T> + ?Sized,
    E: Equality<T> + ?Sized,
{
    set.iter().any(|member| equality.equivalent(value, member))
}

/// Set relations written once against [`ReadOnlySet`].
///
/// Blanket-implemented for every set, so any two backing strategies can be
/// compared with each other, even when their equality strategies differ.
///
/// Looking up members of `self` in `other` ([`is_subset_of`] and the witness
/// of [`is_proper_superset_of`]) compares with the equality of `self` and
/// scans `other`, so it is O(n * m). Looking up members of `other` in `self`
/// uses the lookup of `self`: O(1) amortized for the hash-based strategies.
///
/// [`is_subset_of`]: SetAlgebra::is_subset_of
/// [`is_proper_superset_of`]: SetAlgebra::is_proper_superset_of
///
/// # Examples
///
/// ```rust
/// use ordered_sets::DistinctList;
/// use ordered_sets::OrderedHashSet;
/// use ordered_sets::SetAlgebra;
///
/// let small: DistinctList<i32> = [2].into_iter().collect();
/// let large: OrderedHashSet<i32> = [1, 2].into_iter().collect();
///
/// assert!(small.is_proper_subset_of(&large));
/// assert!(large.is_proper_superset_of(&small));
/// assert!(large.overlaps(&small));
/// assert!(!large.set_equals(&small));
/// ```
pub trait SetAlgebra<T>: ReadOnlySet<T> {
    /// Returns `true` if every member of `self` is equivalent, under the
    /// equality of `self`, to some member of `other`.
    fn is_subset_of<O>(&self, other: &O) -> bool
    where
        O: ReadOnlySet<T> + ?Sized,
    {
        // Members of `self` are pairwise distinct under its equality, so each
        // needs its own match in `other`.
        let equality = self.equality();
        self.len() <= other.len()
            && self.iter().all(|v| scan_contains(other, equality, v))
    }

    /// Returns `true` if every member of `other` is a member of `self`.
    fn is_superset_of<O>(&self, other: &O) -> bool
    where
        O: ReadOnlySet<T> + ?Sized,
    {
        other.len() <= self.len() && other.iter().all(|v| self.contains(v))
    }

    /// Returns `true` if `self` is a subset of `other` and `other` has at
    /// least one member `self` lacks.
    fn is_proper_subset_of<O>(&self, other: &O) -> bool
    where
        O: ReadOnlySet<T> + ?Sized,
    {
        self.is_subset_of(other) && other.iter().any(|v| !self.contains(v))
    }

    /// Returns `true` if `self` is a superset of `other` and has at least one
    /// member with no equivalent in `other` under the equality of `self`.
    fn is_proper_superset_of<O>(&self, other: &O) -> bool
    where
        O: ReadOnlySet<T> + ?Sized,
    {
        let equality = self.equality();
        self.is_superset_of(other) && self.iter().any(|v| !scan_contains(other, equality, v))
    }

    /// Returns `true` if any member of `other` is a member of `self`.
    fn overlaps<O>(&self, other: &O) -> bool
    where
        O: ReadOnlySet<T> + ?Sized,
    {
        other.iter().any(|v| self.contains(v))
    }

    /// Returns `true` if both sets hold the same members, in any order.
    fn set_equals<O>(&self, other: &O) -> bool
    where
        O: ReadOnlySet<T> + ?Sized,
    {
        self.is_subset_of(other) && self.is_superset_of(other)
    }
}

impl<T, S> SetAlgebra<T> for S where S: ReadOnlySet<T> + ?Sized {}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::string::ToString;

    use super::*;
    use crate::distinct_list::DistinctList;
    use crate::empty_set::EmptySet;
    use crate::hash_set::HashSet;
    use crate::ordered_hash_set::OrderedHashSet;
    use crate::single_set::SingleSet;

    struct CaseInsensitive;

    impl Equality<String> for CaseInsensitive {
        fn hash_of(&self, value: &String) -> u64 {
            value.bytes().fold(0xcbf29ce484222325, |h, b| {
                (h ^ b.to_ascii_lowercase() as u64).wrapping_mul(0x100000001b3)
            })
        }

        fn equivalent(&self, a: &String, b: &String) -> bool {
            a.eq_ignore_ascii_case(b)
        }
    }

    fn ordered(values: &[i32]) -> OrderedHashSet<i32> {
        values.iter().copied().collect()
    }

    fn scanned(values: &[i32]) -> DistinctList<i32> {
        values.iter().copied().collect()
    }

    #[test]
    fn test_subset_and_superset_across_strategies() {
        let a = scanned(&[1, 3]);
        let b = ordered(&[1, 2, 3]);

        assert!(a.is_subset_of(&b));
        assert!(!b.is_subset_of(&a));
        assert!(b.is_superset_of(&a));
        assert!(!a.is_superset_of(&b));
    }

    #[test]
    fn test_subset_and_superset_when_equal() {
        let a = scanned(&[1, 2, 3]);
        let b = ordered(&[3, 2, 1]);

        assert!(a.is_subset_of(&b));
        assert!(a.is_superset_of(&b));
        assert!(!a.is_proper_subset_of(&b));
        assert!(!a.is_proper_superset_of(&b));
        assert!(a.set_equals(&b));
        assert!(b.set_equals(&a));
    }

    #[test]
    fn test_proper_relations_need_a_witness() {
        let single = SingleSet::<i32>::new(2);
        let pair = scanned(&[1, 2]);

        assert!(single.is_proper_subset_of(&pair));
        assert!(pair.is_proper_superset_of(&single));
        assert!(!pair.is_proper_subset_of(&single));
    }

    #[test]
    fn test_overlaps_is_symmetric() {
        let a = ordered(&[1, 2, 3]);
        let mut b: HashSet<i32> = HashSet::new();
        b.add(7);
        b.add(8);

        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));

        b.add(3);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_empty_set_relations() {
        let empty = EmptySet::<i32>::new();
        let a = ordered(&[1]);

        assert!(empty.is_subset_of(&a));
        assert!(empty.is_proper_subset_of(&a));
        assert!(!empty.overlaps(&a));
        assert!(empty.set_equals(&EmptySet::<i32>::new()));
        assert!(a.is_superset_of(&empty));
    }

    #[test]
    fn test_subset_of_itself() {
        let a = ordered(&[5, 6, 7]);
        assert!(a.is_subset_of(&a));
        assert!(a.set_equals(&a));
        assert!(!a.is_proper_subset_of(&a));
    }

    #[test]
    fn test_subset_compares_with_own_equality() {
        let mut a = OrderedHashSet::with_equality(CaseInsensitive);
        a.add("HELLO".to_string());
        let b: DistinctList<String> = ["hello".to_string()].into_iter().collect();

        assert!(a.is_subset_of(&b));
        assert!(a.is_superset_of(&b));
        assert!(a.set_equals(&b));
        assert!(!a.is_proper_subset_of(&b));
        assert!(!a.is_proper_superset_of(&b));

        // `b` compares exactly, so from its side the sets are disjoint.
        assert!(!b.is_subset_of(&a));
        assert!(!b.set_equals(&a));
    }

    #[test]
    fn test_proper_superset_witness_uses_own_equality() {
        let mut a = OrderedHashSet::with_equality(CaseInsensitive);
        a.add("tea".to_string());
        a.add("coffee".to_string());
        let b: DistinctList<String> = ["TEA".to_string()].into_iter().collect();

        assert!(a.is_proper_superset_of(&b));

        let c: DistinctList<String> = ["TEA".to_string(), "Coffee".to_string()]
            .into_iter()
            .collect();
        assert!(!a.is_proper_superset_of(&c));
        assert!(a.set_equals(&c));
    }
}

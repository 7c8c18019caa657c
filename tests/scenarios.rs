//! End-to-end behaviour of the ordered collections through the public API.

use ordered_sets::DistinctList;
use ordered_sets::EmptySet;
use ordered_sets::Equality;
use ordered_sets::Error;
use ordered_sets::HashSet;
use ordered_sets::OrderedHashSet;
use ordered_sets::ReadOnlySet;
use ordered_sets::SetAlgebra;
use ordered_sets::SingleSet;
use ordered_sets::UniqueLookup;
use rstest::rstest;

/// Hashes a `u64` to itself so slot positions are predictable.
#[derive(Clone, Copy, Default)]
struct Identity;

impl Equality<u64> for Identity {
    fn hash_of(&self, value: &u64) -> u64 {
        *value
    }

    fn equivalent(&self, a: &u64, b: &u64) -> bool {
        a == b
    }
}

#[rstest]
#[case(&[3, 1, 2], &[3, 1, 2])]
#[case(&[1, 1, 1], &[1])]
#[case(&[5, 4, 5, 3, 4], &[5, 4, 3])]
#[case(&[], &[])]
fn ordered_hash_set_keeps_first_insertion_order(
    #[case] input: &[i32],
    #[case] expected: &[i32],
) {
    let set: OrderedHashSet<i32> = input.iter().copied().collect();

    assert_eq!(set.len(), expected.len());
    assert_eq!(set.as_slice(), expected);
    for (position, value) in expected.iter().enumerate() {
        assert_eq!(set.index_of(value), Some(position));
        assert_eq!(set[position], *value);
    }
}

#[rstest]
#[case(&[3, 1, 2], &[3, 1, 2])]
#[case(&[1, 1, 1], &[1])]
#[case(&[5, 4, 5, 3, 4], &[5, 4, 3])]
fn distinct_list_keeps_first_insertion_order(
    #[case] input: &[i32],
    #[case] expected: &[i32],
) {
    let list: DistinctList<i32> = input.iter().copied().collect();

    assert_eq!(list.as_slice(), expected);
    for (position, value) in expected.iter().enumerate() {
        assert_eq!(list.index_of(value), Some(position));
    }
}

#[rstest]
fn removal_renumbers_later_positions() {
    let mut set: OrderedHashSet<i32> = (1..=4).collect();

    assert!(set.remove(&3));
    assert_eq!(set.index_of(&1), Some(0));
    assert_eq!(set.index_of(&2), Some(1));
    assert_eq!(set.index_of(&4), Some(2));
    assert_eq!(set.index_of(&3), None);
    assert_eq!(set.len(), 3);
}

#[rstest]
fn insertion_reuses_the_vacated_slot() {
    let mut set: OrderedHashSet<u64, Identity> =
        OrderedHashSet::with_capacity_and_equality(6, Identity);
    assert_eq!(set.slot_count(), 7);

    for value in 1..=4 {
        assert!(set.add(value));
    }
    assert!(set.remove(&3));
    assert!(set.add(10));

    assert_eq!(set.slot_count(), 7);
    assert_eq!(set.len(), 4);
    assert_eq!(set.as_slice(), &[1, 2, 4, 10]);
    for value in [1, 2, 4, 10] {
        assert!(set.contains(&value));
    }
    assert!(!set.contains(&3));
}

#[rstest]
#[case(10)]
#[case(100)]
#[case(1_000)]
#[case(10_000)]
fn growth_preserves_membership_and_order(#[case] count: u64) {
    let mut set = OrderedHashSet::new();
    for value in (0..count).rev() {
        assert!(set.add(value));
    }

    assert_eq!(set.len() as u64, count);
    assert!(set.slot_count() > set.len());
    for (position, value) in (0..count).rev().enumerate() {
        assert_eq!(set.index_of(&value), Some(position));
    }
}

#[rstest]
fn churn_never_exhausts_the_table() {
    let mut set: OrderedHashSet<u64, Identity> =
        OrderedHashSet::with_capacity_and_equality(6, Identity);

    for round in 0..1_000u64 {
        assert!(set.add(round));
        assert!(set.remove(&round));
    }
    assert!(set.is_empty());
    assert_eq!(set.slot_count(), 7);
}

#[rstest]
fn set_replaces_in_place_and_rejects_duplicates() {
    let mut set: OrderedHashSet<&str> = ["a", "b", "c"].into_iter().collect();

    assert_eq!(set.set(1, "z"), Ok("b"));
    assert_eq!(set.as_slice(), &["a", "z", "c"]);
    assert_eq!(set.set(0, "c"), Err(Error::DuplicateViolation { index: 0 }));
    assert_eq!(set.set(3, "q"), Err(Error::OutOfRange { index: 3, len: 3 }));
    assert_eq!(set.set(2, "c"), Ok("c"));
    assert!(!set.contains(&"b"));
}

#[rstest]
fn algebra_holds_across_strategies() {
    let ordered: OrderedHashSet<i32> = [1, 2, 3].into_iter().collect();
    let scanned: DistinctList<i32> = [3, 2, 1].into_iter().collect();
    let mut unordered: HashSet<i32> = HashSet::new();
    unordered.add(2);
    let single = SingleSet::new(9);
    let empty = EmptySet::<i32>::new();

    assert!(ordered.set_equals(&scanned));
    assert!(unordered.is_proper_subset_of(&ordered));
    assert!(scanned.is_proper_superset_of(&unordered));
    assert!(!single.overlaps(&ordered));
    assert!(empty.is_subset_of(&single));

    let union = empty.union(&ordered);
    assert!(union.set_equals(&ordered));
    assert_eq!(ReadOnlySet::len(union), 3);
}

#[rstest]
fn unique_lookup_groups_values_per_key() {
    let orders = [("alice", 1), ("bob", 2), ("alice", 3), ("alice", 1)];
    let lookup = UniqueLookup::from_values(orders, |(name, _)| *name);

    let alice: Vec<_> = lookup
        .get(&"alice")
        .map(|set| set.iter().map(|(_, id)| *id).collect())
        .unwrap_or_default();
    assert_eq!(alice, [1, 3]);
    assert_eq!(lookup.len(), 2);
}

use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::HashTable;
use hashbrown::hash_table;
use hashbrown::hash_table::Entry;

use crate::equality::DefaultEquality;
use crate::equality::Equality;
use crate::ordered_hash_set::OrderedHashSet;

/// Keys paired with a collection each, compared with a key [`Equality`].
#[derive(Clone)]
struct KeyTable<K, C, KE> {
    table: HashTable<(K, C)>,
    key_equality: KE,
}

impl<K, C, KE> KeyTable<K, C, KE> {
    fn with_capacity(capacity: usize, key_equality: KE) -> Self {
        Self {
            table: HashTable::with_capacity(capacity),
            key_equality,
        }
    }

    fn len(&self) -> usize {
        self.table.len()
    }

    fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    fn iter(&self) -> Iter<'_, K, C> {
        Iter {
            inner: self.table.iter(),
        }
    }

    fn clear(&mut self) {
        self.table.clear();
    }
}

impl<K, C, KE> KeyTable<K, C, KE>
where
    KE: Equality<K>,
{
    fn entry(&mut self, key: &K) -> Entry<'_, (K, C)> {
        let key_equality = &self.key_equality;
        self.table.entry(
            key_equality.hash_of(key),
            |(k, _)| key_equality.equivalent(k, key),
            |(k, _)| key_equality.hash_of(k),
        )
    }

    fn get(&self, key: &K) -> Option<&C> {
        let key_equality = &self.key_equality;
        self.table
            .find(key_equality.hash_of(key), |(k, _)| key_equality.equivalent(k, key))
            .map(|(_, values)| values)
    }

    fn get_mut(&mut self, key: &K) -> Option<&mut C> {
        let key_equality = &self.key_equality;
        self.table
            .find_mut(key_equality.hash_of(key), |(k, _)| key_equality.equivalent(k, key))
            .map(|(_, values)| values)
    }

    fn insert(&mut self, key: K, values: C) -> Option<C> {
        match self.entry(&key) {
            Entry::Occupied(mut entry) => Some(core::mem::replace(&mut entry.get_mut().1, values)),
            Entry::Vacant(entry) => {
                entry.insert((key, values));
                None
            }
        }
    }

    fn remove(&mut self, key: &K) -> bool {
        let key_equality = &self.key_equality;
        match self
            .table
            .find_entry(key_equality.hash_of(key), |(k, _)| key_equality.equivalent(k, key))
        {
            Ok(entry) => {
                entry.remove();
                true
            }
            Err(_) => false,
        }
    }
}

/// A map from each key to every value added under it, duplicates included.
///
/// Keys are compared with a key [`Equality`], so a lookup can, for example,
/// group case-insensitively. See [`UniqueLookup`] for a version that keeps
/// each value once per key.
///
/// # Examples
///
/// ```rust
/// use ordered_sets::Lookup;
///
/// let mut lookup = Lookup::new();
/// assert!(lookup.add("fruit", "apple"));
/// assert!(lookup.add("fruit", "apple"));
/// assert!(lookup.add("veg", "leek"));
///
/// assert_eq!(lookup.len(), 2);
/// assert_eq!(lookup.get(&"fruit"), Some(&["apple", "apple"][..]));
/// ```
#[derive(Clone)]
pub struct Lookup<K, V, KE = DefaultEquality> {
    entries: KeyTable<K, Vec<V>, KE>,
}

impl<K, V, KE> Debug for Lookup<K, V, KE>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> Lookup<K, V> {
    /// Creates an empty lookup using the natural equality of `K`.
    pub fn new() -> Self {
        Self::with_key_equality(DefaultEquality::default())
    }

    /// Creates an empty lookup with room for `capacity` keys.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_key_equality(capacity, DefaultEquality::default())
    }
}

impl<K, V> Lookup<K, V>
where
    K: Hash + Eq,
{
    /// Groups `values` by the key `key_selector` derives from each one.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_sets::Lookup;
    ///
    /// let words = ["ant", "bee", "asp", "bat", "ant"];
    /// let by_letter = Lookup::from_values(words, |w| w.as_bytes()[0]);
    ///
    /// assert_eq!(by_letter.get(&b'a'), Some(&["ant", "asp", "ant"][..]));
    /// assert_eq!(by_letter.get(&b'b'), Some(&["bee", "bat"][..]));
    /// ```
    pub fn from_values<I, F>(values: I, key_selector: F) -> Self
    where
        I: IntoIterator<Item = V>,
        F: FnMut(&V) -> K,
    {
        Self::from_values_with(values, key_selector, DefaultEquality::default())
    }
}

impl<K, V> Default for Lookup<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> Lookup<K, V, DefaultEquality<S>> {
    /// Creates an empty lookup hashing keys with `hash_builder`.
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_capacity_and_hasher(0, hash_builder)
    }

    /// Creates an empty lookup with room for `capacity` keys, hashing them
    /// with `hash_builder`.
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self::with_capacity_and_key_equality(capacity, DefaultEquality::with_hasher(hash_builder))
    }
}

impl<K, V, KE> Lookup<K, V, KE> {
    /// Creates an empty lookup comparing keys with `key_equality`.
    pub fn with_key_equality(key_equality: KE) -> Self {
        Self::with_capacity_and_key_equality(0, key_equality)
    }

    /// Creates an empty lookup with room for `capacity` keys, comparing them
    /// with `key_equality`.
    pub fn with_capacity_and_key_equality(capacity: usize, key_equality: KE) -> Self {
        Self {
            entries: KeyTable::with_capacity(capacity, key_equality),
        }
    }

    /// Returns the strategy keys are compared with.
    pub fn key_equality(&self) -> &KE {
        &self.entries.key_equality
    }

    /// Returns the number of keys, not the number of values.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over each key and its values, in arbitrary key order.
    pub fn iter(&self) -> Iter<'_, K, Vec<V>> {
        self.entries.iter()
    }

    /// Iterates over the keys in arbitrary order.
    pub fn keys(&self) -> Keys<'_, K, Vec<V>> {
        Keys {
            inner: self.entries.iter(),
        }
    }

    /// Removes every key.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<K, V, KE> Lookup<K, V, KE>
where
    KE: Equality<K>,
{
    /// Groups `values` by the key `key_selector` derives from each one,
    /// comparing keys with `key_equality`.
    pub fn from_values_with<I, F>(values: I, mut key_selector: F, key_equality: KE) -> Self
    where
        I: IntoIterator<Item = V>,
        F: FnMut(&V) -> K,
    {
        let mut lookup = Self::with_key_equality(key_equality);
        for value in values {
            lookup.add(key_selector(&value), value);
        }
        lookup
    }

    /// Appends `value` to the values of `key`. Always returns `true`.
    ///
    /// A key equivalent to one already present is not stored again; the
    /// first key added stays.
    pub fn add(&mut self, key: K, value: V) -> bool {
        match self.entries.entry(&key) {
            Entry::Occupied(mut entry) => entry.get_mut().1.push(value),
            Entry::Vacant(entry) => {
                entry.insert((key, vec![value]));
            }
        }
        true
    }

    /// Returns the values of `key`, in the order they were added.
    pub fn get(&self, key: &K) -> Option<&[V]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Returns the values of `key` for in-place modification.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut Vec<V>> {
        self.entries.get_mut(key)
    }

    /// Returns `true` if `key` is present, even with no values.
    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.get(key).is_some()
    }

    /// Replaces the values of `key`, returning the previous ones.
    pub fn insert(&mut self, key: K, values: Vec<V>) -> Option<Vec<V>> {
        self.entries.insert(key, values)
    }

    /// Removes `key` and all of its values. Returns `true` if the key was
    /// present.
    pub fn remove_all(&mut self, key: &K) -> bool {
        self.entries.remove(key)
    }

    /// Removes the first occurrence of `value` under `key`. The key stays
    /// present even when this empties its values.
    pub fn remove(&mut self, key: &K, value: &V) -> bool
    where
        V: PartialEq,
    {
        let Some(values) = self.entries.get_mut(key) else {
            return false;
        };
        match values.iter().position(|v| v == value) {
            Some(index) => {
                values.remove(index);
                true
            }
            None => false,
        }
    }
}

impl<'a, K, V, KE> IntoIterator for &'a Lookup<K, V, KE> {
    type IntoIter = Iter<'a, K, Vec<V>>;
    type Item = (&'a K, &'a Vec<V>);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A map from each key to the distinct values added under it, kept in
/// insertion order.
///
/// Keys are compared with a key [`Equality`]. Values under one key are held
/// in an [`OrderedHashSet`], and every new key's set gets a clone of the
/// lookup's value equality.
///
/// # Examples
///
/// ```rust
/// use ordered_sets::UniqueLookup;
///
/// let mut lookup = UniqueLookup::new();
/// assert!(lookup.add("fruit", "apple"));
/// assert!(!lookup.add("fruit", "apple"));
/// assert!(lookup.add("fruit", "pear"));
///
/// let fruit = lookup.get(&"fruit").unwrap();
/// assert_eq!(fruit.as_slice(), &["apple", "pear"]);
/// ```
pub struct UniqueLookup<K, V, KE = DefaultEquality, E = DefaultEquality> {
    entries: KeyTable<K, OrderedHashSet<V, E>, KE>,
    value_equality: E,
}

impl<K, V, KE, E> Clone for UniqueLookup<K, V, KE, E>
where
    K: Clone,
    V: Clone,
    KE: Clone,
    E: Clone,
{
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            value_equality: self.value_equality.clone(),
        }
    }
}

impl<K, V, KE, E> Debug for UniqueLookup<K, V, KE, E>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> UniqueLookup<K, V> {
    /// Creates an empty lookup using the natural equality of both `K` and
    /// `V`.
    pub fn new() -> Self {
        Self::with_equalities(DefaultEquality::default(), DefaultEquality::default())
    }
}

impl<K, V> UniqueLookup<K, V>
where
    K: Hash + Eq,
    V: Hash + Eq,
{
    /// Groups `values` by the key `key_selector` derives from each one,
    /// keeping each value once per key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_sets::UniqueLookup;
    ///
    /// let words = ["ant", "bee", "asp", "ant"];
    /// let by_letter = UniqueLookup::from_values(words, |w| w.len());
    ///
    /// assert_eq!(by_letter.get(&3).unwrap().as_slice(), &["ant", "bee", "asp"]);
    /// ```
    pub fn from_values<I, F>(values: I, key_selector: F) -> Self
    where
        I: IntoIterator<Item = V>,
        F: FnMut(&V) -> K,
    {
        Self::from_values_with(
            values,
            key_selector,
            DefaultEquality::default(),
            DefaultEquality::default(),
        )
    }
}

impl<K, V> Default for UniqueLookup<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, E> UniqueLookup<K, V, DefaultEquality, E> {
    /// Creates an empty lookup comparing values with `value_equality`.
    pub fn with_equality(value_equality: E) -> Self {
        Self::with_equalities(DefaultEquality::default(), value_equality)
    }
}

impl<K, V, KE, E> UniqueLookup<K, V, KE, E> {
    /// Creates an empty lookup comparing keys with `key_equality` and values
    /// with `value_equality`.
    pub fn with_equalities(key_equality: KE, value_equality: E) -> Self {
        Self {
            entries: KeyTable::with_capacity(0, key_equality),
            value_equality,
        }
    }

    /// Returns the number of keys, not the number of values.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the strategy keys are compared with.
    pub fn key_equality(&self) -> &KE {
        &self.entries.key_equality
    }

    /// Returns the equality cloned into each new key's set.
    pub fn value_equality(&self) -> &E {
        &self.value_equality
    }

    /// Iterates over each key and its values, in arbitrary key order.
    pub fn iter(&self) -> Iter<'_, K, OrderedHashSet<V, E>> {
        self.entries.iter()
    }

    /// Iterates over the keys in arbitrary order.
    pub fn keys(&self) -> Keys<'_, K, OrderedHashSet<V, E>> {
        Keys {
            inner: self.entries.iter(),
        }
    }

    /// Removes every key.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<K, V, KE, E> UniqueLookup<K, V, KE, E>
where
    KE: Equality<K>,
    E: Equality<V> + Clone,
{
    /// Groups `values` by the key `key_selector` derives from each one,
    /// comparing keys with `key_equality` and values with `value_equality`.
    pub fn from_values_with<I, F>(
        values: I,
        mut key_selector: F,
        key_equality: KE,
        value_equality: E,
    ) -> Self
    where
        I: IntoIterator<Item = V>,
        F: FnMut(&V) -> K,
    {
        let mut lookup = Self::with_equalities(key_equality, value_equality);
        for value in values {
            lookup.add(key_selector(&value), value);
        }
        lookup
    }

    /// Adds `value` under `key`. Returns `false` if an equivalent value is
    /// already present under that key or the value is absent.
    pub fn add(&mut self, key: K, value: V) -> bool {
        match self.entries.entry(&key) {
            Entry::Occupied(mut entry) => entry.get_mut().1.add(value),
            Entry::Vacant(entry) => {
                let mut values = OrderedHashSet::with_equality(self.value_equality.clone());
                if !values.add(value) {
                    return false;
                }
                entry.insert((key, values));
                true
            }
        }
    }

    /// Returns the values of `key`, in the order they were added.
    pub fn get(&self, key: &K) -> Option<&OrderedHashSet<V, E>> {
        self.entries.get(key)
    }

    /// Returns the values of `key` for in-place modification.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut OrderedHashSet<V, E>> {
        self.entries.get_mut(key)
    }

    /// Returns `true` if `key` is present, even with no values.
    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.get(key).is_some()
    }

    /// Replaces the values of `key`, returning the previous ones.
    pub fn insert(
        &mut self,
        key: K,
        values: OrderedHashSet<V, E>,
    ) -> Option<OrderedHashSet<V, E>> {
        self.entries.insert(key, values)
    }

    /// Removes `key` and all of its values. Returns `true` if the key was
    /// present.
    pub fn remove_all(&mut self, key: &K) -> bool {
        self.entries.remove(key)
    }

    /// Removes `value` from the values of `key`. The key stays present even
    /// when this empties its values.
    pub fn remove(&mut self, key: &K, value: &V) -> bool {
        self.entries
            .get_mut(key)
            .is_some_and(|values| values.remove(value))
    }
}

impl<'a, K, V, KE, E> IntoIterator for &'a UniqueLookup<K, V, KE, E> {
    type IntoIter = Iter<'a, K, OrderedHashSet<V, E>>;
    type Item = (&'a K, &'a OrderedHashSet<V, E>);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the keys of a lookup and their values.
pub struct Iter<'a, K, C> {
    inner: hash_table::Iter<'a, (K, C)>,
}

impl<K, C> Clone for Iter<'_, K, C> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, C> Iterator for Iter<'a, K, C> {
    type Item = (&'a K, &'a C);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, values)| (key, values))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, C> ExactSizeIterator for Iter<'_, K, C> {}

/// An iterator over the keys of a lookup.
pub struct Keys<'a, K, C> {
    inner: Iter<'a, K, C>,
}

impl<'a, K, C> Iterator for Keys<'a, K, C> {
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, C> ExactSizeIterator for Keys<'_, K, C> {}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::string::ToString;
    use alloc::vec;

    use super::*;

    #[derive(Clone, Default)]
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

    #[test]
    fn test_lookup_keeps_duplicate_values() {
        let mut lookup = Lookup::new();
        assert!(lookup.add(1, 'a'));
        assert!(lookup.add(1, 'a'));
        assert!(lookup.add(2, 'b'));

        assert_eq!(lookup.len(), 2);
        assert_eq!(lookup.get(&1), Some(&['a', 'a'][..]));
        assert_eq!(lookup.get(&3), None);
    }

    #[test]
    fn test_lookup_remove_retains_emptied_key() {
        let mut lookup = Lookup::new();
        lookup.add("k", 1);
        lookup.add("k", 2);
        lookup.add("k", 1);

        assert!(lookup.remove(&"k", &1));
        assert_eq!(lookup.get(&"k"), Some(&[2, 1][..]));
        assert!(lookup.remove(&"k", &2));
        assert!(lookup.remove(&"k", &1));
        assert!(!lookup.remove(&"k", &1));
        assert!(!lookup.remove(&"missing", &1));

        assert!(lookup.contains_key(&"k"));
        assert_eq!(lookup.get(&"k"), Some(&[][..]));
        assert_eq!(lookup.len(), 1);
    }

    #[test]
    fn test_lookup_remove_all_and_insert() {
        let mut lookup = Lookup::new();
        lookup.add(1, 10);
        assert_eq!(lookup.insert(1, vec![7, 8]), Some(vec![10]));
        assert_eq!(lookup.insert(2, vec![9]), None);
        assert_eq!(lookup.get(&1), Some(&[7, 8][..]));

        if let Some(values) = lookup.get_mut(&2) {
            values.push(9);
        }
        assert_eq!(lookup.get(&2), Some(&[9, 9][..]));

        assert!(lookup.remove_all(&1));
        assert!(!lookup.remove_all(&1));
        assert_eq!(lookup.len(), 1);
        assert_eq!(lookup.iter().count(), 1);
        assert_eq!(lookup.keys().copied().collect::<Vec<_>>(), [2]);
    }

    #[test]
    fn test_lookup_groups_by_key_equality() {
        let mut lookup = Lookup::with_key_equality(CaseInsensitive);
        lookup.add("Fruit".to_string(), "apple");
        lookup.add("FRUIT".to_string(), "pear");
        lookup.add("veg".to_string(), "leek");

        assert_eq!(lookup.len(), 2);
        assert_eq!(lookup.get(&"fruit".to_string()), Some(&["apple", "pear"][..]));
        assert_eq!(
            lookup.keys().filter(|k| k.as_str() == "Fruit").count(),
            1,
            "the first spelling of a key is kept"
        );

        assert!(lookup.remove(&"fRuIt".to_string(), &"apple"));
        assert!(lookup.remove_all(&"VEG".to_string()));
        assert_eq!(lookup.len(), 1);
    }

    #[test]
    fn test_lookup_from_values_with_key_equality() {
        let words = ["Ant", "bee", "ant", "BEE"];
        let lookup = Lookup::from_values_with(words, |w| w.to_string(), CaseInsensitive);

        assert_eq!(lookup.len(), 2);
        assert_eq!(lookup.get(&"ANT".to_string()), Some(&["Ant", "ant"][..]));
    }

    #[test]
    fn test_unique_lookup_rejects_duplicate_values_per_key() {
        let mut lookup = UniqueLookup::new();
        assert!(lookup.add(1, 'a'));
        assert!(!lookup.add(1, 'a'));
        assert!(lookup.add(2, 'a'));
        assert!(lookup.add(1, 'b'));

        assert_eq!(lookup.len(), 2);
        assert_eq!(lookup.get(&1).map(|s| s.as_slice()), Some(&['a', 'b'][..]));
    }

    #[test]
    fn test_unique_lookup_clones_value_equality_per_key() {
        let mut lookup: UniqueLookup<u8, String, DefaultEquality, CaseInsensitive> =
            UniqueLookup::with_equality(CaseInsensitive);
        assert!(lookup.add(1, "Hello".to_string()));
        assert!(!lookup.add(1, "HELLO".to_string()));
        assert!(lookup.add(2, "hello".to_string()));

        let first = lookup.get(&1).map(|s| s.as_slice().to_vec());
        assert_eq!(first, Some(vec!["Hello".to_string()]));
    }

    #[test]
    fn test_unique_lookup_key_and_value_equalities() {
        let mut lookup = UniqueLookup::with_equalities(CaseInsensitive, CaseInsensitive);
        assert!(lookup.add("Tea".to_string(), "Green".to_string()));
        assert!(!lookup.add("TEA".to_string(), "green".to_string()));
        assert!(lookup.add("tea".to_string(), "black".to_string()));

        assert_eq!(lookup.len(), 1);
        assert!(lookup.contains_key(&"tEa".to_string()));
        let teas = lookup.get(&"TEA".to_string()).map(|s| s.as_slice().to_vec());
        assert_eq!(teas, Some(vec!["Green".to_string(), "black".to_string()]));
    }

    #[test]
    fn test_unique_lookup_remove_retains_emptied_key() {
        let mut lookup = UniqueLookup::new();
        lookup.add("k", 1);
        lookup.add("k", 2);

        assert!(lookup.remove(&"k", &1));
        assert!(!lookup.remove(&"k", &1));
        assert!(lookup.remove(&"k", &2));
        assert!(lookup.contains_key(&"k"));
        assert!(lookup.get(&"k").is_some_and(|s| s.is_empty()));

        assert!(lookup.remove_all(&"k"));
        assert!(lookup.is_empty());
    }

    #[test]
    fn test_unique_lookup_from_values_groups_in_order() {
        let lookup = UniqueLookup::from_values([5, 15, 25, 5, 6], |v| v % 10);
        assert_eq!(lookup.get(&5).map(|s| s.as_slice()), Some(&[5, 15, 25][..]));
        assert_eq!(lookup.get(&6).map(|s| s.as_slice()), Some(&[6][..]));
    }
}

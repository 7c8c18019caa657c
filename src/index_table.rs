//! The open-addressing index behind [`OrderedHashSet`].
//!
//! An [`IndexTable`] does not store values. Each slot records either nothing
//! ([`Slot::Free`]), a tombstone ([`Slot::Deleted`]), or the position of a
//! value in some external, insertion-ordered array ([`Slot::Occupied`]).
//! Callers supply the hash of the value they are looking for and a predicate
//! over positions, in the same spirit as a raw hash table API.
//!
//! Probing is linear with wraparound starting at `hash % len`. Free slots end
//! a probe; tombstones are skipped but remembered so insertions can reuse
//! them.
//!
//! [`OrderedHashSet`]: crate::OrderedHashSet

use alloc::boxed::Box;
use alloc::vec;
use core::fmt::Debug;

/// A single entry of the index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slot {
    /// Never used since the last rebuild. Terminates a probe.
    Free,
    /// Held a value that was removed. Probes continue past it.
    Deleted,
    /// Holds the position of a live value.
    Occupied(usize),
}

/// The outcome of [`IndexTable::probe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Probe {
    /// A slot whose position satisfied the predicate.
    Found {
        /// The slot holding the position.
        slot: usize,
        /// The matching position.
        position: usize,
    },
    /// No match. `slot` is where the value should be placed: the first
    /// tombstone seen on the way, or the free slot that ended the probe.
    Vacant {
        /// The slot to claim on insertion.
        slot: usize,
    },
}

/// A fixed-size array of [`Slot`]s addressed by hash.
///
/// The table never grows by itself; owners rebuild it with
/// [`IndexTable::rebuild`] when they need more room.
///
/// # Example
///
/// ```rust
/// use ordered_sets::index_table::IndexTable;
/// use ordered_sets::index_table::Probe;
///
/// let values = ["a", "b"];
/// let hashes = [3u64, 10u64];
///
/// let mut table = IndexTable::with_len(7);
/// for (position, hash) in hashes.iter().enumerate() {
///     match table.probe(*hash, |_| false) {
///         Probe::Vacant { slot } => table.occupy(slot, position),
///         Probe::Found { .. } => unreachable!(),
///     }
/// }
///
/// // 3 and 10 share home slot 3, so "b" landed one step further.
/// assert_eq!(
///     table.probe(10, |p| values[p] == "b"),
///     Probe::Found { slot: 4, position: 1 }
/// );
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct IndexTable {
    slots: Box<[Slot]>,
    occupied: usize,
    tombstones: usize,
}

impl Debug for IndexTable {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("IndexTable")
            .field("len", &self.slots.len())
            .field("occupied", &self.occupied)
            .field("tombstones", &self.tombstones)
            .finish()
    }
}

impl IndexTable {
    /// Creates a table of `len` free slots.
    ///
    /// # Panics
    ///
    /// Panics if `len` is zero.
    pub fn with_len(len: usize) -> Self {
        assert!(len > 0, "an index table needs at least one slot");
        Self {
            slots: vec![Slot::Free; len].into_boxed_slice(),
            occupied: 0,
            tombstones: 0,
        }
    }

    /// Returns the number of slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Always `false`: a table has at least one slot.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the number of [`Slot::Occupied`] slots.
    #[inline]
    pub fn occupied(&self) -> usize {
        self.occupied
    }

    /// Returns the number of [`Slot::Deleted`] slots.
    #[inline]
    pub fn tombstones(&self) -> usize {
        self.tombstones
    }

    /// Returns the number of [`Slot::Free`] slots.
    #[inline]
    pub fn free(&self) -> usize {
        self.slots.len() - self.occupied - self.tombstones
    }

    /// Returns the slot at `index`.
    #[inline]
    pub fn slot(&self, index: usize) -> Slot {
        self.slots[index]
    }

    /// Returns all slots in table order.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Returns the slot a probe for `hash` starts at.
    #[inline(always)]
    pub fn home(&self, hash: u64) -> usize {
        (hash % self.slots.len() as u64) as usize
    }

    /// Walks the probe sequence of `hash` until `matches` accepts an occupied
    /// position or a free slot is reached.
    ///
    /// # Panics
    ///
    /// Panics if the table has no free slot and no match, which owners rule
    /// out by purging tombstones before the last free slot is consumed.
    pub fn probe(&self, hash: u64, mut matches: impl FnMut(usize) -> bool) -> Probe {
        let len = self.slots.len();
        let mut slot = self.home(hash);
        let mut first_deleted = None;

        for _ in 0..len {
            match self.slots[slot] {
                Slot::Free => {
                    return Probe::Vacant {
                        slot: first_deleted.unwrap_or(slot),
                    };
                }
                Slot::Deleted => {
                    if first_deleted.is_none() {
                        first_deleted = Some(slot);
                    }
                }
                Slot::Occupied(position) => {
                    if matches(position) {
                        return Probe::Found { slot, position };
                    }
                }
            }

            slot += 1;
            if slot == len {
                slot = 0;
            }
        }

        match first_deleted {
            Some(slot) => Probe::Vacant { slot },
            None => unreachable!("index table of {len} slots has no free slot"),
        }
    }

    /// Marks `slot` as holding `position`.
    ///
    /// `slot` must not already be occupied.
    #[inline]
    pub fn occupy(&mut self, slot: usize, position: usize) {
        match self.slots[slot] {
            Slot::Free => {}
            Slot::Deleted => self.tombstones -= 1,
            Slot::Occupied(other) => {
                debug_assert!(false, "slot {slot} already holds position {other}");
                self.occupied -= 1;
            }
        }
        self.slots[slot] = Slot::Occupied(position);
        self.occupied += 1;
    }

    /// Turns an occupied `slot` into a tombstone.
    #[inline]
    pub fn release(&mut self, slot: usize) {
        debug_assert!(
            matches!(self.slots[slot], Slot::Occupied(_)),
            "released slot {slot} is not occupied"
        );
        self.slots[slot] = Slot::Deleted;
        self.occupied -= 1;
        self.tombstones += 1;
    }

    /// Decrements every stored position greater than `removed`.
    ///
    /// Called after the owner shifted its value array down by one at
    /// `removed`. Visits every slot.
    pub fn shift_down_after(&mut self, removed: usize) {
        for slot in self.slots.iter_mut() {
            if let Slot::Occupied(position) = slot {
                if *position > removed {
                    *position -= 1;
                }
            }
        }
    }

    /// Replaces the table with `len` free slots and re-inserts positions
    /// `0..hashes.len()` in order, using the stored hashes.
    ///
    /// Replay order equals array order, so the result does not depend on the
    /// previous layout.
    ///
    /// # Panics
    ///
    /// Panics if `len` is not larger than the number of hashes.
    pub fn rebuild(&mut self, len: usize, hashes: &[u64]) {
        assert!(
            len > hashes.len(),
            "index table of {len} slots cannot index {} values",
            hashes.len()
        );
        *self = Self::with_len(len);
        for (position, &hash) in hashes.iter().enumerate() {
            self.place(hash, position);
        }
    }

    /// Resets every slot to [`Slot::Free`].
    pub fn clear(&mut self) {
        self.slots.fill(Slot::Free);
        self.occupied = 0;
        self.tombstones = 0;
    }

    /// Puts `position` into the first non-occupied slot of `hash`'s probe
    /// sequence. No equality checks: the caller knows the value is new.
    fn place(&mut self, hash: u64, position: usize) {
        let len = self.slots.len();
        let first = self.home(hash);
        let mut slot = first;
        loop {
            if !matches!(self.slots[slot], Slot::Occupied(_)) {
                self.occupy(slot, position);
                return;
            }

            slot += 1;
            if slot == len {
                slot = 0;
            }

            if slot == first {
                unreachable!("all {len} slots are full after resizing");
            }
        }
    }

    /// Returns how far each occupied slot sits from its home slot, indexed by
    /// distance.
    #[cfg(feature = "stats")]
    pub(crate) fn displacements(&self, hashes: &[u64]) -> alloc::vec::Vec<usize> {
        let len = self.slots.len();
        let mut histogram = alloc::vec::Vec::new();
        for (slot, entry) in self.slots.iter().enumerate() {
            if let Slot::Occupied(position) = *entry {
                let home = self.home(hashes[position]);
                let distance = (slot + len - home) % len;
                if histogram.len() <= distance {
                    histogram.resize(distance + 1, 0);
                }
                histogram[distance] += 1;
            }
        }
        histogram
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    fn insert(table: &mut IndexTable, hashes: &mut Vec<u64>, hash: u64) -> usize {
        let position = hashes.len();
        match table.probe(hash, |p| hashes[p] == hash) {
            Probe::Vacant { slot } => {
                table.occupy(slot, position);
                hashes.push(hash);
                slot
            }
            Probe::Found { .. } => panic!("{hash} already present in {table:?}"),
        }
    }

    #[test]
    fn test_new_table_is_free() {
        let table = IndexTable::with_len(5);
        assert_eq!(table.len(), 5);
        assert_eq!(table.free(), 5);
        assert!(table.slots().iter().all(|s| *s == Slot::Free));
        assert_eq!(table.probe(12, |_| true), Probe::Vacant { slot: 2 });
    }

    #[test]
    fn test_collisions_probe_linearly_with_wraparound() {
        let mut table = IndexTable::with_len(4);
        let mut hashes = Vec::new();

        assert_eq!(insert(&mut table, &mut hashes, 3), 3);
        assert_eq!(insert(&mut table, &mut hashes, 7), 0);
        assert_eq!(insert(&mut table, &mut hashes, 11), 1);

        assert_eq!(
            table.probe(11, |p| hashes[p] == 11),
            Probe::Found { slot: 1, position: 2 }
        );
        assert_eq!(table.probe(15, |p| hashes[p] == 15), Probe::Vacant { slot: 2 });
    }

    #[test]
    fn test_tombstones_continue_probes_and_are_reused() {
        let mut table = IndexTable::with_len(7);
        let mut hashes = Vec::new();
        insert(&mut table, &mut hashes, 3);
        insert(&mut table, &mut hashes, 10);

        table.release(3);
        assert_eq!(table.tombstones(), 1);
        assert_eq!(table.slot(3), Slot::Deleted);

        // 10 is still reachable past the tombstone.
        assert_eq!(
            table.probe(10, |p| hashes[p] == 10),
            Probe::Found { slot: 4, position: 1 }
        );
        // A new colliding hash reuses the tombstone.
        assert_eq!(table.probe(17, |_| false), Probe::Vacant { slot: 3 });
        table.occupy(3, 2);
        assert_eq!(table.tombstones(), 0);
        assert_eq!(table.occupied(), 2);
    }

    #[test]
    fn test_all_tombstones_still_yield_a_vacancy() {
        let mut table = IndexTable::with_len(2);
        table.occupy(0, 0);
        table.occupy(1, 1);
        table.release(0);
        table.release(1);
        assert_eq!(table.free(), 0);
        assert_eq!(table.probe(1, |_| false), Probe::Vacant { slot: 1 });
    }

    #[test]
    fn test_shift_down_after_only_touches_later_positions() {
        let mut table = IndexTable::with_len(8);
        for position in 0..5 {
            table.occupy(position, position);
        }
        table.release(2);
        table.shift_down_after(2);

        assert_eq!(table.slot(0), Slot::Occupied(0));
        assert_eq!(table.slot(1), Slot::Occupied(1));
        assert_eq!(table.slot(2), Slot::Deleted);
        assert_eq!(table.slot(3), Slot::Occupied(2));
        assert_eq!(table.slot(4), Slot::Occupied(3));
    }

    #[test]
    fn test_rebuild_replays_in_position_order() {
        let hashes = [5u64, 12, 19, 1];
        let mut table = IndexTable::with_len(4);
        table.rebuild(8, &hashes);

        assert_eq!(table.len(), 8);
        assert_eq!(table.occupied(), 4);
        assert_eq!(table.tombstones(), 0);
        for (position, hash) in hashes.iter().enumerate() {
            match table.probe(*hash, |p| p == position) {
                Probe::Found { position: found, .. } => assert_eq!(found, position),
                Probe::Vacant { .. } => panic!("lost position {position}: {table:?}"),
            }
        }
    }

    #[test]
    #[should_panic]
    fn test_rebuild_rejects_a_table_without_headroom() {
        let mut table = IndexTable::with_len(4);
        table.rebuild(3, &[1, 2, 3]);
    }

    #[test]
    fn test_clear_resets_counts() {
        let mut table = IndexTable::with_len(3);
        table.occupy(0, 0);
        table.occupy(1, 1);
        table.release(1);
        table.clear();
        assert_eq!(table.free(), 3);
        assert_eq!(table.occupied(), 0);
        assert_eq!(table.tombstones(), 0);
    }
}

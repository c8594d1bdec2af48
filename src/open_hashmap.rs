//! Open addressing hash map with quadratic probing over a prime-sized table.

use std::{fmt, marker::PhantomData, mem};

use crate::{
    hashing::{self, HashFn},
    prime,
};

/// Initial capacity used by [`OpenHashMap::new`], before prime rounding.
const DEFAULT_CAPACITY: usize = 53;

/// A live key-value pair stored in one slot.
#[derive(Debug, Clone)]
struct Entry<V> {
    /// The entry's key
    key: String,
    /// The value associated with the key
    value: V,
}

/// One slot of the backing table.
///
/// A removed entry leaves a [`Slot::Tombstone`] behind rather than going
/// back to [`Slot::Empty`]: probe sequences for other keys may pass through
/// this slot, and an empty slot would cut them short.
#[derive(Debug, Clone)]
enum Slot<V> {
    /// Never occupied; terminates every probe sequence
    Empty,
    /// Holds a live entry
    Occupied(Entry<V>),
    /// Held an entry that was removed; lookups probe past it, inserts may
    /// reclaim it
    Tombstone(Entry<V>),
}

/// A hash map resolving collisions by open addressing with quadratic
/// probing.
///
/// The table capacity is always prime and the load factor is kept at or
/// below 0.5 going into every insert, which together guarantee the probe
/// sequence `(base + i²) mod capacity` reaches a free slot.
///
/// Keys are `String`s; values are any `V`.
#[derive(Debug, Clone)]
pub struct OpenHashMap<V> {
    /// The backing table of slots
    slots: Vec<Slot<V>>,
    /// Current number of live (non-tombstoned) entries
    size: usize,
    /// Hash function mapping a key to a slot base index
    hash: HashFn,
}

impl<V> Default for OpenHashMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Extend<(String, V)> for OpenHashMap<V> {
    fn extend<T: IntoIterator<Item = (String, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<V> OpenHashMap<V> {
    /// Creates a map with the default initial capacity and hash function.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a map with the given initial capacity, rounded up to the
    /// next prime, hashing with [`hashing::hash_first`].
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_hasher(capacity, hashing::hash_first)
    }

    /// Creates a map with the given initial capacity, rounded up to the
    /// next prime, and the given hash function.
    #[must_use]
    pub fn with_hasher(capacity: usize, hash: HashFn) -> Self {
        Self { slots: Self::empty_slots(prime::next_prime(capacity)), size: 0, hash }
    }

    /// Allocates a table of `capacity` empty slots.
    fn empty_slots(capacity: usize) -> Vec<Slot<V>> {
        (0..capacity).map(|_| Slot::Empty).collect()
    }

    /// Computes the base slot index for a key under the current capacity.
    #[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
    fn index_for(&self, key: &str) -> usize {
        // Capacity is never zero: every table comes from `next_prime`.
        ((self.hash)(key) % self.slots.len() as u64) as usize
    }

    /// Computes the `count`-th quadratic probe position from `base`.
    #[allow(clippy::arithmetic_side_effects)]
    fn probe(base: usize, count: usize, capacity: usize) -> usize {
        base.saturating_add(count.saturating_mul(count)) % capacity
    }

    /// Inserts a key-value pair, returning the previous value if the key
    /// was already present.
    ///
    /// When the table load is at or above 0.5 the table first doubles its
    /// capacity (rounded up to a prime). The probe walks past live entries
    /// with other keys and stops at the first empty slot, tombstone, or
    /// live entry with the same key; a tombstone slot is reclaimed by the
    /// new entry.
    pub fn put(&mut self, key: String, value: V) -> Option<V> {
        if self.table_load() >= 0.5 {
            self.resize(self.slots.len().saturating_mul(2));
        }

        let capacity = self.slots.len();
        let base = self.index_for(&key);

        for count in 0..capacity {
            let index = Self::probe(base, count, capacity);
            let Some(slot) = self.slots.get_mut(index) else { return None };
            match slot {
                Slot::Occupied(entry) if entry.key == key => {
                    return Some(mem::replace(&mut entry.value, value));
                }
                Slot::Occupied(_) => {}
                Slot::Empty | Slot::Tombstone(_) => {
                    *slot = Slot::Occupied(Entry { key, value });
                    self.size = self.size.saturating_add(1);
                    return None;
                }
            }
        }

        // With load factor at most 0.5 and a prime capacity the probe
        // always terminates well before `capacity` steps.
        None
    }

    /// Returns a reference to the value stored under the given key.
    ///
    /// The probe continues past tombstones and stops at the first empty
    /// slot, so entries displaced beyond removed ones stay reachable.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        let capacity = self.slots.len();
        let base = self.index_for(key);

        for count in 0..capacity {
            let index = Self::probe(base, count, capacity);
            match self.slots.get(index) {
                None | Some(Slot::Empty) => return None,
                Some(Slot::Occupied(entry)) if entry.key == key => {
                    return Some(&entry.value);
                }
                Some(Slot::Occupied(_) | Slot::Tombstone(_)) => {}
            }
        }

        None
    }

    /// Finds the slot index of the live entry for a key, probing exactly
    /// as `get` does.
    fn find_live(&self, key: &str) -> Option<usize> {
        let capacity = self.slots.len();
        let base = self.index_for(key);

        for count in 0..capacity {
            let index = Self::probe(base, count, capacity);
            match self.slots.get(index) {
                None | Some(Slot::Empty) => return None,
                Some(Slot::Occupied(entry)) if entry.key == key => {
                    return Some(index);
                }
                Some(Slot::Occupied(_) | Slot::Tombstone(_)) => {}
            }
        }

        None
    }

    /// Returns a mutable reference to the value stored under the given key.
    ///
    /// The slot is located with an immutable probe first, so only one
    /// mutable borrow of the table is ever taken.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let index = self.find_live(key)?;
        if let Some(Slot::Occupied(entry)) = self.slots.get_mut(index) {
            return Some(&mut entry.value);
        }
        None
    }

    /// Returns true if the map holds a live entry for the given key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        if self.size == 0 {
            return false;
        }
        self.get(key).is_some()
    }

    /// Removes the entry for the given key, leaving a tombstone in its
    /// slot. Returns whether an entry was removed.
    pub fn remove(&mut self, key: &str) -> bool {
        let capacity = self.slots.len();
        let base = self.index_for(key);

        for count in 0..capacity {
            let index = Self::probe(base, count, capacity);
            let Some(slot) = self.slots.get_mut(index) else { return false };
            match slot {
                Slot::Empty => return false,
                Slot::Occupied(entry) if entry.key == key => {
                    if let Slot::Occupied(entry) = mem::replace(slot, Slot::Empty) {
                        *slot = Slot::Tombstone(entry);
                    }
                    self.size = self.size.saturating_sub(1);
                    return true;
                }
                Slot::Occupied(_) | Slot::Tombstone(_) => {}
            }
        }

        false
    }

    /// Rebuilds the table at the given capacity, rounded up to a prime if
    /// not already prime.
    ///
    /// A target below the current number of live entries is silently
    /// ignored. Shrinking below the current capacity is allowed as long as
    /// the live entries still fit; the re-insertion pass may then double
    /// the table again on its own once the load crosses the threshold.
    /// Tombstones are dropped, not carried over.
    pub fn resize(&mut self, new_capacity: usize) {
        if new_capacity < self.size {
            return;
        }

        let new_capacity = if prime::is_prime(new_capacity) {
            new_capacity
        } else {
            prime::next_prime(new_capacity)
        };

        // Re-inserting through `put` re-derives every probe position under
        // the new capacity.
        let old_slots = mem::replace(&mut self.slots, Self::empty_slots(new_capacity));
        self.size = 0;
        for slot in old_slots {
            if let Slot::Occupied(entry) = slot {
                self.put(entry.key, entry.value);
            }
        }
    }

    /// Returns the current load factor, live entries over capacity.
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn table_load(&self) -> f64 {
        self.size as f64 / self.slots.len() as f64
    }

    /// Returns the number of slots holding no live entry, counting both
    /// empty and tombstoned slots.
    #[must_use]
    pub fn empty_buckets(&self) -> usize {
        self.slots.iter().filter(|slot| !matches!(slot, Slot::Occupied(_))).count()
    }

    /// Returns all live key-value pairs in slot order.
    #[must_use]
    pub fn keys_and_values(&self) -> Vec<(String, V)>
    where
        V: Clone,
    {
        self.iter().map(|(key, value)| (key.to_string(), value.clone())).collect()
    }

    /// Removes every entry, keeping the current capacity.
    pub fn clear(&mut self) {
        let capacity = self.slots.len();
        self.slots = Self::empty_slots(capacity);
        self.size = 0;
    }

    /// Returns the number of live entries in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the map holds no live entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the current table capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns an iterator over the live entries in ascending slot order.
    ///
    /// The iterator owns its cursor, so several can run over the same map
    /// at once.
    #[must_use]
    #[allow(clippy::iter_without_into_iter)]
    pub fn iter(&self) -> OpenIter<'_, V> {
        OpenIter { slots: &self.slots, index: 0, _marker: PhantomData }
    }
}

impl<V: fmt::Display> fmt::Display for OpenHashMap<V> {
    /// Renders one line per slot index for debugging.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, slot) in self.slots.iter().enumerate() {
            match slot {
                Slot::Empty => writeln!(f, "{index}: <empty>")?,
                Slot::Occupied(entry) => {
                    writeln!(f, "{index}: {} -> {}", entry.key, entry.value)?;
                }
                Slot::Tombstone(entry) => {
                    writeln!(f, "{index}: {} -> {} <tombstone>", entry.key, entry.value)?;
                }
            }
        }
        Ok(())
    }
}

/// Iterator over the live entries of an [`OpenHashMap`] in slot order.
#[derive(Debug, Clone)]
pub struct OpenIter<'a, V> {
    /// The slots being walked
    slots: &'a [Slot<V>],
    /// Index of the next slot to inspect
    index: usize,
    /// Phantom data to hold the lifetime and value type
    _marker: PhantomData<&'a V>,
}

impl<'a, V> Iterator for OpenIter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(slot) = self.slots.get(self.index) {
            self.index = self.index.saturating_add(1);
            if let Slot::Occupied(entry) = slot {
                return Some((entry.key.as_str(), &entry.value));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_put_and_get() {
        let mut map = OpenHashMap::new();
        assert_eq!(map.put("key1".to_string(), 1), None);
        assert_eq!(map.put("key2".to_string(), 2), None);
        assert_eq!(map.put("key3".to_string(), 3), None);

        assert_eq!(map.get("key1"), Some(&1));
        assert_eq!(map.get("key2"), Some(&2));
        assert_eq!(map.get("key3"), Some(&3));
        assert_eq!(map.get("key4"), None);
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_put_overwrites_in_place() {
        let mut map = OpenHashMap::new();
        assert_eq!(map.put("key1".to_string(), 1), None);
        assert_eq!(map.put("key1".to_string(), 10), Some(1));
        assert_eq!(map.get("key1"), Some(&10));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_capacity_rounds_to_prime() {
        let map: OpenHashMap<i32> = OpenHashMap::with_capacity(20);
        assert_eq!(map.capacity(), 23);

        let map: OpenHashMap<i32> = OpenHashMap::with_capacity(101);
        assert_eq!(map.capacity(), 101);
    }

    #[test]
    fn test_remove_leaves_tombstone() {
        let mut map = OpenHashMap::new();
        map.put("key1".to_string(), 1);
        map.put("key2".to_string(), 2);

        assert!(map.remove("key1"));
        assert_eq!(map.get("key1"), None);
        assert!(!map.contains_key("key1"));
        assert_eq!(map.get("key2"), Some(&2));
        assert_eq!(map.len(), 1);

        // Removing again is a no-op.
        assert!(!map.remove("key1"));
        assert_eq!(map.len(), 1);

        // The slot is not live, so it counts as empty.
        assert_eq!(map.empty_buckets(), map.capacity().saturating_sub(1));
    }

    #[test]
    fn test_probe_past_tombstone() {
        // Two keys whose character sums are congruent mod 53 share a base
        // slot, so the second is displaced by probing.
        let mut map = OpenHashMap::with_capacity(53);
        let a = "\u{35}".to_string(); // '5' = 53
        let b = "\u{6a}".to_string(); // 'j' = 106
        assert_eq!(map.index_for(&a), map.index_for(&b));

        map.put(a.clone(), 1);
        map.put(b.clone(), 2);
        assert!(map.remove(&a));

        // `b` was displaced past `a`'s slot; the tombstone keeps it
        // reachable.
        assert_eq!(map.get(&b), Some(&2));
    }

    #[test]
    fn test_get_mut() {
        let mut map = OpenHashMap::with_capacity(53);
        let a = "\u{35}".to_string(); // '5' = 53
        let b = "\u{6a}".to_string(); // 'j' = 106
        map.put(a.clone(), 1);
        map.put(b.clone(), 2);
        map.remove(&a);

        // Reaching `b` walks the probe chain through `a`'s tombstone.
        if let Some(value) = map.get_mut(&b) {
            *value += 10;
        }
        assert_eq!(map.get(&b), Some(&12));
        assert_eq!(map.get_mut("missing"), None);
    }

    #[test]
    fn test_reinsert_reclaims_tombstone() {
        let mut map = OpenHashMap::with_capacity(11);
        map.put("key1".to_string(), 1);
        let empty_before = map.empty_buckets();

        map.remove("key1");
        map.put("key1".to_string(), 2);

        assert_eq!(map.get("key1"), Some(&2));
        assert_eq!(map.len(), 1);
        assert_eq!(map.empty_buckets(), empty_before);
    }

    #[test]
    fn test_resize_example() {
        let mut map = OpenHashMap::with_capacity(20);
        map.put("key1".to_string(), 10);
        assert_eq!(map.len(), 1);
        assert_eq!(map.capacity(), 23);
        assert_eq!(map.get("key1"), Some(&10));

        map.resize(30);
        assert_eq!(map.capacity(), 31);
        assert_eq!(map.get("key1"), Some(&10));
        assert!(map.contains_key("key1"));
    }

    #[test]
    fn test_resize_refuses_below_size() {
        let mut map = OpenHashMap::with_capacity(23);
        for i in 0..10 {
            map.put(format!("key{i}"), i);
        }
        map.resize(5);
        assert_eq!(map.capacity(), 23);
        assert_eq!(map.len(), 10);
    }

    #[test]
    fn test_resize_shrinks_on_demand() {
        let mut map = OpenHashMap::with_capacity(101);
        for i in 0..5 {
            map.put(format!("key{i}"), i);
        }

        map.resize(11);
        assert_eq!(map.capacity(), 11);
        assert_eq!(map.len(), 5);
        for i in 0..5 {
            assert_eq!(map.get(&format!("key{i}")), Some(&i));
        }
    }

    #[test]
    fn test_resize_drops_tombstones() {
        let mut map = OpenHashMap::with_capacity(23);
        for i in 0..8 {
            map.put(format!("key{i}"), i);
        }
        for i in 0..4 {
            map.remove(&format!("key{i}"));
        }
        assert!(map.empty_buckets() > map.capacity().saturating_sub(8));

        map.resize(23);
        assert_eq!(map.len(), 4);
        assert_eq!(map.empty_buckets(), map.capacity().saturating_sub(4));
        for i in 4..8 {
            assert_eq!(map.get(&format!("key{i}")), Some(&i));
        }
    }

    #[test]
    fn test_growth_under_many_inserts() {
        let mut map = OpenHashMap::with_capacity(53);
        for i in 0..150_i32 {
            map.put(format!("str{i}"), i.saturating_mul(100));
        }

        assert_eq!(map.len(), 150);
        assert!(map.table_load() <= 0.5);
        assert!(crate::prime::is_prime(map.capacity()));
        for i in 0..150_i32 {
            assert_eq!(map.get(&format!("str{i}")), Some(&i.saturating_mul(100)));
        }
    }

    #[test]
    fn test_workload_under_hash_second() {
        // 50 inserts over 17 distinct keys, each overwritten by its later
        // occurrences.
        let mut map = OpenHashMap::with_hasher(41, hashing::hash_second);
        assert_eq!(map.capacity(), 41);
        for i in 0..50_u32 {
            map.put(format!("str{}", i / 3), i.saturating_mul(100));
        }

        assert_eq!(map.len(), 17);
        for i in 0..17_u32 {
            assert!(map.contains_key(&format!("str{i}")));
        }
        // Last write for "str5" is i = 17.
        assert_eq!(map.get("str5"), Some(&1700));

        assert!(map.remove("str0"));
        assert!(!map.contains_key("str0"));
        assert_eq!(map.len(), 16);
    }

    #[test]
    fn test_keys_and_values_membership() {
        let mut map = OpenHashMap::with_capacity(11);
        for i in 0..6 {
            map.put(format!("key{i}"), i);
        }

        let mut pairs = map.keys_and_values();
        pairs.sort();
        let expected: Vec<(String, i32)> = (0..6).map(|i| (format!("key{i}"), i)).collect();
        assert_eq!(pairs, expected);
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut map = OpenHashMap::with_capacity(53);
        map.put("key1".to_string(), 1);
        map.put("key2".to_string(), 2);
        map.clear();

        assert_eq!(map.len(), 0);
        assert!(map.is_empty());
        assert_eq!(map.capacity(), 53);
        assert_eq!(map.get("key1"), None);
    }

    #[test]
    fn test_detached_iterators() {
        let mut map = OpenHashMap::with_capacity(11);
        map.put("a".to_string(), 1);
        map.put("b".to_string(), 2);
        map.remove("a");

        // Two live iterators over the same map.
        let first: Vec<_> = map.iter().collect();
        let second: Vec<_> = map.iter().collect();
        assert_eq!(first, vec![("b", &2)]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_extend() {
        let mut map = OpenHashMap::with_capacity(11);
        map.extend((0..4).map(|i| (format!("key{i}"), i)));
        assert_eq!(map.len(), 4);
        assert_eq!(map.get("key2"), Some(&2));
    }

    #[test]
    fn test_display_lists_every_slot() {
        let mut map = OpenHashMap::with_capacity(5);
        map.put("a".to_string(), 1);
        let rendered = format!("{map}");
        assert_eq!(rendered.lines().count(), map.capacity());
        assert!(rendered.contains("a -> 1"));
    }

    proptest! {
        #[test]
        fn prop_put_get_roundtrip(
            entries in proptest::collection::hash_map("[a-z]{1,8}", any::<i32>(), 0..60),
        ) {
            let mut map = OpenHashMap::with_capacity(11);
            for (key, value) in &entries {
                map.put(key.clone(), *value);
            }

            prop_assert_eq!(map.len(), entries.len());
            for (key, value) in &entries {
                prop_assert_eq!(map.get(key), Some(value));
            }
        }

        #[test]
        fn prop_load_stays_bounded(keys in proptest::collection::vec("[a-z]{1,6}", 1..120)) {
            let mut map = OpenHashMap::with_capacity(11);
            for key in keys {
                map.put(key, 0_u8);
                // One insert past the pre-insert threshold is the worst case.
                prop_assert!(map.table_load() <= 0.5 + 1.0 / map.capacity() as f64);
                prop_assert!(crate::prime::is_prime(map.capacity()));
            }
        }

        #[test]
        fn prop_remove_is_idempotent(
            keys in proptest::collection::vec("[a-z]{1,6}", 1..40),
            victim in "[a-z]{1,6}",
        ) {
            let mut map = OpenHashMap::with_capacity(23);
            for key in &keys {
                map.put(key.clone(), 0_u8);
            }
            let had_victim = map.contains_key(&victim);
            let before = map.len();

            prop_assert_eq!(map.remove(&victim), had_victim);
            prop_assert!(!map.remove(&victim));
            prop_assert_eq!(map.len(), before.saturating_sub(usize::from(had_victim)));
        }

        #[test]
        fn prop_resize_preserves_entries(
            entries in proptest::collection::hash_map("[a-z]{1,6}", any::<u16>(), 0..40),
            target in 0_usize..200,
        ) {
            let mut map = OpenHashMap::with_capacity(11);
            for (key, value) in &entries {
                map.put(key.clone(), *value);
            }

            map.resize(target);
            prop_assert_eq!(map.len(), entries.len());
            for (key, value) in &entries {
                prop_assert_eq!(map.get(key), Some(value));
            }
        }
    }
}

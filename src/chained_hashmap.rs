//! Separate chaining hash map over a prime-sized table of linked lists.

use std::{fmt, mem, slice};

use crate::{
    chain::{Chain, ChainIter},
    hashing::{self, HashFn},
    prime,
};

/// Initial capacity used by [`ChainedHashMap::new`], before prime rounding.
const DEFAULT_CAPACITY: usize = 11;

/// A hash map resolving collisions by separate chaining.
///
/// Every bucket is an independent [`Chain`]; a lookup touches exactly one
/// bucket. The table capacity is always prime, and the table doubles once
/// the load factor reaches 1.0 going into an insert.
///
/// Keys are `String`s; values are any `V`.
#[derive(Debug, Clone)]
pub struct ChainedHashMap<V> {
    /// The backing table of bucket chains
    buckets: Vec<Chain<V>>,
    /// Current number of entries across all buckets
    size: usize,
    /// Hash function mapping a key to a bucket index
    hash: HashFn,
}

impl<V> Default for ChainedHashMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Extend<(String, V)> for ChainedHashMap<V> {
    fn extend<T: IntoIterator<Item = (String, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<V> ChainedHashMap<V> {
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
        Self { buckets: Self::empty_buckets_vec(prime::next_prime(capacity)), size: 0, hash }
    }

    /// Allocates a table of `capacity` empty chains.
    fn empty_buckets_vec(capacity: usize) -> Vec<Chain<V>> {
        (0..capacity).map(|_| Chain::new()).collect()
    }

    /// Computes the bucket index for a key under the current capacity.
    #[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
    fn index_for(&self, key: &str) -> usize {
        // Capacity is never zero: every table comes from `next_prime`.
        ((self.hash)(key) % self.buckets.len() as u64) as usize
    }

    /// Inserts a key-value pair, returning the previous value if the key
    /// was already present in its bucket.
    ///
    /// When the table load reaches 1.0 the table first doubles its
    /// capacity (rounded up to a prime). A new key goes to the front of
    /// its bucket's chain.
    pub fn put(&mut self, key: String, value: V) -> Option<V> {
        if self.table_load() >= 1.0 {
            self.resize(self.buckets.len().saturating_mul(2));
        }

        let index = self.index_for(&key);
        let Some(bucket) = self.buckets.get_mut(index) else { return None };

        if let Some(existing) = bucket.get_mut(&key) {
            return Some(mem::replace(existing, value));
        }

        bucket.insert(key, value);
        self.size = self.size.saturating_add(1);
        None
    }

    /// Returns a reference to the value stored under the given key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        self.buckets.get(self.index_for(key)).and_then(|bucket| bucket.get(key))
    }

    /// Returns a mutable reference to the value stored under the given key.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let index = self.index_for(key);
        self.buckets.get_mut(index).and_then(|bucket| bucket.get_mut(key))
    }

    /// Returns true if the map holds an entry for the given key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.buckets.get(self.index_for(key)).is_some_and(|bucket| bucket.contains(key))
    }

    /// Removes the entry for the given key from its bucket. Returns
    /// whether an entry was removed.
    pub fn remove(&mut self, key: &str) -> bool {
        let index = self.index_for(key);
        let Some(bucket) = self.buckets.get_mut(index) else { return false };

        if bucket.remove(key) {
            self.size = self.size.saturating_sub(1);
            return true;
        }
        false
    }

    /// Rebuilds the table at the given capacity, rounded up to a prime if
    /// not already prime. A target below 1 is silently ignored.
    pub fn resize(&mut self, new_capacity: usize) {
        if new_capacity < 1 {
            return;
        }

        let new_capacity = if prime::is_prime(new_capacity) {
            new_capacity
        } else {
            prime::next_prime(new_capacity)
        };

        // Re-inserting through `put` re-derives every bucket index under
        // the new capacity.
        let old_buckets = mem::replace(&mut self.buckets, Self::empty_buckets_vec(new_capacity));
        self.size = 0;
        for bucket in old_buckets {
            for (key, value) in bucket {
                self.put(key, value);
            }
        }
    }

    /// Returns the current load factor, entries over capacity.
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn table_load(&self) -> f64 {
        self.size as f64 / self.buckets.len() as f64
    }

    /// Returns the number of buckets holding no entries.
    #[must_use]
    pub fn empty_buckets(&self) -> usize {
        self.buckets.iter().filter(|bucket| bucket.is_empty()).count()
    }

    /// Returns all key-value pairs, bucket order first, then each bucket's
    /// chain order.
    #[must_use]
    pub fn keys_and_values(&self) -> Vec<(String, V)>
    where
        V: Clone,
    {
        self.iter().map(|(key, value)| (key.to_string(), value.clone())).collect()
    }

    /// Removes every entry, keeping the current capacity.
    pub fn clear(&mut self) {
        let capacity = self.buckets.len();
        self.buckets = Self::empty_buckets_vec(capacity);
        self.size = 0;
    }

    /// Returns the number of entries in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the map holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the current table capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the bucket chain at the given index, or `None` when the
    /// index is out of range.
    #[must_use]
    pub fn get_bucket(&self, index: usize) -> Option<&Chain<V>> {
        self.buckets.get(index)
    }

    /// Returns an iterator over all entries, bucket order first, then each
    /// bucket's chain order.
    #[must_use]
    #[allow(clippy::iter_without_into_iter)]
    pub fn iter(&self) -> ChainedIter<'_, V> {
        ChainedIter { buckets: self.buckets.iter(), current: None }
    }
}

impl<V: fmt::Display> fmt::Display for ChainedHashMap<V> {
    /// Renders one line per bucket index for debugging.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, bucket) in self.buckets.iter().enumerate() {
            write!(f, "{index}:")?;
            for (key, value) in bucket.iter() {
                write!(f, " {key} -> {value};")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Iterator over the entries of a [`ChainedHashMap`], walking buckets in
/// index order and each bucket front to back.
#[derive(Debug, Clone)]
pub struct ChainedIter<'a, V> {
    /// Remaining buckets to walk
    buckets: slice::Iter<'a, Chain<V>>,
    /// Iterator into the bucket currently being walked
    current: Option<ChainIter<'a, V>>,
}

impl<'a, V> Iterator for ChainedIter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(chain) = &mut self.current {
                if let Some(item) = chain.next() {
                    return Some(item);
                }
            }
            self.current = Some(self.buckets.next()?.iter());
        }
    }
}

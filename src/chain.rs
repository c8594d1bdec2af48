//! Singly linked list used as the per-bucket store in [`ChainedHashMap`].
//!
//! New entries go to the front, so iteration yields most-recently-inserted
//! entries first. Keys are unique within a chain; the owning map checks for
//! an existing key before inserting.
//!
//! [`ChainedHashMap`]: crate::ChainedHashMap

use std::marker::PhantomData;

/// A node in a chain, owning one key-value pair.
#[derive(Debug, Clone)]
struct Node<V> {
    /// The entry's key
    key: String,
    /// The value associated with the key
    value: V,
    /// The rest of the chain
    next: Option<Box<Node<V>>>,
}

/// A singly linked list of key-value entries forming one hash bucket.
#[derive(Debug, Clone)]
pub struct Chain<V> {
    /// First node of the chain, or `None` when the chain is empty
    head: Option<Box<Node<V>>>,
    /// Number of entries in the chain
    len: usize,
}

impl<V> Default for Chain<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Chain<V> {
    /// Creates an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self { head: None, len: 0 }
    }

    /// Inserts a key-value pair at the front of the chain.
    pub fn insert(&mut self, key: String, value: V) {
        self.head = Some(Box::new(Node { key, value, next: self.head.take() }));
        self.len = self.len.saturating_add(1);
    }

    /// Removes the entry with the given key, relinking the chain around it.
    /// Returns whether an entry was removed.
    pub fn remove(&mut self, key: &str) -> bool {
        let mut current = &mut self.head;
        loop {
            match current {
                None => return false,
                Some(node) if node.key == key => {
                    if let Some(removed) = current.take() {
                        *current = removed.next;
                    }
                    self.len = self.len.saturating_sub(1);
                    return true;
                }
                Some(node) => current = &mut node.next,
            }
        }
    }

    /// Returns a reference to the value stored under the given key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        self.iter().find(|&(k, _)| k == key).map(|(_, value)| value)
    }

    /// Returns a mutable reference to the value stored under the given key.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let mut current = self.head.as_deref_mut();
        while let Some(node) = current {
            if node.key == key {
                return Some(&mut node.value);
            }
            current = node.next.as_deref_mut();
        }
        None
    }

    /// Returns true if an entry with the given key is present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Returns the number of entries in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the chain holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns an iterator over the chain's entries, front to back.
    #[must_use]
    #[allow(clippy::iter_without_into_iter)]
    pub fn iter(&self) -> ChainIter<'_, V> {
        ChainIter { next: self.head.as_deref(), _marker: PhantomData }
    }
}

impl<V> Drop for Chain<V> {
    fn drop(&mut self) {
        // Unlink iteratively so a long chain cannot overflow the stack
        // through nested `Box` drops.
        let mut current = self.head.take();
        while let Some(mut node) = current {
            current = node.next.take();
        }
    }
}

impl<V> IntoIterator for Chain<V> {
    type Item = (String, V);
    type IntoIter = ChainIntoIter<V>;

    /// Consumes the chain, yielding owned entries front to back.
    fn into_iter(mut self) -> ChainIntoIter<V> {
        ChainIntoIter { next: self.head.take() }
    }
}

/// Owning iterator over the entries of a [`Chain`], front to back.
#[derive(Debug)]
pub struct ChainIntoIter<V> {
    /// Next node to yield, or `None` when the chain is exhausted
    next: Option<Box<Node<V>>>,
}

impl<V> Iterator for ChainIntoIter<V> {
    type Item = (String, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.next.take().map(|node| {
            self.next = node.next;
            (node.key, node.value)
        })
    }
}

/// Iterator over the entries of a [`Chain`], front to back.
#[derive(Debug, Clone)]
pub struct ChainIter<'a, V> {
    /// Next node to yield, or `None` when the chain is exhausted
    next: Option<&'a Node<V>>,
    /// Phantom data to hold the lifetime and value type
    _marker: PhantomData<&'a V>,
}

impl<'a, V> Iterator for ChainIter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            (node.key.as_str(), &node.value)
        })
    }
}

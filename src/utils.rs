//! Utility trait shared by both hash map implementations.

use crate::{ChainedHashMap, OpenHashMap};

/// Extension trait for map implementations that provides additional
/// utility methods on top of the core API.
pub trait HashMapExtensions<V> {
    /// Returns the keys of the hash map as a Vec, in iteration order.
    fn keys(&self) -> Vec<String>;

    /// Returns the values of the hash map as a Vec, in iteration order.
    fn values(&self) -> Vec<V>;
}

impl<V: Clone> HashMapExtensions<V> for OpenHashMap<V> {
    fn keys(&self) -> Vec<String> {
        self.iter().map(|(key, _)| key.to_string()).collect()
    }

    fn values(&self) -> Vec<V> {
        self.iter().map(|(_, value)| value.clone()).collect()
    }
}

impl<V: Clone> HashMapExtensions<V> for ChainedHashMap<V> {
    fn keys(&self) -> Vec<String> {
        self.iter().map(|(key, _)| key.to_string()).collect()
    }

    fn values(&self) -> Vec<V> {
        self.iter().map(|(_, value)| value.clone()).collect()
    }
}

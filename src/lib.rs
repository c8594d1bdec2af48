//! # Primemap
//!
//! Hash maps built from first principles over prime-sized tables.
//!
//! This crate provides two independent implementations of a string-keyed
//! hash map, differing in how they resolve collisions:
//!
//! - `OpenHashMap`: open addressing with quadratic probing and tombstone
//!   deletion, resized once the load factor reaches 0.5
//! - `ChainedHashMap`: separate chaining with a linked list per bucket,
//!   resized once the load factor reaches 1.0
//!
//! Both keep their capacity prime (see [`prime::next_prime`]) so that
//! probe sequences and modular reduction behave well, and both rebuild
//! themselves by re-inserting every live entry on resize.
//!
//! ## Basic Usage
//!
//! ```rust
//! use primemap::OpenHashMap;
//!
//! // Capacity rounds up to the next prime (23).
//! let mut map = OpenHashMap::with_capacity(20);
//! assert_eq!(map.capacity(), 23);
//!
//! // Insert and look up values
//! map.put("apple".to_string(), 1);
//! map.put("banana".to_string(), 2);
//! assert_eq!(map.get("apple"), Some(&1));
//!
//! // Overwrite in place
//! map.put("apple".to_string(), 10);
//! assert_eq!(map.get("apple"), Some(&10));
//! assert_eq!(map.len(), 2);
//!
//! // Remove leaves a tombstone; the key is gone
//! map.remove("apple");
//! assert_eq!(map.get("apple"), None);
//! ```
//!
//! ## Chaining and frequency counting
//!
//! ```rust
//! use primemap::{find_mode, ChainedHashMap};
//!
//! let mut map = ChainedHashMap::new();
//! map.put("grape".to_string(), 3);
//! assert!(map.contains_key("grape"));
//!
//! let (modes, frequency) = find_mode(&["apple", "apple", "grape", "melon", "peach"]);
//! assert_eq!(modes, vec!["apple".to_string()]);
//! assert_eq!(frequency, 2);
//! ```

/// Module implementing the per-bucket linked list for the chained map
pub mod chain;
/// Module implementing the separate chaining hash map
mod chained_hashmap;
/// Module providing the deterministic string hash functions
pub mod hashing;
/// Module computing the statistical mode of a sequence
mod mode;
/// Module implementing the open addressing hash map
mod open_hashmap;
/// Module providing prime capacity sizing
pub mod prime;
/// Utility trait shared by both hash maps
mod utils;

pub use chained_hashmap::{ChainedHashMap, ChainedIter};
pub use mode::find_mode;
pub use open_hashmap::{OpenHashMap, OpenIter};
pub use utils::HashMapExtensions;

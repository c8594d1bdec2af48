//! Deterministic string hash functions used by the map constructors.

/// A deterministic function mapping a string key to a hash value.
///
/// Both map variants reduce the result modulo their current prime capacity
/// to pick a slot or bucket index.
pub type HashFn = fn(&str) -> u64;

/// Hashes a key by summing the Unicode scalar values of its characters.
#[must_use]
pub fn hash_first(key: &str) -> u64 {
    key.chars().fold(0_u64, |hash, ch| hash.wrapping_add(u64::from(u32::from(ch))))
}

/// Hashes a key by summing each character's Unicode scalar value weighted
/// by its one-based position.
#[must_use]
pub fn hash_second(key: &str) -> u64 {
    key.chars().enumerate().fold(0_u64, |hash, (index, ch)| {
        let weight = (index as u64).wrapping_add(1);
        hash.wrapping_add(weight.wrapping_mul(u64::from(u32::from(ch))))
    })
}

//! Statistical mode of a sequence, computed by frequency counting in a
//! [`ChainedHashMap`].

use crate::ChainedHashMap;

/// Returns the most frequent values in `values` together with their count.
///
/// Every distinct value becomes a key in a fresh [`ChainedHashMap`] whose
/// counter is bumped per occurrence; a single pass over the buckets then
/// collects the keys holding the maximum count. An empty input yields
/// `(vec![], 0)`.
///
/// When several values tie for the maximum, they are returned in the order
/// the bucket scan meets them, which follows hash layout rather than input
/// order.
///
/// ```
/// use primemap::find_mode;
///
/// let (modes, frequency) = find_mode(&["apple", "apple", "grape", "melon", "peach"]);
/// assert_eq!(modes, vec!["apple".to_string()]);
/// assert_eq!(frequency, 2);
/// ```
#[must_use]
pub fn find_mode<S: AsRef<str>>(values: &[S]) -> (Vec<String>, usize) {
    let mut counts: ChainedHashMap<usize> = ChainedHashMap::new();

    for value in values {
        let key = value.as_ref();
        if let Some(count) = counts.get_mut(key) {
            *count = count.saturating_add(1);
        } else {
            counts.put(key.to_string(), 1);
        }
    }

    let mut modes = Vec::new();
    let mut max_frequency = 0;

    for index in 0..counts.capacity() {
        let Some(bucket) = counts.get_bucket(index) else { continue };
        for (key, &count) in bucket.iter() {
            if count > max_frequency {
                max_frequency = count;
                modes = vec![key.to_string()];
            } else if count == max_frequency {
                modes.push(key.to_string());
            }
        }
    }

    (modes, max_frequency)
}

//! Frequency counting on top of [`SeparateChainingMap`].

use std::hash::Hash;

use crate::SeparateChainingMap;

/// Returns the most frequent values in `values` and how often they occur.
///
/// Counting goes through a default [`SeparateChainingMap`], so every value tied
/// for the highest count is included, in that map's iteration order. Which values
/// are returned is deterministic; their order depends on the hash function and is
/// not sorted. An empty slice yields `(vec![], 0)`.
#[must_use]
pub fn find_mode<T: Hash + Eq + Clone>(values: &[T]) -> (Vec<T>, usize) {
    let mut counts: SeparateChainingMap<&T, usize> = SeparateChainingMap::default();
    for value in values {
        if let Some(count) = counts.get_mut(&value) {
            *count = count.saturating_add(1);
        } else {
            counts.put(value, 1);
        }
    }

    let mut mode = Vec::new();
    let mut frequency = 0;
    for (&value, &count) in &counts {
        if count > frequency {
            frequency = count;
            mode.clear();
            mode.push(value.clone());
        } else if count == frequency {
            mode.push(value.clone());
        }
    }

    (mode, frequency)
}

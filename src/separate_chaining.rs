use std::mem;

use crate::{
    chain::{Chain, ChainIter},
    error::ResizeError,
    hashing::{HashFunction, default_hash},
    prime::{next_prime, round_to_prime},
};

/// Capacity used by `Default` and `FromIterator`.
pub const DEFAULT_CAPACITY: usize = 11;

/// Load factor above which a `put` grows the table afterwards.
pub const MAX_LOAD_FACTOR: f64 = 1.0;

/// Smallest capacity `resize_table` accepts.
const MIN_RESIZE_CAPACITY: usize = 1;

/// A hash map resolving collisions with one linked chain per bucket.
///
/// The bucket count is always prime. After a `put` adds a new key and pushes the
/// load factor above [`MAX_LOAD_FACTOR`], the table doubles (to the next prime)
/// and every node is rehashed before `put` returns.
///
/// Note: This implementation is not thread-safe.
#[derive(Debug, Clone)]
pub struct SeparateChainingMap<K, V> {
    /// One chain per bucket
    buckets: Vec<Chain<K, V>>,
    /// Current number of nodes across all chains
    size: usize,
    /// Strategy mapping keys to hashes
    hash_function: HashFunction<K>,
}

impl<K, V> Default for SeparateChainingMap<K, V>
where
    K: Eq + std::hash::Hash,
{
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, default_hash::<K>)
    }
}

impl<K: Eq, V> Extend<(K, V)> for SeparateChainingMap<K, V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.put(k, v);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for SeparateChainingMap<K, V>
where
    K: Eq + std::hash::Hash,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

/// `capacity` empty chains
fn fresh_buckets<K, V>(capacity: usize) -> Vec<Chain<K, V>> {
    let mut buckets = Vec::with_capacity(capacity);
    buckets.resize_with(capacity, Chain::new);
    buckets
}

/// Bucket for `hash` in a table of `capacity` chains
#[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
fn bucket_index(hash: u64, capacity: usize) -> usize {
    // the remainder is below capacity, so it fits back in usize
    (hash % capacity as u64) as usize
}

impl<K: Eq, V> SeparateChainingMap<K, V> {
    /// Creates a map with `capacity` rounded up to the next prime.
    #[must_use]
    pub fn new(capacity: usize, hash_function: HashFunction<K>) -> Self {
        Self { buckets: fresh_buckets(next_prime(capacity)), size: 0, hash_function }
    }

    /// Index of the chain that owns `key`
    fn index_of(&self, key: &K) -> usize {
        bucket_index((self.hash_function)(key), self.capacity())
    }

    /// Inserts or updates a key-value pair.
    ///
    /// An existing key has its value replaced in place and the old value is
    /// returned. A new key is linked in at the head of its chain; if that takes
    /// the load factor above [`MAX_LOAD_FACTOR`] the table is doubled.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let index = self.index_of(&key);
        let chain = self.buckets.get_mut(index)?;

        if let Some(existing) = chain.get_mut(&key) {
            return Some(mem::replace(existing, value));
        }

        chain.insert(key, value);
        self.size = self.size.saturating_add(1);

        if self.table_load() > MAX_LOAD_FACTOR {
            self.resize_table(self.capacity().saturating_mul(2));
        }
        None
    }

    /// Retrieve a value for a given key
    pub fn get(&self, key: &K) -> Option<&V> {
        self.buckets.get(self.index_of(key))?.contains(key).map(|node| node.value())
    }

    /// Get a mutable reference to a value for a given key
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let index = self.index_of(key);
        self.buckets.get_mut(index)?.get_mut(key)
    }

    /// Returns true if some chain holds this key
    pub fn contains_key(&self, key: &K) -> bool {
        self.buckets.get(self.index_of(key)).is_some_and(|chain| chain.contains(key).is_some())
    }

    /// Unlinks the node holding `key`.
    ///
    /// Does nothing and returns `None` when the key is absent.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let index = self.index_of(key);
        let value = self.buckets.get_mut(index)?.remove(key)?;
        self.size = self.size.saturating_sub(1);
        Some(value)
    }

    /// Drops every chain, keeping the current capacity.
    pub fn clear(&mut self) {
        self.buckets = fresh_buckets(self.capacity());
        self.size = 0;
    }

    /// Rehashes every node into `new_capacity` chains, rounded up to a prime.
    ///
    /// A request of 0 is ignored. Unlike open addressing, the new capacity may be
    /// smaller than the number of entries.
    pub fn resize_table(&mut self, new_capacity: usize) {
        if let Err(err) = self.try_resize_table(new_capacity) {
            log::debug!("ignoring resize request: {err}");
        }
    }

    /// Rehashes every node into `new_capacity` chains, rounded up to a prime.
    ///
    /// Nodes are moved bucket by bucket, head first, and linked in at the head of
    /// their new chain. No node is dropped, so [`len`](Self::len) is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ResizeError::CapacityTooSmall`] for `new_capacity == 0`; the table
    /// is left untouched.
    pub fn try_resize_table(&mut self, new_capacity: usize) -> Result<(), ResizeError> {
        if new_capacity < MIN_RESIZE_CAPACITY {
            return Err(ResizeError::CapacityTooSmall {
                requested: new_capacity,
                minimum: MIN_RESIZE_CAPACITY,
            });
        }

        let new_capacity = round_to_prime(new_capacity);
        log::debug!(
            "resizing chained table from {} to {new_capacity} buckets ({} entries)",
            self.capacity(),
            self.size
        );

        let mut new_buckets = fresh_buckets(new_capacity);
        for mut chain in mem::take(&mut self.buckets) {
            while let Some((key, value)) = chain.pop_front() {
                let index = bucket_index((self.hash_function)(&key), new_capacity);
                if let Some(target) = new_buckets.get_mut(index) {
                    target.insert(key, value);
                }
            }
        }
        self.buckets = new_buckets;

        Ok(())
    }

    /// Returns the current load factor of the hash map
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn table_load(&self) -> f64 {
        self.size as f64 / self.capacity() as f64
    }

    /// Counts the buckets whose chain is empty
    #[must_use]
    pub fn empty_buckets(&self) -> usize {
        self.buckets.iter().filter(|chain| chain.is_empty()).count()
    }

    /// Returns the number of entries in the hash map
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the hash map holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of buckets, always a prime
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Collects every pair in bucket order, then chain order
    #[must_use]
    pub fn get_keys_and_values(&self) -> Vec<(&K, &V)> {
        self.iter().collect()
    }

    /// Returns a fresh iterator over the pairs in bucket order, then chain order
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        let mut buckets = self.buckets.iter();
        let chain = buckets.next().map(Chain::iter);
        Iter { buckets, chain }
    }
}

/// Iterator over the key-value pairs of a [`SeparateChainingMap`]
#[derive(Debug, Clone)]
pub struct Iter<'a, K, V> {
    /// Chains not yet started
    buckets: std::slice::Iter<'a, Chain<K, V>>,
    /// Chain currently being walked
    chain: Option<ChainIter<'a, K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(pair) = self.chain.as_mut()?.next() {
                return Some(pair);
            }
            self.chain = Some(self.buckets.next()?.iter());
        }
    }
}

impl<'a, K: Eq, V> IntoIterator for &'a SeparateChainingMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{hash_function_1, hash_function_2, prime::is_prime};

    /// Sends every key to bucket 0
    fn colliding(_: &&str) -> u64 {
        0
    }

    #[test]
    fn test_put_and_get() {
        let mut map: SeparateChainingMap<&str, i32> =
            SeparateChainingMap::new(31, hash_function_1);
        assert_eq!(map.get(&"key"), None);
        assert_eq!(map.put("key1", 10), None);
        assert_eq!(map.get(&"key1"), Some(&10));
    }

    #[test]
    fn test_put_overwrites_in_place() {
        let mut map: SeparateChainingMap<&str, i32> =
            SeparateChainingMap::new(101, hash_function_1);
        map.put("key1", 10);
        map.put("key2", 20);
        assert_eq!(map.put("key1", 30), Some(10));
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&"key1"), Some(&30));
    }

    #[test]
    fn test_chain_grows_in_one_bucket() {
        let mut map: SeparateChainingMap<&str, i32> = SeparateChainingMap::new(11, colliding);
        for (i, key) in ["a", "b", "c", "d"].into_iter().enumerate() {
            map.put(key, i32::try_from(i).unwrap_or_default());
        }
        assert_eq!(map.empty_buckets(), 10);
        assert_eq!(map.get(&"a"), Some(&0));
        assert_eq!(map.get(&"d"), Some(&3));

        // chain order is newest first
        let keys: Vec<_> = map.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["d", "c", "b", "a"]);
    }

    #[test]
    fn test_remove() {
        let mut map: SeparateChainingMap<&str, i32> =
            SeparateChainingMap::new(53, hash_function_1);
        map.put("key1", 10);
        assert_eq!(map.remove(&"key1"), Some(10));
        assert_eq!(map.get(&"key1"), None);
        assert_eq!(map.remove(&"key4"), None);
        assert_eq!(map.len(), 0);
        assert_eq!(map.capacity(), 53);
        assert_eq!(map.empty_buckets(), 53);
    }

    #[test]
    fn test_resize_on_put_past_full_load() {
        let mut map: SeparateChainingMap<String, usize> =
            SeparateChainingMap::new(20, hash_function_2);
        assert_eq!(map.capacity(), 23);

        for i in 0..13 {
            map.put(format!("key{i}"), i);
        }
        assert_eq!(map.capacity(), 23);

        for i in 13..23 {
            map.put(format!("key{i}"), i);
        }
        assert_eq!(map.capacity(), 23);
        assert!((map.table_load() - 1.0).abs() < f64::EPSILON);

        map.put("key23".to_string(), 23);
        assert_eq!(map.capacity(), 47);
        assert_eq!(map.len(), 24);
        for i in 0..24 {
            assert_eq!(map.get(&format!("key{i}")), Some(&i));
        }
    }

    #[test]
    fn test_load_never_exceeds_one() {
        let mut map: SeparateChainingMap<String, usize> =
            SeparateChainingMap::new(53, hash_function_1);
        for i in 0..150 {
            map.put(format!("str{i}"), i * 100);
            assert!(map.table_load() <= MAX_LOAD_FACTOR);
            assert!(is_prime(map.capacity()));
        }
        assert_eq!(map.len(), 150);
    }

    #[test]
    fn test_repeated_keys_do_not_grow() {
        let mut map: SeparateChainingMap<String, usize> =
            SeparateChainingMap::new(41, hash_function_2);
        for i in 0..50 {
            map.put(format!("str{}", i / 3), i * 100);
        }
        assert_eq!(map.len(), 17);
        assert_eq!(map.capacity(), 41);
        assert_eq!(map.get(&"str16".to_string()), Some(&4900));
    }

    #[test]
    fn test_resize_table_keeps_entries() {
        let mut map: SeparateChainingMap<&str, i32> =
            SeparateChainingMap::new(20, hash_function_1);
        map.put("key1", 10);
        map.resize_table(30);
        assert_eq!(map.len(), 1);
        assert_eq!(map.capacity(), 31);
        assert_eq!(map.get(&"key1"), Some(&10));
        assert!(map.contains_key(&"key1"));
    }

    #[test]
    fn test_resize_table_may_shrink_below_size() {
        let mut map: SeparateChainingMap<String, usize> =
            SeparateChainingMap::new(79, hash_function_2);
        for i in 0..30 {
            map.put(i.to_string(), i);
        }

        assert_eq!(map.try_resize_table(2), Ok(()));
        assert_eq!(map.capacity(), 2);
        assert_eq!(map.len(), 30);
        assert!(map.table_load() > MAX_LOAD_FACTOR);
        for i in 0..30 {
            assert_eq!(map.get(&i.to_string()), Some(&i));
        }
        assert_eq!(map.iter().count(), 30);
    }

    #[test]
    fn test_resize_table_rejects_zero() {
        let mut map: SeparateChainingMap<&str, i32> =
            SeparateChainingMap::new(11, hash_function_1);
        map.put("key1", 10);
        assert_eq!(
            map.try_resize_table(0),
            Err(ResizeError::CapacityTooSmall { requested: 0, minimum: 1 })
        );
        map.resize_table(0);
        assert_eq!(map.capacity(), 11);

        map.resize_table(1);
        assert_eq!(map.capacity(), 3);
        assert_eq!(map.get(&"key1"), Some(&10));
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut map: SeparateChainingMap<&str, i32> =
            SeparateChainingMap::new(53, hash_function_1);
        map.put("key1", 10);
        map.put("key2", 20);
        map.resize_table(100);
        map.clear();
        assert_eq!(map.len(), 0);
        assert!(map.is_empty());
        assert_eq!(map.capacity(), 101);
        assert_eq!(map.empty_buckets(), 101);
    }

    #[test]
    fn test_iter_is_restartable() {
        let map: SeparateChainingMap<i32, i32> = (0..40).map(|i| (i, -i)).collect();
        let first: Vec<_> = map.iter().collect();
        let second: Vec<_> = (&map).into_iter().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 40);
        assert_eq!(map.get_keys_and_values(), first);
    }

    #[test]
    fn test_iter_on_empty_map() {
        let map = SeparateChainingMap::<String, i32>::default();
        assert_eq!(map.iter().next(), None);
        assert!(map.get_keys_and_values().is_empty());
    }

    #[test]
    fn test_get_mut() {
        let mut map = SeparateChainingMap::<String, i32>::default();
        map.put("key1".to_string(), 1);
        if let Some(value) = map.get_mut(&"key1".to_string()) {
            *value += 10;
        }
        assert_eq!(map.get(&"key1".to_string()), Some(&11));
    }
}

//! The contract both map engines implement.

use crate::{OpenAddressingMap, ResizeError, SeparateChainingMap};

/// Fixed-interface associative container backed by a prime-sized bucket array.
///
/// Lets generic code run against either collision strategy. Every method forwards
/// to the inherent method of the same name.
pub trait HashTable<K, V> {
    /// Inserts or updates `key`, returning the overwritten value
    fn put(&mut self, key: K, value: V) -> Option<V>;

    /// Returns the value stored under `key`
    fn get(&self, key: &K) -> Option<&V>;

    /// Returns true if `key` is present
    fn contains_key(&self, key: &K) -> bool;

    /// Removes `key`, returning its value; a no-op for missing keys
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Drops every entry, keeping the capacity
    fn clear(&mut self);

    /// Rebuilds the table, silently ignoring requests the engine rejects
    fn resize_table(&mut self, new_capacity: usize);

    /// Rebuilds the table, reporting rejected requests.
    ///
    /// # Errors
    ///
    /// Returns a [`ResizeError`] when the engine refuses `new_capacity`.
    fn try_resize_table(&mut self, new_capacity: usize) -> Result<(), ResizeError>;

    /// Entries per bucket
    fn table_load(&self) -> f64;

    /// Buckets counted as empty by the engine
    fn empty_buckets(&self) -> usize;

    /// Number of entries
    fn len(&self) -> usize;

    /// Returns true if there are no entries
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of buckets, always prime
    fn capacity(&self) -> usize;

    /// Every pair in the engine's iteration order
    fn get_keys_and_values(&self) -> Vec<(&K, &V)>;

    /// Returns the keys of the hash map as a Vec
    fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.get_keys_and_values().into_iter().map(|(k, _)| k.clone()).collect()
    }

    /// Returns the values of the hash map as a Vec
    fn values(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.get_keys_and_values().into_iter().map(|(_, v)| v.clone()).collect()
    }
}

/// Forwards the trait to the inherent methods of each engine
macro_rules! forward_hash_table {
    ($map:ident) => {
        impl<K: Eq, V> HashTable<K, V> for $map<K, V> {
            fn put(&mut self, key: K, value: V) -> Option<V> {
                $map::put(self, key, value)
            }

            fn get(&self, key: &K) -> Option<&V> {
                $map::get(self, key)
            }

            fn contains_key(&self, key: &K) -> bool {
                $map::contains_key(self, key)
            }

            fn remove(&mut self, key: &K) -> Option<V> {
                $map::remove(self, key)
            }

            fn clear(&mut self) {
                $map::clear(self);
            }

            fn resize_table(&mut self, new_capacity: usize) {
                $map::resize_table(self, new_capacity);
            }

            fn try_resize_table(&mut self, new_capacity: usize) -> Result<(), ResizeError> {
                $map::try_resize_table(self, new_capacity)
            }

            fn table_load(&self) -> f64 {
                $map::table_load(self)
            }

            fn empty_buckets(&self) -> usize {
                $map::empty_buckets(self)
            }

            fn len(&self) -> usize {
                $map::len(self)
            }

            fn capacity(&self) -> usize {
                $map::capacity(self)
            }

            fn get_keys_and_values(&self) -> Vec<(&K, &V)> {
                $map::get_keys_and_values(self)
            }
        }
    };
}

forward_hash_table!(OpenAddressingMap);
forward_hash_table!(SeparateChainingMap);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash_function_1;

    fn fill<M: HashTable<String, usize>>(map: &mut M) {
        for (i, key) in ["a", "b", "c"].into_iter().enumerate() {
            map.put(key.to_string(), i + 1);
        }
    }

    fn check_keys_and_values<M: HashTable<String, usize>>(mut map: M) {
        fill(&mut map);

        let mut keys = map.keys();
        keys.sort(); // Sort for predictable comparison

        let mut values = map.values();
        values.sort_unstable();

        assert_eq!(keys, vec!["a".to_string(), "b".to_string(), "c".to_string()]);
        assert_eq!(values, vec![1, 2, 3]);
        assert!(!map.is_empty());

        map.clear();
        assert!(map.is_empty());
        assert!(map.keys().is_empty());
    }

    #[test]
    fn test_keys_and_values() {
        check_keys_and_values(OpenAddressingMap::<String, usize>::new(11, hash_function_1));
        check_keys_and_values(SeparateChainingMap::<String, usize>::new(11, hash_function_1));
    }

    #[test]
    fn test_contains_key_through_trait() {
        let mut maps: Vec<Box<dyn HashTable<String, usize>>> = vec![
            Box::new(OpenAddressingMap::new(7, hash_function_1)),
            Box::new(SeparateChainingMap::new(7, hash_function_1)),
        ];

        for map in &mut maps {
            map.put("a".to_string(), 1);
            assert!(map.contains_key(&"a".to_string()));
            assert!(!map.contains_key(&"b".to_string()));
            assert_eq!(map.try_resize_table(0).map_err(|_| ()), Err(()));
            assert_eq!(map.capacity(), 7);
        }
    }
}

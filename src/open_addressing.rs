use std::mem;

use crate::{
    error::ResizeError,
    hashing::{HashFunction, default_hash},
    prime::{next_prime, round_to_prime},
};

/// Capacity used by `Default` and `FromIterator`.
pub const DEFAULT_CAPACITY: usize = 11;

/// Load factor at which a `put` grows the table first.
pub const MAX_LOAD_FACTOR: f64 = 0.5;

/// Smallest capacity `resize_table` accepts.
const MIN_RESIZE_CAPACITY: usize = 2;

/// A live key-value pair owned by a slot
#[derive(Debug, Clone)]
struct Entry<K, V> {
    /// The key in the key-value pair
    key: K,
    /// The value associated with the key
    value: V,
}

/// State of a single bucket in the open-addressing table.
#[derive(Debug, Clone)]
enum Slot<K, V> {
    /// Never written since the last resize or clear; ends every probe sequence.
    Empty,
    /// A removed entry. Lookups probe past it, inserts may reuse it.
    Tombstone,
    /// A live entry.
    Occupied(Entry<K, V>),
}

/// A hash map resolving collisions by quadratic probing over a prime-sized table.
///
/// Removed entries leave tombstones behind so that probe sequences running through
/// them stay intact. The table doubles (to the next prime) before a `put` would
/// take the load factor to [`MAX_LOAD_FACTOR`] or above.
///
/// Note: This implementation is not thread-safe.
#[derive(Debug, Clone)]
pub struct OpenAddressingMap<K, V> {
    /// The bucket array, `capacity` slots long
    slots: Vec<Slot<K, V>>,
    /// Current number of live entries, as counted by `put` and `remove`
    size: usize,
    /// Strategy mapping keys to hashes
    hash_function: HashFunction<K>,
}

impl<K, V> Default for OpenAddressingMap<K, V>
where
    K: Eq + std::hash::Hash,
{
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, default_hash::<K>)
    }
}

impl<K: Eq, V> Extend<(K, V)> for OpenAddressingMap<K, V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.put(k, v);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for OpenAddressingMap<K, V>
where
    K: Eq + std::hash::Hash,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

/// Index of the `probe`-th candidate slot: `(hash + probe²) mod capacity`.
#[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
fn probe_index(hash: u64, probe: usize, capacity: usize) -> usize {
    let probe = probe as u128;
    // capacity is never zero and the result is below it, so it fits back in usize
    ((u128::from(hash) + probe * probe) % capacity as u128) as usize
}

/// A fresh table of `capacity` empty slots
fn empty_slots<K, V>(capacity: usize) -> Vec<Slot<K, V>> {
    let mut slots = Vec::with_capacity(capacity);
    slots.resize_with(capacity, || Slot::Empty);
    slots
}

impl<K: Eq, V> OpenAddressingMap<K, V> {
    /// Creates a map with `capacity` rounded up to the next prime.
    ///
    /// Even requests are bumped to odd before the search, so `new(20, ..)` holds 23
    /// buckets and `new(0, ..)` holds 3.
    #[must_use]
    pub fn new(capacity: usize, hash_function: HashFunction<K>) -> Self {
        Self { slots: empty_slots(next_prime(capacity)), size: 0, hash_function }
    }

    /// Inserts or updates a key-value pair.
    ///
    /// Returns the previous value when a live entry with an equal key was
    /// overwritten; an update never resizes. A new key first grows the table if
    /// it would take the load to [`MAX_LOAD_FACTOR`], then goes into the first
    /// tombstone or empty slot on its probe sequence.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        if let Some(existing) = self.get_mut(&key) {
            return Some(mem::replace(existing, value));
        }

        if self.load_after_insert() >= MAX_LOAD_FACTOR {
            self.resize_table(self.capacity().saturating_mul(2));
        }
        self.insert_new(key, value);
        None
    }

    /// Places a key known to be absent in the first free slot of its probe sequence
    fn insert_new(&mut self, key: K, value: V) {
        let hash = (self.hash_function)(&key);
        let capacity = self.capacity();

        for probe in 0..capacity {
            let index = probe_index(hash, probe, capacity);
            let Some(slot) = self.slots.get_mut(index) else {
                break;
            };
            match slot {
                Slot::Occupied(_) => continue,
                Slot::Tombstone => log::trace!("reusing tombstone at slot {index}"),
                Slot::Empty => {}
            }
            *slot = Slot::Occupied(Entry { key, value });
            self.size = self.size.saturating_add(1);
            return;
        }

        log::warn!(
            "probe sequence exhausted after {capacity} slots with {} live entries; entry dropped",
            self.size
        );
    }

    /// Load factor the table would have with one more entry
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    fn load_after_insert(&self) -> f64 {
        self.size.saturating_add(1) as f64 / self.capacity() as f64
    }

    /// Walks the probe sequence of `key` and returns the slot holding it.
    ///
    /// Tombstones are stepped over; the first empty slot ends the search. At most
    /// `capacity` slots are examined.
    fn find_index(&self, key: &K) -> Option<usize> {
        let hash = (self.hash_function)(key);
        let capacity = self.capacity();

        for probe in 0..capacity {
            let index = probe_index(hash, probe, capacity);
            match self.slots.get(index)? {
                Slot::Empty => return None,
                Slot::Tombstone => {}
                Slot::Occupied(entry) => {
                    if entry.key == *key {
                        return Some(index);
                    }
                }
            }
        }

        None
    }

    /// Retrieve a value for a given key
    pub fn get(&self, key: &K) -> Option<&V> {
        match self.slots.get(self.find_index(key)?)? {
            Slot::Occupied(entry) => Some(&entry.value),
            Slot::Empty | Slot::Tombstone => None,
        }
    }

    /// Get a mutable reference to a value for a given key
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let index = self.find_index(key)?;
        match self.slots.get_mut(index)? {
            Slot::Occupied(entry) => Some(&mut entry.value),
            Slot::Empty | Slot::Tombstone => None,
        }
    }

    /// Returns true if a live entry with this key exists
    pub fn contains_key(&self, key: &K) -> bool {
        self.find_index(key).is_some()
    }

    /// Removes a key, leaving a tombstone in its slot.
    ///
    /// Does nothing and returns `None` when the key is absent.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let index = self.find_index(key)?;
        let slot = self.slots.get_mut(index)?;
        match mem::replace(slot, Slot::Tombstone) {
            Slot::Occupied(entry) => {
                self.size = self.size.saturating_sub(1);
                Some(entry.value)
            }
            other => {
                *slot = other;
                None
            }
        }
    }

    /// Drops every entry and tombstone, keeping the current capacity.
    pub fn clear(&mut self) {
        self.slots = empty_slots(self.capacity());
        self.size = 0;
    }

    /// Rebuilds the table with `new_capacity` buckets, rounded up to a prime.
    ///
    /// Requests of 1 or less, or below the current number of live entries, are
    /// ignored. Use [`try_resize_table`](Self::try_resize_table) to find out
    /// whether a request was honoured.
    pub fn resize_table(&mut self, new_capacity: usize) {
        if let Err(err) = self.try_resize_table(new_capacity) {
            log::debug!("ignoring resize request: {err}");
        }
    }

    /// Rebuilds the table with `new_capacity` buckets, rounded up to a prime.
    ///
    /// Live entries are re-inserted through [`put`](Self::put) in bucket order, so
    /// the rebuilt table keeps its load below [`MAX_LOAD_FACTOR`] and may end up
    /// larger than requested. Tombstones are discarded and `len` is recounted.
    ///
    /// # Errors
    ///
    /// Returns [`ResizeError::CapacityTooSmall`] for `new_capacity <= 1` and
    /// [`ResizeError::BelowSize`] when `new_capacity` is below [`len`](Self::len).
    /// The table is left untouched in both cases.
    pub fn try_resize_table(&mut self, new_capacity: usize) -> Result<(), ResizeError> {
        if new_capacity < MIN_RESIZE_CAPACITY {
            return Err(ResizeError::CapacityTooSmall {
                requested: new_capacity,
                minimum: MIN_RESIZE_CAPACITY,
            });
        }
        if new_capacity < self.size {
            return Err(ResizeError::BelowSize { requested: new_capacity, size: self.size });
        }

        let new_capacity = round_to_prime(new_capacity);
        log::debug!(
            "resizing open-addressing table from {} to {new_capacity} buckets ({} entries)",
            self.capacity(),
            self.size
        );

        let old_slots = mem::replace(&mut self.slots, empty_slots(new_capacity));
        self.size = 0;

        for slot in old_slots {
            if let Slot::Occupied(Entry { key, value }) = slot {
                self.put(key, value);
            }
        }

        Ok(())
    }

    /// Returns the current load factor of the hash map
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn table_load(&self) -> f64 {
        self.size as f64 / self.capacity() as f64
    }

    /// Returns `capacity - len`.
    ///
    /// Tombstoned slots are not live, so they are counted here even though they
    /// are not strictly empty.
    #[must_use]
    pub fn empty_buckets(&self) -> usize {
        self.capacity().saturating_sub(self.size)
    }

    /// Returns the number of live entries as tracked by `put` and `remove`
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
        self.slots.len()
    }

    /// Collects every live pair in bucket order
    #[must_use]
    pub fn get_keys_and_values(&self) -> Vec<(&K, &V)> {
        self.iter().collect()
    }

    /// Returns a fresh iterator over the live pairs in bucket order
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter { slots: self.slots.iter() }
    }
}

/// Iterator over the live key-value pairs of an [`OpenAddressingMap`]
#[derive(Debug, Clone)]
pub struct Iter<'a, K, V> {
    /// Remaining slots to visit
    slots: std::slice::Iter<'a, Slot<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.slots.find_map(|slot| match slot {
            Slot::Occupied(entry) => Some((&entry.key, &entry.value)),
            Slot::Empty | Slot::Tombstone => None,
        })
    }
}

impl<'a, K: Eq, V> IntoIterator for &'a OpenAddressingMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

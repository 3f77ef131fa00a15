//! # Prime Hash Map
//!
//! Two hash maps with the same fixed interface and different collision strategies:
//!
//! - `OpenAddressingMap`: quadratic probing, with tombstones left behind by removals
//! - `SeparateChainingMap`: one owned singly linked chain per bucket
//!
//! Both keep a prime number of buckets, take the hash function as a plain function
//! pointer at construction, and grow by doubling capacity (rounded up to the next
//! prime) with a full rehash inside the `put` that crosses their load threshold.
//! Open addressing stays below a load factor of 0.5; separate chaining stays at or
//! below 1.0.
//!
//! ## Basic Usage
//!
//! ```rust
//! use prime_hashmap::{OpenAddressingMap, hash_function_1};
//!
//! let mut map: OpenAddressingMap<&str, i32> = OpenAddressingMap::new(11, hash_function_1);
//!
//! map.put("key1", 10);
//! map.put("key2", 20);
//! map.put("key3", 30);
//! assert_eq!(map.len(), 3);
//! assert!(map.contains_key(&"key3"));
//!
//! map.remove(&"key3");
//! assert!(!map.contains_key(&"key3"));
//! assert_eq!(map.len(), 2);
//! ```
//!
//! ## Separate Chaining
//!
//! ```rust
//! use prime_hashmap::{SeparateChainingMap, hash_function_2};
//!
//! let mut map: SeparateChainingMap<String, usize> = SeparateChainingMap::new(20, hash_function_2);
//! assert_eq!(map.capacity(), 23);
//!
//! for i in 0..24 {
//!     map.put(format!("key{i}"), i);
//! }
//!
//! // the 24th key pushed the load above 1.0
//! assert_eq!(map.capacity(), 47);
//! assert!(map.table_load() <= 1.0);
//! assert_eq!(map.get(&"key7".to_string()), Some(&7));
//! ```
//!
//! ## Either Engine
//!
//! ```rust
//! use prime_hashmap::{HashTable, OpenAddressingMap, SeparateChainingMap, default_hash};
//!
//! fn count_words<M: HashTable<String, usize>>(map: &mut M, text: &str) {
//!     for word in text.split_whitespace() {
//!         let count = map.get(&word.to_string()).copied().unwrap_or(0);
//!         map.put(word.to_string(), count + 1);
//!     }
//! }
//!
//! let mut probing: OpenAddressingMap<String, usize> = OpenAddressingMap::new(11, default_hash);
//! let mut chaining: SeparateChainingMap<String, usize> = SeparateChainingMap::new(11, default_hash);
//! count_words(&mut probing, "the cat and the hat");
//! count_words(&mut chaining, "the cat and the hat");
//! assert_eq!(probing.get(&"the".to_string()), Some(&2));
//! assert_eq!(chaining.get(&"the".to_string()), Some(&2));
//! ```

/// Owned singly linked chains used as buckets
mod chain;
/// Errors reported by explicit resize requests
mod error;
/// Hash-function contract and stock hash functions
mod hashing;
/// Most-frequent-value search built on the chaining map
mod mode;
/// Hash map with quadratic probing and tombstones
mod open_addressing;
/// Prime capacity sizing
mod prime;
/// Hash map with separate chaining
mod separate_chaining;
/// The contract shared by both engines
mod table;

pub use chain::{Chain, ChainIter, Node};
pub use error::ResizeError;
pub use hashing::{HashFunction, default_hash, hash_function_1, hash_function_2};
pub use mode::find_mode;
pub use open_addressing::OpenAddressingMap;
pub use prime::{LARGEST_PRIME, is_prime, next_prime, round_to_prime};
pub use separate_chaining::SeparateChainingMap;
pub use table::HashTable;

/// Iterators and tuning constants of the open-addressing map
pub mod probing {
    pub use crate::open_addressing::{DEFAULT_CAPACITY, Iter, MAX_LOAD_FACTOR};
}

/// Iterators and tuning constants of the separate-chaining map
pub mod chaining {
    pub use crate::separate_chaining::{DEFAULT_CAPACITY, Iter, MAX_LOAD_FACTOR};
}

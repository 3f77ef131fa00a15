//! Hash functions injected into the maps at construction time.

use std::hash::{DefaultHasher, Hash, Hasher};

/// A pure function from a key to a non-negative hash.
///
/// Maps store one of these by value and call it once per bucket-index computation.
/// It must return the same hash for the same key on every call; nothing else is
/// assumed about its distribution.
pub type HashFunction<K> = fn(&K) -> u64;

/// Sums the Unicode scalar values of the key's characters.
///
/// Anagrams collide, which makes this handy for exercising collision paths.
#[must_use]
pub fn hash_function_1<K: AsRef<str> + ?Sized>(key: &K) -> u64 {
    key.as_ref()
        .chars()
        .fold(0_u64, |hash, ch| hash.wrapping_add(u64::from(u32::from(ch))))
}

/// Sums each character's scalar value weighted by its one-based position.
#[must_use]
pub fn hash_function_2<K: AsRef<str> + ?Sized>(key: &K) -> u64 {
    key.as_ref().chars().zip(1_u64..).fold(0_u64, |hash, (ch, position)| {
        hash.wrapping_add(position.wrapping_mul(u64::from(u32::from(ch))))
    })
}

/// Hashes any `K: Hash` with the std `SipHash` hasher under fixed keys.
///
/// `DefaultHasher::new` is not randomized, so the result is stable for the lifetime
/// of the process.
#[must_use]
pub fn default_hash<K: Hash + ?Sized>(key: &K) -> u64 {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_function_1_sums_scalars() {
        assert_eq!(hash_function_1("a"), 97);
        assert_eq!(hash_function_1("ab"), 97 + 98);
        assert_eq!(hash_function_1(""), 0);
        // anagrams collide
        assert_eq!(hash_function_1("key1"), hash_function_1("1yek"));
    }

    #[test]
    fn test_hash_function_2_weights_positions() {
        assert_eq!(hash_function_2("a"), 97);
        assert_eq!(hash_function_2("ab"), 97 + 2 * 98);
        assert_ne!(hash_function_2("key1"), hash_function_2("1yek"));
    }

    #[test]
    fn test_hash_functions_accept_owned_and_borrowed_keys() {
        let owned = String::from("melon");
        assert_eq!(hash_function_1(&owned), hash_function_1("melon"));
        assert_eq!(hash_function_2(&&*owned), hash_function_2("melon"));
    }

    #[test]
    fn test_default_hash_is_stable() {
        assert_eq!(default_hash(&42_u32), default_hash(&42_u32));
        assert_eq!(default_hash("apple"), default_hash("apple"));
        assert_ne!(default_hash("apple"), default_hash("grape"));
    }
}

//! Prime capacity sizing shared by both map engines.
//!
//! Every capacity a map ever holds passes through this module, so both engines
//! grow through the same sequence of prime bucket counts.

/// Largest prime that fits in a `usize`.
#[cfg(target_pointer_width = "64")]
pub const LARGEST_PRIME: usize = 18_446_744_073_709_551_557;
/// Largest prime that fits in a `usize`.
#[cfg(target_pointer_width = "32")]
pub const LARGEST_PRIME: usize = 4_294_967_291;
/// Largest prime that fits in a `usize`.
#[cfg(target_pointer_width = "16")]
pub const LARGEST_PRIME: usize = 65_521;

/// Returns `true` if `n` is prime.
///
/// Trial division by odd factors while `factor² ≤ n`.
#[must_use]
#[allow(clippy::arithmetic_side_effects)]
pub fn is_prime(n: usize) -> bool {
    if n == 2 || n == 3 {
        return true;
    }
    if n == 1 || n % 2 == 0 {
        return false;
    }

    let mut factor: usize = 3;
    // `factor <= n / factor` is `factor * factor <= n` without the overflow
    while factor <= n / factor {
        if n % factor == 0 {
            return false;
        }
        factor = factor.saturating_add(2);
    }
    true
}

/// Returns the first prime reached by walking odd numbers upward from `n`.
///
/// An even `n` is bumped to the next odd number first, so `next_prime(2)` is `3`
/// and `next_prime(0)` is `3` as well. Anything above [`LARGEST_PRIME`] has no
/// prime to walk to and gets [`LARGEST_PRIME`].
#[must_use]
pub fn next_prime(n: usize) -> usize {
    if n >= LARGEST_PRIME {
        return LARGEST_PRIME;
    }

    let mut candidate = if n % 2 == 0 { n.saturating_add(1) } else { n };
    while !is_prime(candidate) {
        let Some(next) = candidate.checked_add(2) else {
            return LARGEST_PRIME;
        };
        candidate = next;
    }
    candidate
}

/// Keeps `n` if it is already prime, otherwise defers to [`next_prime`].
///
/// This is the rounding applied to explicit resize requests, where `2` is a valid
/// target.
#[must_use]
pub fn round_to_prime(n: usize) -> usize {
    if is_prime(n) { n } else { next_prime(n) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_prime_small_values() {
        let primes: Vec<usize> = (0..40).filter(|&n| is_prime(n)).collect();
        assert_eq!(primes, vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37]);
    }

    #[test]
    fn test_is_prime_squares_of_primes() {
        assert!(!is_prime(9));
        assert!(!is_prime(25));
        assert!(!is_prime(49));
        assert!(!is_prime(10_201)); // 101²
        assert!(is_prime(10_007));
    }

    #[test]
    fn test_next_prime() {
        assert_eq!(next_prime(0), 3);
        assert_eq!(next_prime(1), 3);
        assert_eq!(next_prime(2), 3);
        assert_eq!(next_prime(11), 11);
        assert_eq!(next_prime(20), 23);
        assert_eq!(next_prime(40), 41);
        assert_eq!(next_prime(46), 47);
        assert_eq!(next_prime(106), 107);
    }

    #[test]
    fn test_next_prime_saturates_at_largest_prime() {
        assert_eq!(next_prime(usize::MAX), LARGEST_PRIME);
        assert_eq!(next_prime(LARGEST_PRIME.saturating_add(2)), LARGEST_PRIME);
        assert_eq!(next_prime(LARGEST_PRIME.saturating_add(1)), LARGEST_PRIME);
        assert_eq!(round_to_prime(usize::MAX), LARGEST_PRIME);
    }

    #[test]
    fn test_round_to_prime_keeps_primes() {
        assert_eq!(round_to_prime(2), 2);
        assert_eq!(round_to_prime(3), 3);
        assert_eq!(round_to_prime(30), 31);
        assert_eq!(round_to_prime(100), 101);
        assert_eq!(round_to_prime(1), 3);
    }
}

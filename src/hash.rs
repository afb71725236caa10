//! Key hashing and bucket addressing.
//!
//! The hash is a plain polynomial accumulation over the key bytes:
//! `sum(b * multiplier)` in `i32`. Overflow wraps (two's complement), so
//! long keys or large multipliers may produce negative hashes. Bytes are
//! read unsigned. Only the spread across buckets matters, not the exact
//! numeric value.

/// Default odd multiplier.
pub const DEFAULT_MULTIPLIER: i32 = 257;

/// Polynomial hash of `key` with wrapping `i32` arithmetic.
#[inline]
pub fn polynomial_hash(key: &str, multiplier: i32) -> i32 {
    key.bytes().fold(0i32, |acc, b| {
        acc.wrapping_add(i32::from(b).wrapping_mul(multiplier))
    })
}

/// Map a (possibly negative) hash onto `0..capacity`.
///
/// Uses the Euclidean remainder so negative hashes never produce a
/// negative index. The arithmetic runs in `i128`, which holds every `i32`
/// hash and every `usize` capacity. `capacity` must be positive.
#[inline]
pub fn bucket_index(hash: i32, capacity: usize) -> usize {
    debug_assert!(capacity > 0);
    i128::from(hash).rem_euclid(capacity as i128) as usize
}

//! Key hashing: polynomial accumulation over the key's bytes.
//!
//! The hash carries no state between calls, so growth can recompute every
//! entry's bucket against the new bucket count.

/// Multiplier applied to the running hash before each byte is added.
pub const HASH_MULTIPLIER: usize = 65599;

/// Full-width hash of `key`: `h = h * 65599 + byte` for each byte, wrapping
/// at `usize` width.
#[inline]
pub fn hash_key(key: &str) -> usize {
    key.bytes().fold(0usize, |h, b| {
        h.wrapping_mul(HASH_MULTIPLIER).wrapping_add(b as usize)
    })
}

/// Bucket index of `key` in a table of `bucket_count` buckets, in
/// `[0, bucket_count)`.
///
/// Panics if `bucket_count` is zero.
#[inline]
pub fn bucket_index(key: &str, bucket_count: usize) -> usize {
    assert!(bucket_count > 0, "bucket count must be non-zero");
    hash_key(key) % bucket_count
}

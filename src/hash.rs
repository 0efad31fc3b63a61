//! Bucket hashing: maps key bytes to a bucket index.
//!
//! The default hasher is a seeded multiply-and-add over the key bytes with
//! wrapping 64-bit arithmetic. Bucket placement depends only on the key and
//! the bucket count, so a table rebuilt at a new size recomputes every index.

use core::num::NonZeroUsize;

/// Seed for the default accumulator.
pub const HASH_SEED: u64 = 10631;
/// Odd multiplier applied before adding each byte.
pub const HASH_MULTIPLIER: u64 = 7;

/// Produces the raw 64-bit hash of a key. Implementations must be pure:
/// the same bytes always give the same value.
pub trait BucketHash {
    fn hash_bytes(&self, key: &[u8]) -> u64;
}

/// Reduce `key` to a bucket index in `0..nbuckets` under `hasher`.
#[inline]
pub fn bucket_index<H: BucketHash + ?Sized>(
    hasher: &H,
    key: &[u8],
    nbuckets: NonZeroUsize,
) -> usize {
    (hasher.hash_bytes(key) % nbuckets.get() as u64) as usize
}

/// Seeded multiply-and-add hash; `Default` uses [`HASH_SEED`] and
/// [`HASH_MULTIPLIER`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct MultiplicativeHash {
    seed: u64,
    multiplier: u64,
}

impl MultiplicativeHash {
    pub const fn new(seed: u64, multiplier: u64) -> Self {
        Self { seed, multiplier }
    }
}

impl Default for MultiplicativeHash {
    fn default() -> Self {
        Self::new(HASH_SEED, HASH_MULTIPLIER)
    }
}

impl BucketHash for MultiplicativeHash {
    #[inline]
    fn hash_bytes(&self, key: &[u8]) -> u64 {
        key.iter().fold(self.seed, |acc, &b| {
            acc.wrapping_mul(self.multiplier).wrapping_add(u64::from(b))
        })
    }
}

/// Bucket index of `key` under the default hasher.
pub fn hash(key: &str, nbuckets: NonZeroUsize) -> usize {
    bucket_index(&MultiplicativeHash::default(), key.as_bytes(), nbuckets)
}

//! strmap: a single-threaded hash table from string keys to caller values,
//! with chained buckets kept in sorted order and explicit resizing.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small, predictable chained hash table where insert cost is
//!   bounded by chain length and the caller decides when to rebalance.
//! - Layers:
//!   - `hash`: `BucketHash` trait and the default seeded multiplicative
//!     hash (seed 10631, multiplier 7, wrapping 64-bit arithmetic).
//!   - `config`: `TableConfig` clamp bounds and resize slop.
//!   - `StrMap<V, H>`: bucket heads plus a `SlotMap` arena of entries
//!     linked into chains by generational keys.
//!
//! Constraints
//! - Single-threaded: mutation needs `&mut StrMap`; share behind one lock.
//! - `put` never resizes. `resize(target)` is hysteresis-gated: it does
//!   nothing while the load factor is within `LF_SLOP` of the target.
//! - Bucket count always lies in `[min_buckets, max_buckets]` and is never
//!   zero, so hashing cannot divide by zero.
//! - Keys are copied into the table; values are stored as-is and never
//!   inspected.
//!
//! Chain order
//! - Every chain is sorted ascending by key bytes. `put` splices new keys
//!   in place; `resize` prepends each entry onto its new chain and then
//!   sorts each chain once, so a rebuild costs O(n log n) at worst and
//!   iteration order within a bucket is always sorted.
//!   Iteration across buckets follows bucket index.
//! - Hashers only produce raw 64-bit hashes; the reduction to a bucket
//!   index (`hash::bucket_index`) is not overridable, so indices are always
//!   in range.
//!
//! Errors
//! - Bucket-array and key-copy allocation use `try_reserve`, so memory
//!   exhaustion there surfaces as `StrMapError::Alloc` with the table
//!   unchanged. Entry nodes themselves come from the arena, whose growth
//!   follows the global allocator's abort-on-failure policy.
//! - Non-positive or non-finite resize targets are rejected with
//!   `StrMapError::InvalidLoadFactor`.
//!
//! Logging
//! - Table creation and rebuilds are reported through `log::debug!`;
//!   resizes skipped by hysteresis through `log::trace!`.

pub mod config;
pub mod error;
pub mod hash;
mod str_map;
mod str_map_proptest;

// Public surface
pub use config::{TableConfig, LF_SLOP, MAX_BUCKETS, MIN_BUCKETS};
pub use error::{Result, StrMapError};
pub use hash::{BucketHash, MultiplicativeHash, HASH_MULTIPLIER, HASH_SEED};
pub use str_map::{Chain, Chains, Dump, Iter, StrMap};

//! StrMap: chained hash table keyed by strings.
//!
//! Entries live in a `SlotMap` arena and are linked into per-bucket chains
//! through their generational keys. The bucket array only holds chain heads,
//! so a rebuild swaps a small array and relinks entries without moving them.

use crate::config::TableConfig;
use crate::error::{Result, StrMapError};
use crate::hash::{bucket_index, BucketHash, MultiplicativeHash};
use core::cmp::Ordering;
use core::fmt;
use core::num::NonZeroUsize;
use log::{debug, trace};
use slotmap::{DefaultKey, SlotMap};

type Link = Option<DefaultKey>;

#[derive(Debug)]
struct Entry<V> {
    key: Box<str>,
    value: V,
    next: Link,
}

type Slots<V> = SlotMap<DefaultKey, Entry<V>>;

// Outcome of walking one sorted chain looking for a key.
enum Probe {
    Found { prev: Link, at: DefaultKey },
    // `next` is the first node with a greater key; the new node goes between.
    Missing { prev: Link, next: Link },
}

fn probe<V>(slots: &Slots<V>, head: Link, key: &str) -> Probe {
    let mut prev = None;
    let mut cur = head;
    while let Some(k) = cur {
        let e = &slots[k];
        match (*e.key).cmp(key) {
            Ordering::Less => {
                prev = cur;
                cur = e.next;
            }
            Ordering::Equal => return Probe::Found { prev, at: k },
            Ordering::Greater => break,
        }
    }
    Probe::Missing { prev, next: cur }
}

fn splice<V>(slots: &mut Slots<V>, head: &mut Link, prev: Link, node: DefaultKey, next: Link) {
    slots[node].next = next;
    match prev {
        None => *head = Some(node),
        Some(p) => slots[p].next = Some(node),
    }
}

fn alloc_buckets(n: NonZeroUsize) -> Result<Vec<Link>> {
    let mut buckets = Vec::new();
    buckets
        .try_reserve_exact(n.get())
        .map_err(|source| StrMapError::Alloc {
            what: "bucket array",
            source,
        })?;
    buckets.resize(n.get(), None);
    Ok(buckets)
}

fn dup_key(key: &str) -> Result<Box<str>> {
    let mut owned = String::new();
    owned
        .try_reserve_exact(key.len())
        .map_err(|source| StrMapError::Alloc {
            what: "key copy",
            source,
        })?;
    owned.push_str(key);
    Ok(owned.into_boxed_str())
}

/// Hash table mapping string keys to values of type `V`.
///
/// Every bucket chain is kept in ascending byte order of its keys, both by
/// `put` and by `resize`. The table never grows or shrinks on its own: call
/// [`StrMap::resize`] to rebalance toward a target load factor.
pub struct StrMap<V, H = MultiplicativeHash> {
    hasher: H,
    config: TableConfig,
    nbuckets: NonZeroUsize,
    buckets: Vec<Link>,
    slots: Slots<V>,
}

impl<V> StrMap<V> {
    /// Create a table with `requested_buckets` clamped to the default bounds.
    pub fn new(requested_buckets: usize) -> Result<Self> {
        Self::with_config(requested_buckets, TableConfig::default())
    }

    /// Create a table whose clamp bounds and slop come from `config`.
    pub fn with_config(requested_buckets: usize, config: TableConfig) -> Result<Self> {
        Self::with_hasher(requested_buckets, config, MultiplicativeHash::default())
    }
}

impl<V, H: BucketHash> StrMap<V, H> {
    /// Create a table that places keys with `hasher` instead of the default.
    pub fn with_hasher(requested_buckets: usize, config: TableConfig, hasher: H) -> Result<Self> {
        let nbuckets = config.clamp_buckets(requested_buckets);
        let buckets = alloc_buckets(nbuckets)?;
        debug!(
            "strmap: created with {} buckets (requested {})",
            nbuckets, requested_buckets
        );
        Ok(Self {
            hasher,
            config,
            nbuckets,
            buckets,
            slots: SlotMap::with_key(),
        })
    }

    #[inline]
    fn bucket_of(&self, key: &str) -> usize {
        bucket_index(&self.hasher, key.as_bytes(), self.nbuckets)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn bucket_count(&self) -> usize {
        self.nbuckets.get()
    }

    pub fn load_factor(&self) -> f64 {
        self.len() as f64 / self.bucket_count() as f64
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Insert or update. Returns the value previously stored under `key`.
    ///
    /// Updating an existing key replaces only the value; the stored key and
    /// its chain position are untouched and nothing is allocated.
    pub fn put(&mut self, key: &str, value: V) -> Result<Option<V>> {
        let idx = self.bucket_of(key);
        match probe(&self.slots, self.buckets[idx], key) {
            Probe::Found { at, .. } => {
                let old = core::mem::replace(&mut self.slots[at].value, value);
                Ok(Some(old))
            }
            Probe::Missing { prev, next } => {
                let key = dup_key(key)?;
                let node = self.slots.insert(Entry {
                    key,
                    value,
                    next: None,
                });
                splice(&mut self.slots, &mut self.buckets[idx], prev, node, next);
                Ok(None)
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        match probe(&self.slots, self.buckets[self.bucket_of(key)], key) {
            Probe::Found { at, .. } => Some(&self.slots[at].value),
            Probe::Missing { .. } => None,
        }
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        match probe(&self.slots, self.buckets[self.bucket_of(key)], key) {
            Probe::Found { at, .. } => Some(&mut self.slots[at].value),
            Probe::Missing { .. } => None,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Remove `key` and hand its value back. Absent keys leave the table
    /// unchanged.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let idx = self.bucket_of(key);
        let Probe::Found { prev, at } = probe(&self.slots, self.buckets[idx], key) else {
            return None;
        };
        let next = self.slots[at].next;
        match prev {
            None => self.buckets[idx] = next,
            Some(p) => self.slots[p].next = next,
        }
        self.slots.remove(at).map(|e| e.value)
    }

    /// Rebuild the bucket array so the load factor approaches `target`.
    ///
    /// Does nothing while the current load factor is within the configured
    /// slop of `target`. Otherwise the new bucket count is
    /// `floor(len / target)`, clamped to the configured bounds, and every
    /// entry is relinked into its new bucket in sorted position. On error
    /// the table is unchanged.
    pub fn resize(&mut self, target: f64) -> Result<()> {
        if !(target > 0.0 && target.is_finite()) {
            return Err(StrMapError::InvalidLoadFactor(target));
        }
        let (min_lf, max_lf) = self.config.hysteresis_band(target);
        let lf = self.load_factor();
        if min_lf <= lf && lf <= max_lf {
            trace!(
                "strmap: load factor {:.3} within [{:.3}, {:.3}], skipping resize",
                lf,
                min_lf,
                max_lf
            );
            return Ok(());
        }

        // `as` saturates, so huge ratios land on the upper clamp.
        let wanted = (self.len() as f64 / target).floor() as usize;
        let nbuckets = self.config.clamp_buckets(wanted);
        let mut fresh = alloc_buckets(nbuckets)?;

        // Prepend each entry onto its new chain, then sort each chain once.
        for &head in &self.buckets {
            let mut cur = head;
            while let Some(node) = cur {
                let entry = &mut self.slots[node];
                cur = entry.next;
                let idx = bucket_index(&self.hasher, entry.key.as_bytes(), nbuckets);
                entry.next = fresh[idx];
                fresh[idx] = Some(node);
            }
        }
        let mut chain = Vec::new();
        for head in fresh.iter_mut() {
            chain.clear();
            let mut cur = *head;
            while let Some(node) = cur {
                chain.push(node);
                cur = self.slots[node].next;
            }
            if chain.len() < 2 {
                continue;
            }
            chain.sort_unstable_by(|&a, &b| self.slots[a].key.cmp(&self.slots[b].key));
            *head = None;
            for &node in chain.iter().rev() {
                self.slots[node].next = *head;
                *head = Some(node);
            }
        }

        debug!(
            "strmap: rebuilt {} -> {} buckets for {} entries (target load {})",
            self.nbuckets,
            nbuckets,
            self.len(),
            target
        );
        self.buckets = fresh;
        self.nbuckets = nbuckets;
        Ok(())
    }

    /// Entries of bucket `index` in chain order. Out-of-range indices yield
    /// an empty chain.
    pub fn chain(&self, index: usize) -> Chain<'_, V> {
        Chain {
            slots: &self.slots,
            cur: self.buckets.get(index).copied().flatten(),
        }
    }

    /// Non-empty buckets with their index, in bucket order.
    pub fn chains(&self) -> Chains<'_, V> {
        Chains {
            slots: &self.slots,
            heads: self.buckets.iter().enumerate(),
        }
    }

    /// All entries, bucket by bucket, each bucket in chain order.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            chains: self.chains(),
            current: None,
        }
    }

    /// Diagnostic listing of the whole table; see [`Dump`].
    pub fn dump(&self) -> Dump<'_, V, H> {
        Dump { map: self }
    }
}

impl<V: fmt::Debug, H: BucketHash> fmt::Debug for StrMap<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, V, H: BucketHash> IntoIterator for &'a StrMap<V, H> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over one bucket chain.
pub struct Chain<'a, V> {
    slots: &'a Slots<V>,
    cur: Link,
}

impl<'a, V> Iterator for Chain<'a, V> {
    type Item = (&'a str, &'a V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let slots = self.slots;
        let e = slots.get(self.cur?)?;
        self.cur = e.next;
        Some((&*e.key, &e.value))
    }
}

/// Iterator over the non-empty buckets of a table.
pub struct Chains<'a, V> {
    slots: &'a Slots<V>,
    heads: core::iter::Enumerate<core::slice::Iter<'a, Link>>,
}

impl<'a, V> Iterator for Chains<'a, V> {
    type Item = (usize, Chain<'a, V>);
    fn next(&mut self) -> Option<Self::Item> {
        let slots = self.slots;
        self.heads
            .find_map(|(i, &head)| head.map(|k| (i, Chain { slots, cur: Some(k) })))
    }
}

/// Iterator over all entries of a table.
pub struct Iter<'a, V> {
    chains: Chains<'a, V>,
    current: Option<Chain<'a, V>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.current.as_mut().and_then(|c| c.next()) {
                return Some(item);
            }
            let (_, chain) = self.chains.next()?;
            self.current = Some(chain);
        }
    }
}

/// `Display` adapter listing every non-empty bucket:
///
/// ```text
/// Total Elements = 2.
/// Bucket 0:
///     banana->2
/// Bucket 3:
///     apple->1
/// ```
pub struct Dump<'a, V, H> {
    map: &'a StrMap<V, H>,
}

impl<V: fmt::Debug, H: BucketHash> fmt::Display for Dump<'_, V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total Elements = {}.", self.map.len())?;
        for (i, chain) in self.map.chains() {
            writeln!(f, "Bucket {}:", i)?;
            for (k, v) in chain {
                writeln!(f, "    {}->{:?}", k, v)?;
            }
        }
        Ok(())
    }
}

//! ChainedTable - the bucket table behind every container
//!
//! Entries live in a slot arena. Each bucket holds the index of the first
//! slot in its chain and each entry links to the next slot of the same
//! bucket. Removing a key pushes its slot onto a free list for reuse, and a
//! resize only rewrites links: an entry never moves to another slot while it
//! is live.
//!
//! Growth follows [`MapConfig`]: once an insert would push the live count
//! past `load_factor * buckets`, the bucket array grows by `growth_factor`.

use ahash::RandomState;
use std::fmt;
use std::hash::{BuildHasher, Hasher};
use std::iter::FusedIterator;

use super::element::TableKey;
use crate::config::{Config, MapConfig};

/// End-of-chain marker
const NIL: usize = usize::MAX;

/// Fixed seeds keep bucket order reproducible between runs
const HASH_SEEDS: [u64; 4] = [
    0x243f_6a88_85a3_08d3,
    0x1319_8a2e_0370_7344,
    0xa409_3822_299f_31d0,
    0x082e_fa98_ec4e_6c89,
];

#[derive(Clone)]
struct Entry<K, V> {
    key: K,
    value: V,
    /// Next slot in the same bucket
    next: usize,
}

#[derive(Clone)]
enum Slot<K, V> {
    Occupied(Entry<K, V>),
    Vacant { next_free: usize },
}

/// Chained hash table over a slot arena
#[derive(Clone)]
pub struct ChainedTable<K, V> {
    buckets: Vec<usize>,
    slots: Vec<Slot<K, V>>,
    free_head: usize,
    len: usize,
    max_load: usize,
    config: MapConfig,
    hasher: RandomState,
}

#[inline]
fn hash_of<K: TableKey>(hasher: &RandomState, key: &K) -> u64 {
    let mut state = hasher.build_hasher();
    key.hash_key(&mut state);
    state.finish()
}

impl<K: TableKey, V> ChainedTable<K, V> {
    /// Create an empty table with default sizing
    pub fn new() -> Self {
        Self::with_config(MapConfig::default())
    }

    /// Create an empty table that holds `capacity` entries before resizing
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(MapConfig::with_capacity(capacity))
    }

    /// Create an empty table with custom sizing.
    ///
    /// An invalid configuration is replaced by the defaults.
    pub fn with_config(config: MapConfig) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(e) => {
                log::warn!("Ignoring map configuration: {}", e);
                MapConfig::default()
            }
        };
        let cap = config.initial_capacity;

        Self {
            buckets: vec![NIL; cap],
            slots: Vec::new(),
            free_head: NIL,
            len: 0,
            max_load: config.max_load(cap),
            config,
            hasher: RandomState::with_seeds(
                HASH_SEEDS[0],
                HASH_SEEDS[1],
                HASH_SEEDS[2],
                HASH_SEEDS[3],
            ),
        }
    }

    /// Number of live entries
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bucket count
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Live entries per bucket
    pub fn load_factor(&self) -> f32 {
        self.len as f32 / self.buckets.len() as f32
    }

    /// Sizing in effect for this table
    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    /// Number of vacated slots waiting for reuse
    pub fn vacant_slots(&self) -> usize {
        self.slots.len() - self.len
    }

    #[inline]
    fn bucket_for(&self, key: &K) -> usize {
        (hash_of(&self.hasher, key) % self.buckets.len() as u64) as usize
    }

    fn find_slot(&self, key: &K) -> Option<usize> {
        let mut cur = self.buckets[self.bucket_for(key)];
        while cur != NIL {
            match &self.slots[cur] {
                Slot::Occupied(entry) => {
                    if entry.key.key_eq(key) {
                        return Some(cur);
                    }
                    cur = entry.next;
                }
                Slot::Vacant { .. } => break,
            }
        }
        None
    }

    /// Get reference to value by key
    pub fn get(&self, key: &K) -> Option<&V> {
        let idx = self.find_slot(key)?;
        match &self.slots[idx] {
            Slot::Occupied(entry) => Some(&entry.value),
            Slot::Vacant { .. } => None,
        }
    }

    /// Get mutable reference to value by key
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let idx = self.find_slot(key)?;
        match &mut self.slots[idx] {
            Slot::Occupied(entry) => Some(&mut entry.value),
            Slot::Vacant { .. } => None,
        }
    }

    /// Check if the table contains key
    pub fn contains_key(&self, key: &K) -> bool {
        self.find_slot(key).is_some()
    }

    /// Insert key-value pair, returns old value if key existed
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(idx) = self.find_slot(&key) {
            if let Slot::Occupied(entry) = &mut self.slots[idx] {
                return Some(std::mem::replace(&mut entry.value, value));
            }
        }
        self.insert_new(key, value);
        None
    }

    /// Mutable reference to the value for `key`, inserting `default` first
    /// when the key is absent
    pub fn get_or_insert(&mut self, key: K, default: V) -> &mut V {
        let idx = match self.find_slot(&key) {
            Some(idx) => idx,
            None => self.insert_new(key, default),
        };
        match &mut self.slots[idx] {
            Slot::Occupied(entry) => &mut entry.value,
            Slot::Vacant { .. } => unreachable!("slot {} was just linked", idx),
        }
    }

    /// Remove key-value pair, returns value if existed
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let bucket = self.bucket_for(key);
        let mut prev = NIL;
        let mut cur = self.buckets[bucket];

        while cur != NIL {
            let (matched, next) = match &self.slots[cur] {
                Slot::Occupied(entry) => (entry.key.key_eq(key), entry.next),
                Slot::Vacant { .. } => break,
            };

            if matched {
                if prev == NIL {
                    self.buckets[bucket] = next;
                } else if let Slot::Occupied(prev_entry) = &mut self.slots[prev] {
                    prev_entry.next = next;
                }

                let freed = std::mem::replace(
                    &mut self.slots[cur],
                    Slot::Vacant {
                        next_free: self.free_head,
                    },
                );
                self.free_head = cur;
                self.len -= 1;

                return match freed {
                    Slot::Occupied(entry) => Some(entry.value),
                    Slot::Vacant { .. } => None,
                };
            }

            prev = cur;
            cur = next;
        }
        None
    }

    /// Clear all entries, keeping the bucket array
    pub fn clear(&mut self) {
        self.buckets.fill(NIL);
        self.slots.clear();
        self.free_head = NIL;
        self.len = 0;
    }

    /// Reserve room for at least `additional` more entries without resizing
    pub fn reserve(&mut self, additional: usize) {
        let wanted = self.len + additional;
        if wanted > self.max_load {
            let buckets = (wanted as f64 / self.config.load_factor as f64).ceil() as usize;
            self.rehash(buckets.max(self.buckets.len() + 1));
        }
        self.slots.reserve(additional.saturating_sub(self.vacant_slots()));
    }

    /// Iterate entries in bucket-then-chain order
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            table: self,
            bucket: 0,
            cursor: NIL,
            remaining: self.len,
        }
    }

    /// Mutable access to every live value, in slot order
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> + '_ {
        self.slots.iter_mut().filter_map(|slot| match slot {
            Slot::Occupied(entry) => Some(&mut entry.value),
            Slot::Vacant { .. } => None,
        })
    }

    // Internal: link a key known to be absent, returns its slot
    fn insert_new(&mut self, key: K, value: V) -> usize {
        if self.len + 1 > self.max_load {
            let grown = self.config.grown(self.buckets.len());
            self.rehash(grown);
        }

        let bucket = self.bucket_for(&key);
        let entry = Entry {
            key,
            value,
            next: self.buckets[bucket],
        };

        let idx = if self.free_head != NIL {
            let idx = self.free_head;
            if let Slot::Vacant { next_free } = self.slots[idx] {
                self.free_head = next_free;
            }
            self.slots[idx] = Slot::Occupied(entry);
            idx
        } else {
            self.slots.push(Slot::Occupied(entry));
            self.slots.len() - 1
        };

        self.buckets[bucket] = idx;
        self.len += 1;
        idx
    }

    // Internal: rebuild bucket links for a new bucket count
    fn rehash(&mut self, new_size: usize) {
        log::trace!(
            "Rehashing table: {} -> {} buckets, {} entries",
            self.buckets.len(),
            new_size,
            self.len
        );

        let mut buckets = vec![NIL; new_size];
        let hasher = &self.hasher;
        for (idx, slot) in self.slots.iter_mut().enumerate() {
            if let Slot::Occupied(entry) = slot {
                let bucket = (hash_of(hasher, &entry.key) % new_size as u64) as usize;
                entry.next = buckets[bucket];
                buckets[bucket] = idx;
            }
        }

        self.buckets = buckets;
        self.max_load = self.config.max_load(new_size);
    }
}

impl<K: TableKey, V> Default for ChainedTable<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: TableKey, V: fmt::Debug> fmt::Debug for ChainedTable<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Single-pass iterator over a table's entries
pub struct Iter<'a, K, V> {
    table: &'a ChainedTable<K, V>,
    bucket: usize,
    cursor: usize,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.cursor != NIL {
                if let Slot::Occupied(entry) = &self.table.slots[self.cursor] {
                    self.cursor = entry.next;
                    self.remaining -= 1;
                    return Some((&entry.key, &entry.value));
                }
                self.cursor = NIL;
            }
            if self.bucket >= self.table.buckets.len() {
                return None;
            }
            self.cursor = self.table.buckets[self.bucket];
            self.bucket += 1;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}

impl<'a, K, V> FusedIterator for Iter<'a, K, V> {}

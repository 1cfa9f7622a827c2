//! Hash maps keyed and valued by primitive numbers
//!
//! Lookups of missing keys return the value type's zero instead of an
//! `Option`, which makes the maps natural sparse vectors and counters.

use std::fmt;

use super::codec::{decode_records, read_count, write_count, WireCodec};
use super::element::{Numeric, PrimitiveKey};
use super::lazy::{LazyContainer, LazyTable};
use super::vector::VectorOps;
use crate::config::{DecodeOptions, MapConfig};
use crate::error::Result;
use crate::io::{DataInput, DataOutput};

/// Map from a primitive key to a numeric value with zero-sentinel reads
///
/// # Examples
///
/// ```rust
/// use primap::{IntIntMap, VectorOps};
///
/// let mut counts = IntIntMap::new();
/// counts.increment(7);
/// counts.increment_by(7, 2);
/// assert_eq!(counts.get(7), 3);
/// assert_eq!(counts.get(8), 0);
/// ```
#[derive(Clone)]
pub struct PrimitiveHashMap<K: PrimitiveKey, V: Numeric> {
    store: LazyTable<K, V>,
}

/// i32 -> i32
pub type IntIntMap = PrimitiveHashMap<i32, i32>;
/// i32 -> f32
pub type IntFloatMap = PrimitiveHashMap<i32, f32>;
/// i32 -> f64
pub type IntDoubleMap = PrimitiveHashMap<i32, f64>;
/// i32 -> i64
pub type IntLongMap = PrimitiveHashMap<i32, i64>;
/// i64 -> i32
pub type LongIntMap = PrimitiveHashMap<i64, i32>;
/// i64 -> f32
pub type LongFloatMap = PrimitiveHashMap<i64, f32>;
/// i16 -> i32
pub type ShortIntMap = PrimitiveHashMap<i16, i32>;
/// i16 -> f32
pub type ShortFloatMap = PrimitiveHashMap<i16, f32>;

impl<K: PrimitiveKey, V: Numeric> PrimitiveHashMap<K, V> {
    /// Create an empty map with default sizing
    pub fn new() -> Self {
        Self::with_config(MapConfig::default())
    }

    /// Create an empty map sized for `capacity` entries without growing
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(MapConfig::with_capacity(capacity))
    }

    /// Create an empty map with explicit sizing
    pub fn with_config(config: MapConfig) -> Self {
        Self {
            store: LazyTable::new(config),
        }
    }

    /// Associate `value` with `key`, returning the previous value or zero
    pub fn put(&mut self, key: K, value: V) -> V {
        self.store.table_mut().insert(key, value).unwrap_or(V::ZERO)
    }

    /// Value for `key`, or zero when absent
    #[inline]
    pub fn get(&self, key: K) -> V {
        self.store.table().get(&key).copied().unwrap_or(V::ZERO)
    }

    /// Whether `key` has an entry. A stored zero still counts.
    #[inline]
    pub fn contains_key(&self, key: K) -> bool {
        self.store.table().contains_key(&key)
    }

    /// Remove `key`, returning its value or zero
    pub fn remove(&mut self, key: K) -> V {
        self.store.table_mut().remove(&key).unwrap_or(V::ZERO)
    }

    /// Number of entries. Does not decode a pending map.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Remove all entries
    pub fn clear(&mut self) {
        self.store.clear();
    }

    /// Single-pass iterator over `(key, value)` pairs in table order
    pub fn entries(&self) -> impl Iterator<Item = (K, V)> + '_ {
        self.store.iter().map(|(k, v)| (*k, *v))
    }

    /// Keys in table order
    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.store.iter().map(|(k, _)| *k)
    }

    /// Values in table order
    pub fn values(&self) -> impl Iterator<Item = V> + '_ {
        self.store.iter().map(|(_, v)| *v)
    }

    /// Number of buckets
    pub fn capacity(&self) -> usize {
        self.store.table().capacity()
    }

    /// Current entries per bucket
    pub fn load_factor(&self) -> f32 {
        self.store.table().load_factor()
    }
}

impl<K: PrimitiveKey, V: Numeric> LazyContainer<K, V> for PrimitiveHashMap<K, V> {
    fn store(&self) -> &LazyTable<K, V> {
        &self.store
    }
}

impl<K: PrimitiveKey, V: Numeric> VectorOps<K, V> for PrimitiveHashMap<K, V> {
    fn store_mut(&mut self) -> &mut LazyTable<K, V> {
        &mut self.store
    }
}

impl<K: PrimitiveKey, V: Numeric> WireCodec for PrimitiveHashMap<K, V> {
    fn serialize<O: DataOutput + ?Sized>(&self, out: &mut O) -> Result<()> {
        write_count(out, self.store.len())?;
        self.store.try_for_each_raw(|key, value| {
            key.write_value(out)?;
            value.write_value(out)
        })
    }

    fn deserialize<I: DataInput + ?Sized>(input: &mut I, options: &DecodeOptions) -> Result<Self> {
        let count = read_count(input)?;
        let store = decode_records(input, count, options, MapConfig::default(), |input| {
            let key = K::read_value(input)?;
            let value = V::read_value(input)?;
            Ok((key, value))
        })?;
        Ok(Self { store })
    }
}

impl<K: PrimitiveKey, V: Numeric> Default for PrimitiveHashMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: PrimitiveKey, V: Numeric> PartialEq for PrimitiveHashMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        let other = other.store.table();
        self.store
            .iter()
            .all(|(k, v)| other.get(k).map_or(false, |o| o == v))
    }
}

impl<K: PrimitiveKey, V: Numeric> fmt::Debug for PrimitiveHashMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries()).finish()
    }
}

impl<K: PrimitiveKey, V: Numeric> FromIterator<(K, V)> for PrimitiveHashMap<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: PrimitiveKey, V: Numeric> Extend<(K, V)> for PrimitiveHashMap<K, V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        let iter = iter.into_iter();
        let table = self.store.table_mut();
        table.reserve(iter.size_hint().0);
        for (key, value) in iter {
            table.insert(key, value);
        }
    }
}

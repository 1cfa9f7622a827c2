//! Hash map with generic keys and a single recorded key type on the wire

use std::fmt;

use super::codec::{decode_records, homogeneous_tag, read_count, read_tag, write_count, WireCodec};
use super::element::{Numeric, WireKey, WireValue};
use super::lazy::{LazyContainer, LazyTable};
use super::table::Iter;
use super::vector::VectorOps;
use crate::config::{DecodeOptions, MapConfig};
use crate::error::Result;
use crate::io::{DataInput, DataOutput};

/// Map from a generic key to any wire value
///
/// Lookups return `Option`. With numeric values the map also acts as a
/// sparse vector through [`VectorOps`].
///
/// # Examples
///
/// ```rust
/// use primap::{DecodeOptions, StringIntMap, VectorOps, WireCodec};
///
/// let mut map = StringIntMap::new();
/// map.put("hi".to_string(), 5);
/// map.increment("there".to_string());
///
/// let bytes = map.to_bytes().unwrap();
/// let copy = StringIntMap::from_bytes(&bytes, &DecodeOptions::lazy()).unwrap();
/// assert_eq!(copy.get(&"hi".to_string()), Some(&5));
/// ```
#[derive(Clone)]
pub struct ObjectHashMap<K: WireKey, V> {
    store: LazyTable<K, V>,
}

/// String -> i32
pub type StringIntMap = ObjectHashMap<String, i32>;
/// String -> f32
pub type StringFloatMap = ObjectHashMap<String, f32>;
/// String -> f64
pub type StringDoubleMap = ObjectHashMap<String, f64>;
/// String -> i64
pub type StringLongMap = ObjectHashMap<String, i64>;

impl<K: WireKey, V> ObjectHashMap<K, V> {
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

    /// Associate `value` with `key`, returning the previous value
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        self.store.table_mut().insert(key, value)
    }

    /// Value for `key`
    pub fn get(&self, key: &K) -> Option<&V> {
        self.store.table().get(key)
    }

    /// Mutable value for `key`
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.store.table_mut().get_mut(key)
    }

    /// Whether `key` has an entry
    pub fn contains_key(&self, key: &K) -> bool {
        self.store.table().contains_key(key)
    }

    /// Remove `key`, returning its value
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.store.table_mut().remove(key)
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

    /// Iterator over `(&key, &value)` in table order
    pub fn entries(&self) -> Iter<'_, K, V> {
        self.store.iter()
    }

    /// Keys in table order
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.store.iter().map(|(k, _)| k)
    }

    /// Values in table order
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.store.iter().map(|(_, v)| v)
    }

    /// Number of buckets
    pub fn capacity(&self) -> usize {
        self.store.table().capacity()
    }
}

impl<K: WireKey, V> LazyContainer<K, V> for ObjectHashMap<K, V> {
    fn store(&self) -> &LazyTable<K, V> {
        &self.store
    }
}

impl<K: WireKey, V: Numeric> VectorOps<K, V> for ObjectHashMap<K, V> {
    fn store_mut(&mut self) -> &mut LazyTable<K, V> {
        &mut self.store
    }
}

impl<K: WireKey, V: WireValue> WireCodec for ObjectHashMap<K, V> {
    fn serialize<O: DataOutput + ?Sized>(&self, out: &mut O) -> Result<()> {
        let tag = homogeneous_tag(&self.store)?;
        write_count(out, self.store.len())?;
        if let Some(tag) = tag {
            out.write_utf(tag)?;
        }
        self.store.try_for_each_raw(|key, value| {
            key.write_key(out)?;
            value.write_value(out)
        })
    }

    fn deserialize<I: DataInput + ?Sized>(input: &mut I, options: &DecodeOptions) -> Result<Self> {
        let count = read_count(input)?;
        if count == 0 {
            return Ok(Self::new());
        }

        let tag = read_tag::<K, I>(input)?;
        let store = decode_records(input, count, options, MapConfig::default(), |input| {
            let key = K::read_key(&tag, input)?;
            let value = V::read_value(input)?;
            Ok((key, value))
        })?;
        Ok(Self { store })
    }
}

impl<K: WireKey, V> Default for ObjectHashMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: WireKey, V: PartialEq> PartialEq for ObjectHashMap<K, V> {
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

impl<K: WireKey, V: fmt::Debug> fmt::Debug for ObjectHashMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries()).finish()
    }
}

impl<K: WireKey, V> FromIterator<(K, V)> for ObjectHashMap<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: WireKey, V> Extend<(K, V)> for ObjectHashMap<K, V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        let iter = iter.into_iter();
        let table = self.store.table_mut();
        table.reserve(iter.size_hint().0);
        for (key, value) in iter {
            table.insert(key, value);
        }
    }
}

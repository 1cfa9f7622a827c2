//! Deferred materialization for decoded containers
//!
//! A [`LazyTable`] is in exactly one of two states:
//!
//! - **materialized**: the bucket table is built and no raw payload is held
//! - **pending**: the raw key and value arrays read from the wire are held
//!   and the table has not been built
//!
//! The transition is one-way. It happens on an explicit [`LazyTable::decode`]
//! or on the first read or write that needs the table, including reads
//! through a shared reference. Serializing or folding a pending table into
//! another container reads the raw arrays and leaves the state untouched.

use once_cell::unsync::OnceCell;
use std::cell::{Ref, RefCell};

use super::element::TableKey;
use super::table::{ChainedTable, Iter};
use crate::config::MapConfig;

/// Raw parallel key and value arrays of a container that was decoded lazily
#[derive(Debug, Clone, PartialEq)]
pub struct LazyPayload<K, V> {
    keys: Vec<K>,
    values: Vec<V>,
}

impl<K, V> LazyPayload<K, V> {
    /// Create an empty payload with room for `capacity` records
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            keys: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
        }
    }

    /// Append one record in wire order
    pub fn push(&mut self, key: K, value: V) {
        self.keys.push(key);
        self.values.push(value);
    }

    /// Number of records held
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Raw keys in wire order
    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    /// Raw values in wire order
    pub fn values(&self) -> &[V] {
        &self.values
    }

    /// Records as `(key, value)` pairs in wire order
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.keys.iter().zip(self.values.iter())
    }
}

/// Storage shared by every container: a chained table that may still be
/// waiting to be built from a raw payload
#[derive(Clone)]
pub struct LazyTable<K, V> {
    table: OnceCell<ChainedTable<K, V>>,
    payload: RefCell<Option<LazyPayload<K, V>>>,
    config: MapConfig,
}

impl<K: TableKey, V> LazyTable<K, V> {
    /// Create an empty, materialized table
    pub fn new(config: MapConfig) -> Self {
        let table = ChainedTable::with_config(config.clone());
        Self {
            table: OnceCell::with_value(table),
            payload: RefCell::new(None),
            config,
        }
    }

    /// Wrap an already built table
    pub fn from_table(table: ChainedTable<K, V>) -> Self {
        let config = table.config().clone();
        Self {
            table: OnceCell::with_value(table),
            payload: RefCell::new(None),
            config,
        }
    }

    /// Create a pending table holding `payload`
    pub fn pending(payload: LazyPayload<K, V>, config: MapConfig) -> Self {
        Self {
            table: OnceCell::new(),
            payload: RefCell::new(Some(payload)),
            config,
        }
    }

    /// Whether the table still waits to be built from its payload
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.table.get().is_none()
    }

    /// Logical entry count in either state
    pub fn len(&self) -> usize {
        match self.table.get() {
            Some(table) => table.len(),
            None => self.payload.borrow().as_ref().map_or(0, LazyPayload::len),
        }
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sizing used when the table is built
    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    /// Build the table from the payload if still pending; no-op otherwise
    pub fn decode(&self) {
        self.table();
    }

    /// The bucket table, built on first access
    pub fn table(&self) -> &ChainedTable<K, V> {
        self.table.get_or_init(|| self.materialize())
    }

    /// Mutable bucket table, built on first access
    pub fn table_mut(&mut self) -> &mut ChainedTable<K, V> {
        self.decode();
        self.table
            .get_mut()
            .expect("decode() always leaves the table initialized")
    }

    /// Raw payload while pending.
    ///
    /// The returned guard must be dropped before the table is built, so it
    /// stays inside the crate and is never held across a call that decodes.
    pub(crate) fn payload(&self) -> Option<Ref<'_, LazyPayload<K, V>>> {
        Ref::filter_map(self.payload.borrow(), Option::as_ref).ok()
    }

    /// Iterate entries, building the table first if needed
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.table().iter()
    }

    /// Visit every entry without changing the decode state.
    ///
    /// A pending table yields its raw records in wire order. `f` must not
    /// decode this table.
    pub(crate) fn try_for_each_raw<E, F>(&self, mut f: F) -> std::result::Result<(), E>
    where
        F: FnMut(&K, &V) -> std::result::Result<(), E>,
    {
        if let Some(table) = self.table.get() {
            for (key, value) in table.iter() {
                f(key, value)?;
            }
        } else if let Some(payload) = self.payload() {
            for (key, value) in payload.iter() {
                f(key, value)?;
            }
        }
        Ok(())
    }

    /// Drop all entries and any pending payload; the result is materialized
    pub fn clear(&mut self) {
        self.payload.get_mut().take();
        match self.table.get_mut() {
            Some(table) => table.clear(),
            None => {
                self.table = OnceCell::with_value(ChainedTable::with_config(self.config.clone()));
            }
        }
    }

    fn materialize(&self) -> ChainedTable<K, V> {
        let payload = self.payload.borrow_mut().take();
        let mut table = ChainedTable::with_config(self.config.clone());

        if let Some(payload) = payload {
            log::debug!("Materializing {} lazily decoded entries", payload.len());
            table.reserve(payload.len());
            for (key, value) in payload.keys.into_iter().zip(payload.values) {
                table.insert(key, value);
            }
        }
        table
    }
}

impl<K: TableKey, V> Default for LazyTable<K, V> {
    fn default() -> Self {
        Self::new(MapConfig::default())
    }
}

/// A container backed by a [`LazyTable`]
pub trait LazyContainer<K: TableKey, V> {
    /// The container's storage
    fn store(&self) -> &LazyTable<K, V>;

    /// Build the table if the container was decoded lazily. Idempotent.
    fn decode(&self) {
        self.store().decode();
    }

    /// Whether the container still holds an unbuilt payload
    fn is_pending(&self) -> bool {
        self.store().is_pending()
    }
}

//! Ordered snapshots of container contents

use super::element::{Numeric, TableKey};
use super::lazy::LazyContainer;

/// An owned `(key, value)` pair copied out of a container
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapEntry<K, V> {
    /// Entry key
    pub key: K,
    /// Entry value
    pub value: V,
}

impl<K, V> MapEntry<K, V> {
    /// Create an entry
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }
}

impl<K, V> From<MapEntry<K, V>> for (K, V) {
    fn from(entry: MapEntry<K, V>) -> Self {
        (entry.key, entry.value)
    }
}

/// Sorted extraction for any numeric-valued container.
///
/// Every method returns `None` for an empty container.
pub trait SortedView<K: TableKey, V: Numeric>: LazyContainer<K, V> {
    /// Entries ordered by descending value, ties by ascending key,
    /// truncated to the first `n` when given
    fn sorted_by_value(&self, n: Option<usize>) -> Option<Vec<MapEntry<K, V>>> {
        let mut entries = self.snapshot()?;
        entries.sort_by(|a, b| {
            b.value
                .value_cmp(&a.value)
                .then_with(|| a.key.key_cmp(&b.key))
        });
        if let Some(n) = n {
            entries.truncate(n);
        }
        Some(entries)
    }

    /// Entries ordered by ascending key
    fn sorted_by_key(&self) -> Option<Vec<MapEntry<K, V>>> {
        let mut entries = self.snapshot()?;
        entries.sort_by(|a, b| a.key.key_cmp(&b.key));
        Some(entries)
    }

    /// Unordered copy of every entry
    fn snapshot(&self) -> Option<Vec<MapEntry<K, V>>> {
        let table = self.store().table();
        if table.is_empty() {
            return None;
        }
        Some(
            table
                .iter()
                .map(|(k, v)| MapEntry::new(k.clone(), *v))
                .collect(),
        )
    }
}

impl<C, K, V> SortedView<K, V> for C
where
    C: LazyContainer<K, V> + ?Sized,
    K: TableKey,
    V: Numeric,
{
}

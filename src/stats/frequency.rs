//! Counting container with a running total

use std::fmt;

use crate::error::{PrimapError, Result};
use crate::hash_map::{LazyContainer, LazyTable, MapEntry, SortedView, TableKey};

/// Counts occurrences of events.
///
/// Counts are never negative and an event whose count reaches zero is
/// dropped. The sum of all counts is maintained on every update and can be
/// audited against the live entries with [`check`](Self::check).
#[derive(Clone)]
pub struct FrequencyDistribution<K: TableKey> {
    counts: LazyTable<K, i64>,
    sum: i64,
}

impl<K: TableKey> FrequencyDistribution<K> {
    /// Create an empty distribution
    pub fn new() -> Self {
        Self {
            counts: LazyTable::default(),
            sum: 0,
        }
    }

    /// Observe `event` once
    pub fn increment(&mut self, event: K) {
        let slot = self.counts.table_mut().get_or_insert(event, 0);
        *slot += 1;
        self.sum += 1;
    }

    /// Add `delta` to the count of `event`; a negative `delta` decrements
    pub fn increment_by(&mut self, event: K, delta: i64) -> Result<()> {
        let current = self.get(&event);
        let updated = current + delta;
        if updated < 0 {
            return Err(PrimapError::underflow(current, delta));
        }
        self.store_count(event, updated);
        self.sum += delta;
        Ok(())
    }

    /// Remove one observation of `event`
    pub fn decrement(&mut self, event: K) -> Result<()> {
        self.increment_by(event, -1)
    }

    /// Remove `count` observations of `event`
    pub fn decrement_by(&mut self, event: K, count: i64) -> Result<()> {
        self.increment_by(event, -count)
    }

    /// Overwrite the count of `event`, returning the previous count
    pub fn set(&mut self, event: K, count: i64) -> Result<i64> {
        if count < 0 {
            return Err(PrimapError::illegal_state(format!(
                "event count cannot be negative, got {}",
                count
            )));
        }
        let previous = self.get(&event);
        self.store_count(event, count);
        self.sum += count - previous;
        Ok(previous)
    }

    /// Count of `event`, zero when unseen
    pub fn get(&self, event: &K) -> i64 {
        self.counts.table().get(event).copied().unwrap_or(0)
    }

    /// Whether `event` has a positive count
    pub fn contains(&self, event: &K) -> bool {
        self.counts.table().contains_key(event)
    }

    /// Drop `event`, returning its count
    pub fn remove(&mut self, event: &K) -> i64 {
        let removed = self.counts.table_mut().remove(event).unwrap_or(0);
        self.sum -= removed;
        removed
    }

    /// Number of distinct events
    pub fn num_events(&self) -> usize {
        self.counts.len()
    }

    /// Total of all counts
    pub fn sum_of_counts(&self) -> i64 {
        self.sum
    }

    /// Share of all observations that were `event`; zero when empty
    pub fn relative_frequency(&self, event: &K) -> f64 {
        if self.sum == 0 {
            return 0.0;
        }
        self.get(event) as f64 / self.sum as f64
    }

    /// Natural log of [`relative_frequency`](Self::relative_frequency)
    pub fn log_relative_frequency(&self, event: &K) -> f64 {
        (self.get(event) as f64).ln() - (self.sum as f64).ln()
    }

    /// Events by descending count, ties by ascending key
    pub fn frequency_sorted(&self, n: Option<usize>) -> Option<Vec<MapEntry<K, i64>>> {
        self.sorted_by_value(n)
    }

    /// Events by ascending key
    pub fn sorted_events(&self) -> Option<Vec<MapEntry<K, i64>>> {
        self.sorted_by_key()
    }

    /// Iterate `(event, count)` pairs in table order
    pub fn entries(&self) -> impl Iterator<Item = (&K, i64)> + '_ {
        self.counts.iter().map(|(k, v)| (k, *v))
    }

    /// Add every count of `other` into `self`
    pub fn merge(&mut self, other: &Self) {
        let table = self.counts.table_mut();
        for (event, count) in other.counts.iter() {
            *table.get_or_insert(event.clone(), 0) += *count;
        }
        self.sum += other.sum;
    }

    /// Remove every event
    pub fn clear(&mut self) {
        self.counts.clear();
        self.sum = 0;
    }

    /// Verify the running sum against the live counts
    pub fn check(&self) -> Result<()> {
        let mut total = 0i64;
        for (event, count) in self.counts.iter() {
            if *count <= 0 {
                return Err(PrimapError::consistency(format!(
                    "event {:?} holds non-positive count {}",
                    event, count
                )));
            }
            total += *count;
        }
        if total != self.sum {
            return Err(PrimapError::consistency(format!(
                "running sum {} diverges from recomputed sum {}",
                self.sum, total
            )));
        }
        log::debug!(
            "Frequency distribution consistent: {} events, sum {}",
            self.counts.len(),
            total
        );
        Ok(())
    }

    fn store_count(&mut self, event: K, count: i64) {
        let table = self.counts.table_mut();
        if count == 0 {
            table.remove(&event);
        } else {
            table.insert(event, count);
        }
    }
}

impl<K: TableKey> LazyContainer<K, i64> for FrequencyDistribution<K> {
    fn store(&self) -> &LazyTable<K, i64> {
        &self.counts
    }
}

impl<K: TableKey> Default for FrequencyDistribution<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: TableKey> fmt::Debug for FrequencyDistribution<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrequencyDistribution")
            .field("events", &self.num_events())
            .field("sum", &self.sum)
            .finish()
    }
}

impl<K: TableKey> FromIterator<K> for FrequencyDistribution<K> {
    fn from_iter<T: IntoIterator<Item = K>>(iter: T) -> Self {
        let mut dist = Self::new();
        for event in iter {
            dist.increment(event);
        }
        dist
    }
}

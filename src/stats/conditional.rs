//! Counts of events under conditions, with marginals

use std::fmt;

use super::frequency::FrequencyDistribution;
use crate::error::{PrimapError, Result};
use crate::hash_map::{ChainedTable, TableKey};

/// Counts `(event | condition)` pairs.
///
/// Keeps one [`FrequencyDistribution`] per condition, the marginal
/// distribution of events summed over all conditions, and the grand total.
#[derive(Clone)]
pub struct ConditionalFrequencyDistribution<K: TableKey, C: TableKey> {
    conditionals: ChainedTable<C, FrequencyDistribution<K>>,
    marginals: FrequencyDistribution<K>,
    total: i64,
}

impl<K: TableKey, C: TableKey> ConditionalFrequencyDistribution<K, C> {
    /// Create an empty distribution
    pub fn new() -> Self {
        Self {
            conditionals: ChainedTable::new(),
            marginals: FrequencyDistribution::new(),
            total: 0,
        }
    }

    /// Overwrite the count of `event` under `condition`, returning the
    /// previous count
    pub fn set(&mut self, event: K, condition: C, count: i64) -> Result<i64> {
        if count < 0 {
            return Err(PrimapError::illegal_state(format!(
                "event count cannot be negative, got {}",
                count
            )));
        }
        let dist = self
            .conditionals
            .get_or_insert(condition.clone(), FrequencyDistribution::new());
        let previous = dist.set(event.clone(), count)?;
        let emptied = dist.num_events() == 0;
        if emptied {
            self.conditionals.remove(&condition);
        }

        let delta = count - previous;
        self.marginals.increment_by(event, delta)?;
        self.total += delta;
        Ok(previous)
    }

    /// Observe `event` under `condition` once
    pub fn increment(&mut self, event: K, condition: C) -> Result<()> {
        self.increment_by(event, condition, 1)
    }

    /// Add `delta` to the count of `event` under `condition`
    pub fn increment_by(&mut self, event: K, condition: C, delta: i64) -> Result<()> {
        let current = self.get(&event, &condition);
        if current + delta < 0 {
            return Err(PrimapError::underflow(current, delta));
        }
        self.set(event, condition, current + delta).map(|_| ())
    }

    /// Count of `event` under `condition`
    pub fn get(&self, event: &K, condition: &C) -> i64 {
        self.conditionals
            .get(condition)
            .map_or(0, |dist| dist.get(event))
    }

    /// Count of `event` summed over every condition
    pub fn marginal_count(&self, event: &K) -> i64 {
        self.marginals.get(event)
    }

    /// Marginal distribution of events
    pub fn marginals(&self) -> &FrequencyDistribution<K> {
        &self.marginals
    }

    /// Distribution of events under `condition`
    pub fn conditional(&self, condition: &C) -> Option<&FrequencyDistribution<K>> {
        self.conditionals.get(condition)
    }

    /// Number of conditions with at least one event
    pub fn num_conditions(&self) -> usize {
        self.conditionals.len()
    }

    /// Grand total of every count
    pub fn sum_of_all_counts(&self) -> i64 {
        self.total
    }

    /// `ln P(event | condition)`; negative infinity for unseen pairs
    pub fn log_probability(&self, event: &K, condition: &C) -> f64 {
        match self.conditionals.get(condition) {
            Some(dist) => dist.log_relative_frequency(event),
            None => f64::NEG_INFINITY,
        }
    }

    /// Remove everything
    pub fn clear(&mut self) {
        self.conditionals.clear();
        self.marginals.clear();
        self.total = 0;
    }

    /// Recompute every conditional sum, the marginals and the grand total
    /// from scratch and compare them with the maintained values
    pub fn check(&self) -> Result<()> {
        let mut recomputed: ChainedTable<K, i64> = ChainedTable::new();
        let mut total = 0i64;

        for (condition, dist) in self.conditionals.iter() {
            dist.check().map_err(|e| {
                PrimapError::consistency(format!("condition {:?}: {}", condition, e))
            })?;
            for (event, count) in dist.entries() {
                *recomputed.get_or_insert(event.clone(), 0) += count;
            }
            total += dist.sum_of_counts();
        }

        self.marginals.check()?;
        if recomputed.len() != self.marginals.num_events() {
            return Err(PrimapError::consistency(format!(
                "{} marginal events recorded, {} recomputed",
                self.marginals.num_events(),
                recomputed.len()
            )));
        }
        for (event, count) in recomputed.iter() {
            let recorded = self.marginals.get(event);
            if recorded != *count {
                return Err(PrimapError::consistency(format!(
                    "marginal of {:?} is {}, recomputed {}",
                    event, recorded, count
                )));
            }
        }
        if total != self.total || total != self.marginals.sum_of_counts() {
            return Err(PrimapError::consistency(format!(
                "grand total {} diverges from recomputed {}",
                self.total, total
            )));
        }

        log::debug!(
            "Conditional distribution consistent: {} conditions, total {}",
            self.conditionals.len(),
            total
        );
        Ok(())
    }
}

impl<K: TableKey, C: TableKey> Default for ConditionalFrequencyDistribution<K, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: TableKey, C: TableKey> fmt::Debug for ConditionalFrequencyDistribution<K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConditionalFrequencyDistribution")
            .field("conditions", &self.conditionals.len())
            .field("events", &self.marginals.num_events())
            .field("total", &self.total)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ConditionalFrequencyDistribution<i32, String> {
        let mut cfd = ConditionalFrequencyDistribution::new();
        cfd.set(1, "a".to_string(), 2).unwrap();
        cfd.set(2, "a".to_string(), 3).unwrap();
        cfd.set(1, "b".to_string(), 4).unwrap();
        cfd
    }

    #[test]
    fn test_counts_and_marginals() {
        let cfd = sample();
        assert_eq!(cfd.get(&1, &"a".to_string()), 2);
        assert_eq!(cfd.get(&2, &"b".to_string()), 0);
        assert_eq!(cfd.marginal_count(&1), 6);
        assert_eq!(cfd.marginal_count(&2), 3);
        assert_eq!(cfd.sum_of_all_counts(), 9);
        assert_eq!(cfd.num_conditions(), 2);
        assert_eq!(cfd.conditional(&"a".to_string()).unwrap().sum_of_counts(), 5);
        cfd.check().unwrap();
    }

    #[test]
    fn test_overwrite_adjusts_marginals() {
        let mut cfd = sample();
        assert_eq!(cfd.set(1, "b".to_string(), 1).unwrap(), 4);
        assert_eq!(cfd.marginal_count(&1), 3);
        assert_eq!(cfd.sum_of_all_counts(), 6);
        cfd.check().unwrap();

        cfd.set(1, "b".to_string(), 0).unwrap();
        assert!(cfd.conditional(&"b".to_string()).is_none());
        assert_eq!(cfd.marginal_count(&1), 2);
        cfd.check().unwrap();
    }

    #[test]
    fn test_increment() {
        let mut cfd = ConditionalFrequencyDistribution::new();
        for _ in 0..3 {
            cfd.increment(7i64, 1i32).unwrap();
        }
        cfd.increment_by(8, 1, 2).unwrap();
        cfd.increment_by(7, 2, 1).unwrap();
        assert_eq!(cfd.get(&7, &1), 3);
        assert_eq!(cfd.marginal_count(&7), 4);
        assert_eq!(cfd.sum_of_all_counts(), 6);

        assert!(matches!(
            cfd.increment_by(8, 1, -5),
            Err(PrimapError::Underflow { .. })
        ));
        assert_eq!(cfd.get(&8, &1), 2);
        cfd.check().unwrap();
    }

    #[test]
    fn test_log_probability() {
        let cfd = sample();
        let expected = (2.0f64 / 5.0).ln();
        assert!((cfd.log_probability(&1, &"a".to_string()) - expected).abs() < 1e-12);
        assert_eq!(cfd.log_probability(&1, &"z".to_string()), f64::NEG_INFINITY);
    }

    #[test]
    fn test_check_detects_divergence() {
        let mut cfd = sample();
        cfd.total += 1;
        assert!(matches!(cfd.check(), Err(PrimapError::Consistency { .. })));

        let mut cfd = sample();
        cfd.marginals.increment(99);
        assert!(cfd.check().is_err());
    }

    #[test]
    fn test_clear() {
        let mut cfd = sample();
        cfd.clear();
        assert_eq!(cfd.num_conditions(), 0);
        assert_eq!(cfd.sum_of_all_counts(), 0);
        cfd.check().unwrap();
    }
}

//! Sparse vector algebra over numeric-valued containers
//!
//! A container maps dimensions to coordinates; missing keys are zero.

use super::element::{Float, Numeric, TableKey};
use super::lazy::{LazyContainer, LazyTable};
use super::table::ChainedTable;
use crate::error::{PrimapError, Result};

/// Accumulator and vector operations shared by numeric-valued containers
pub trait VectorOps<K: TableKey, V: Numeric>: LazyContainer<K, V> {
    /// Mutable access to the container's storage
    fn store_mut(&mut self) -> &mut LazyTable<K, V>;

    /// Value for `key`, or zero when absent
    fn value_of(&self, key: &K) -> V {
        self.store().table().get(key).copied().unwrap_or(V::ZERO)
    }

    /// Add one to `key`
    fn increment(&mut self, key: K) {
        self.increment_by(key, V::ONE);
    }

    /// Add `delta` to `key`, treating a missing key as zero
    fn increment_by(&mut self, key: K, delta: V) {
        let slot = self.store_mut().table_mut().get_or_insert(key, V::ZERO);
        *slot = *slot + delta;
    }

    /// Add every entry of `other` into `self`.
    ///
    /// `self` ends materialized. A pending `other` is read from its raw
    /// payload and stays pending; a materialized `other` is iterated.
    fn plus(&mut self, other: &Self) {
        let source = other.store();
        let target = self.store_mut().table_mut();
        if source.is_pending() {
            fold_pending(target, source);
        } else {
            fold_table(target, source.table());
        }
    }

    /// Add the raw payload of a pending `other` into `self` without
    /// decoding `other`
    fn lazy_merge(&mut self, other: &Self) -> Result<()> {
        let source = other.store();
        if !source.is_pending() {
            return Err(PrimapError::illegal_state(
                "lazy merge requires an operand that has not been decoded",
            ));
        }
        fold_pending(self.store_mut().table_mut(), source);
        Ok(())
    }

    /// Inner product over the keys both containers share
    fn dot(&self, other: &Self) -> V {
        let (a, b) = (self.store().table(), other.store().table());
        let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };

        small.iter().fold(V::ZERO, |acc, (key, value)| match large.get(key) {
            Some(other) => acc + *value * *other,
            None => acc,
        })
    }

    /// Euclidean norm
    fn length(&self) -> V
    where
        V: Float,
    {
        let squares = self
            .store()
            .iter()
            .fold(V::ZERO, |acc, (_, value)| acc + *value * *value);
        squares.sqrt()
    }

    /// Scale every value so that `length()` becomes one.
    ///
    /// A zero-length vector is left untouched and reported as an error.
    fn normalize(&mut self) -> Result<()>
    where
        V: Float,
    {
        let length = self.length();
        if length == V::ZERO {
            return Err(PrimapError::illegal_state("cannot normalize a zero-length vector"));
        }
        for value in self.store_mut().table_mut().values_mut() {
            *value = *value / length;
        }
        Ok(())
    }
}

fn fold_table<K: TableKey, V: Numeric>(target: &mut ChainedTable<K, V>, source: &ChainedTable<K, V>) {
    for (key, value) in source.iter() {
        let slot = target.get_or_insert(key.clone(), V::ZERO);
        *slot = *slot + *value;
    }
}

fn fold_pending<K: TableKey, V: Numeric>(target: &mut ChainedTable<K, V>, source: &LazyTable<K, V>) {
    if let Some(payload) = source.payload() {
        log::trace!("Folding {} raw records without decoding", payload.len());
        target.reserve(payload.len());
        for (key, value) in payload.iter() {
            let slot = target.get_or_insert(key.clone(), V::ZERO);
            *slot = *slot + *value;
        }
    }
}

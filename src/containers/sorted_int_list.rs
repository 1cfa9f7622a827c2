//! Ascending list of `i32` with merge-join set operations

use std::ops::Index;

use crate::config::DecodeOptions;
use crate::error::{PrimapError, Result};
use crate::hash_map::{read_count, write_count, WireCodec};
use crate::io::{DataInput, DataOutput};

/// A list of `i32` kept in ascending order. Duplicates are allowed.
///
/// Intersection and merge walk both lists once with two cursors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SortedIntList {
    values: Vec<i32>,
}

impl SortedIntList {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty list with room for `capacity` values
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
        }
    }

    /// Sort `values` into a list
    pub fn from_unsorted(mut values: Vec<i32>) -> Self {
        values.sort_unstable();
        Self { values }
    }

    /// Insert `value` after any equal values
    pub fn insert(&mut self, value: i32) {
        let at = self.values.partition_point(|v| *v <= value);
        self.values.insert(at, value);
    }

    /// Binary search for `value`
    pub fn contains(&self, value: i32) -> bool {
        self.values.binary_search(&value).is_ok()
    }

    /// Number of values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at `index`
    pub fn get(&self, index: usize) -> Option<i32> {
        self.values.get(index).copied()
    }

    /// Smallest value
    pub fn first(&self) -> Option<i32> {
        self.values.first().copied()
    }

    /// Largest value
    pub fn last(&self) -> Option<i32> {
        self.values.last().copied()
    }

    /// Values in ascending order
    pub fn as_slice(&self) -> &[i32] {
        &self.values
    }

    /// Iterate in ascending order
    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, i32>> {
        self.values.iter().copied()
    }

    /// Values present in both lists, each matched at most once per occurrence
    pub fn intersection(&self, other: &Self) -> Self {
        let (a, b) = (&self.values, &other.values);
        let mut out = Vec::with_capacity(a.len().min(b.len()));
        let (mut i, mut j) = (0, 0);

        while i < a.len() && j < b.len() {
            match a[i].cmp(&b[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    out.push(a[i]);
                    i += 1;
                    j += 1;
                }
            }
        }
        Self { values: out }
    }

    /// All values of both lists in ascending order
    pub fn merge(&self, other: &Self) -> Self {
        let (a, b) = (&self.values, &other.values);
        let mut out = Vec::with_capacity(a.len() + b.len());
        let (mut i, mut j) = (0, 0);

        while i < a.len() && j < b.len() {
            if a[i] <= b[j] {
                out.push(a[i]);
                i += 1;
            } else {
                out.push(b[j]);
                j += 1;
            }
        }
        out.extend_from_slice(&a[i..]);
        out.extend_from_slice(&b[j..]);
        Self { values: out }
    }

    /// Take the underlying vector
    pub fn into_vec(self) -> Vec<i32> {
        self.values
    }
}

impl Index<usize> for SortedIntList {
    type Output = i32;

    fn index(&self, index: usize) -> &i32 {
        &self.values[index]
    }
}

impl FromIterator<i32> for SortedIntList {
    fn from_iter<T: IntoIterator<Item = i32>>(iter: T) -> Self {
        Self::from_unsorted(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a SortedIntList {
    type Item = i32;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, i32>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// `i32 count | count x i32`. Decoding rejects out-of-order values.
impl WireCodec for SortedIntList {
    fn serialize<O: DataOutput + ?Sized>(&self, out: &mut O) -> Result<()> {
        write_count(out, self.values.len())?;
        for value in &self.values {
            out.write_i32(*value)?;
        }
        Ok(())
    }

    fn deserialize<I: DataInput + ?Sized>(input: &mut I, _options: &DecodeOptions) -> Result<Self> {
        let count = read_count(input)?;
        let mut values = Vec::with_capacity(count.min(1 << 16));
        for _ in 0..count {
            let value = input.read_i32()?;
            if values.last().map_or(false, |last| *last > value) {
                return Err(PrimapError::format(format!(
                    "value {} follows a larger value in a sorted list",
                    value
                )));
            }
            values.push(value);
        }
        Ok(Self { values })
    }
}

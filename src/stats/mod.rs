//! Counting distributions built on the hash map family
//!
//! - **`FrequencyDistribution<K>`** - event counts with a maintained total
//! - **`ConditionalFrequencyDistribution<K, C>`** - per-condition counts with marginals
//!
//! Both provide a `check()` audit that recomputes their derived totals.

mod conditional;
mod frequency;

pub use conditional::ConditionalFrequencyDistribution;
pub use frequency::FrequencyDistribution;

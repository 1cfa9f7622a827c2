//! # Primap: Primitive-Specialized Hash Maps
//!
//! Hash map containers specialized by key and value type for high-volume
//! batch record processing, with a Java-compatible binary wire format and
//! sparse vector algebra.
//!
//! ## Key Features
//!
//! - **Unboxed Maps**: `i16`/`i32`/`i64` keys with integer or float values, zero-sentinel reads
//! - **Generic Keys**: string, pair and per-instance typed keys with one wire type tag
//! - **Lazy Decoding**: deserialize into raw arrays and build the table on first use
//! - **Vector Algebra**: `plus`, `dot`, `length`, `normalize` over sparse maps
//! - **Sorted Views**: descending-by-value snapshots with deterministic tie-breaks
//! - **Counting**: frequency and conditional frequency distributions with self-audits
//!
//! ## Quick Start
//!
//! ```rust
//! use primap::{
//!     DecodeOptions, IntFloatMap, LazyContainer, SortedView, StringIntMap, VectorOps, WireCodec,
//! };
//!
//! // Sparse vectors
//! let mut a = IntFloatMap::new();
//! a.put(1, 3.0);
//! a.put(2, 4.0);
//! assert_eq!(a.length(), 5.0);
//!
//! // Wire round trip with deferred materialization
//! let mut words = StringIntMap::new();
//! words.put("hi".to_string(), 5);
//! words.put("there".to_string(), 22);
//! let bytes = words.to_bytes().unwrap();
//! let copy = StringIntMap::from_bytes(&bytes, &DecodeOptions::lazy()).unwrap();
//! assert!(copy.is_pending());
//! assert_eq!(copy.len(), 2);
//!
//! // Ordered extraction
//! let top = copy.sorted_by_value(Some(1)).unwrap();
//! assert_eq!(top[0].key, "there");
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod containers;
pub mod error;
pub mod hash_map;
pub mod io;
pub mod stats;

// Re-export core types
pub use error::{PrimapError, Result};

pub use config::{Config, DecodeOptions, DecodePolicy, MapConfig};

pub use hash_map::{
    ChainedTable, DynKey, Float, IntDoubleMap, IntFloatMap, IntIntMap, IntLongMap, LazyContainer,
    LazyPayload, LazyTable, LongFloatMap, LongIntMap, MapEntry, Numeric, ObjectHashMap,
    PrimitiveHashMap, PrimitiveKey, ShortFloatMap, ShortIntMap, SortedView, StringDoubleMap,
    StringFloatMap, StringIntMap, StringLongMap, TableKey, VectorOps, WireCodec, WireKey,
    WireValue,
};

pub use io::{DataInput, DataOutput, ReaderDataInput, SliceDataInput, VecDataOutput, WriterDataOutput};

pub use stats::{ConditionalFrequencyDistribution, FrequencyDistribution};

pub use containers::SortedIntList;

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library (currently no-op, for future use)
pub fn init() {
    log::debug!("Initializing primap v{}", VERSION);
}

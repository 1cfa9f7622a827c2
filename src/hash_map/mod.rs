//! Primitive-specialized hash maps
//!
//! This module provides the container family and its shared machinery:
//! - `ChainedTable`: separate-chaining table over a slot arena with a free list
//! - `PrimitiveHashMap`: primitive keys and numeric values with zero-sentinel reads
//! - `ObjectHashMap`: generic keys with one key type recorded on the wire
//! - `LazyTable`: storage that can defer building the table after a decode
//! - `VectorOps` / `SortedView`: sparse vector algebra and ordered snapshots

mod codec;
mod element;
mod lazy;
mod object_map;
mod primitive_map;
mod sorted;
mod table;
mod vector;

pub use codec::WireCodec;
pub use element::{DynKey, Float, Numeric, PrimitiveKey, TableKey, WireKey, WireValue};
pub use lazy::{LazyContainer, LazyPayload, LazyTable};
pub use object_map::{ObjectHashMap, StringDoubleMap, StringFloatMap, StringIntMap, StringLongMap};
pub use primitive_map::{
    IntDoubleMap, IntFloatMap, IntIntMap, IntLongMap, LongFloatMap, LongIntMap, PrimitiveHashMap,
    ShortFloatMap, ShortIntMap,
};
pub use sorted::{MapEntry, SortedView};
pub use table::{ChainedTable, Iter};
pub use vector::VectorOps;

pub(crate) use codec::{read_count, write_count};

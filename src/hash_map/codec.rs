//! Binary wire format shared by every container
//!
//! All integers are big-endian, matching `java.io.DataOutput`:
//!
//! ```text
//! primitive-keyed:  i32 count | count x (key value)
//! generic-keyed:    i32 count | [utf tag if count > 0] | count x (key value)
//! ```
//!
//! The tag is a `u16`-length-prefixed modified UTF-8 string naming the key type.

use std::io::{Read, Write};

use super::element::{TableKey, WireKey};
use super::lazy::{LazyPayload, LazyTable};
use super::table::ChainedTable;
use crate::config::{DecodeOptions, MapConfig};
use crate::error::{PrimapError, Result};
use crate::io::{self, DataInput, DataOutput};

/// Upper bound on records reserved up front from an untrusted header
const MAX_PREALLOCATED_RECORDS: usize = 1 << 16;

/// Types with a binary wire representation
pub trait WireCodec: Sized {
    /// Write the wire form to `out`
    fn serialize<O: DataOutput + ?Sized>(&self, out: &mut O) -> Result<()>;

    /// Read the wire form from `input`, materializing per `options`
    fn deserialize<I: DataInput + ?Sized>(input: &mut I, options: &DecodeOptions) -> Result<Self>;

    /// Encode into a fresh byte vector
    fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = io::to_vec();
        self.serialize(&mut out)?;
        Ok(out.into_vec())
    }

    /// Decode from a byte slice. Trailing bytes are left unread.
    fn from_bytes(bytes: &[u8], options: &DecodeOptions) -> Result<Self> {
        let mut input = io::from_slice(bytes);
        Self::deserialize(&mut input, options).map_err(log_decode_failure)
    }

    /// Encode to any `std::io::Write` and flush it
    fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        let mut out = io::to_writer(writer);
        self.serialize(&mut out)?;
        out.flush()
    }

    /// Decode from any `std::io::Read`
    fn read_from<R: Read>(reader: R, options: &DecodeOptions) -> Result<Self> {
        let mut input = io::from_reader(reader);
        Self::deserialize(&mut input, options).map_err(log_decode_failure)
    }
}

/// Log a failed top-level decode and pass the error through unchanged.
///
/// Stream failures may succeed on retry; malformed bytes never will.
pub(crate) fn log_decode_failure(err: PrimapError) -> PrimapError {
    if err.is_recoverable() {
        log::warn!("Decode interrupted [{}]: {}", err.category(), err);
    } else {
        log::debug!("Decode rejected [{}]: {}", err.category(), err);
    }
    err
}

/// Write the record count header
pub(crate) fn write_count<O: DataOutput + ?Sized>(out: &mut O, len: usize) -> Result<()> {
    let count = i32::try_from(len).map_err(|_| {
        PrimapError::format(format!("{} entries exceed the i32 record count", len))
    })?;
    out.write_i32(count)
}

/// Read the record count header; negative counts are malformed
pub(crate) fn read_count<I: DataInput + ?Sized>(input: &mut I) -> Result<usize> {
    let count = input.read_i32()?;
    usize::try_from(count)
        .map_err(|_| PrimapError::format(format!("negative record count {}", count)))
}

/// Read `count` records into a table or a pending payload.
///
/// An empty container is always materialized.
pub(crate) fn decode_records<K, V, I, F>(
    input: &mut I,
    count: usize,
    options: &DecodeOptions,
    config: MapConfig,
    mut read_record: F,
) -> Result<LazyTable<K, V>>
where
    K: TableKey,
    I: DataInput + ?Sized,
    F: FnMut(&mut I) -> Result<(K, V)>,
{
    let reserve = count.min(MAX_PREALLOCATED_RECORDS);
    log::debug!("Decoding {} records ({})", count, options.policy);

    if options.is_lazy() && count > 0 {
        let mut payload = LazyPayload::with_capacity(reserve);
        for _ in 0..count {
            let (key, value) = read_record(input)?;
            payload.push(key, value);
        }
        Ok(LazyTable::pending(payload, config))
    } else {
        let mut table = ChainedTable::with_config(config);
        table.reserve(reserve);
        for _ in 0..count {
            let (key, value) = read_record(input)?;
            table.insert(key, value);
        }
        Ok(LazyTable::from_table(table))
    }
}

/// Tag shared by every key of `store`, `None` when empty.
///
/// Fails with a homogeneity error naming the first mismatching key type.
pub(crate) fn homogeneous_tag<K: WireKey, V>(store: &LazyTable<K, V>) -> Result<Option<&'static str>> {
    let mut tag: Option<&'static str> = None;
    store.try_for_each_raw(|key, _| match tag {
        None => {
            tag = Some(key.type_tag());
            Ok(())
        }
        Some(expected) if expected == key.type_tag() => Ok(()),
        Some(expected) => Err(PrimapError::type_homogeneity(expected, key.type_tag())),
    })?;
    Ok(tag)
}

/// Read and resolve the key type tag of a non-empty generic-keyed container
pub(crate) fn read_tag<K: WireKey, I: DataInput + ?Sized>(input: &mut I) -> Result<String> {
    let tag = input.read_utf()?;
    if !K::accepts_tag(&tag) {
        return Err(PrimapError::format(format!(
            "unresolvable key type identifier '{}'",
            tag
        )));
    }
    Ok(tag)
}

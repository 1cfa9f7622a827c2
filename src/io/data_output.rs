//! Data output abstractions and implementations
//!
//! Writers for the container wire format, big-endian throughout.

use std::io::Write;

use crate::error::{PrimapError, Result};

/// Trait for writing structured big-endian data to various destinations
pub trait DataOutput {
    /// Write bytes from the provided buffer
    fn write_bytes(&mut self, data: &[u8]) -> Result<()>;

    /// Flush any buffered data to the underlying destination
    fn flush(&mut self) -> Result<()>;

    /// Write a single byte
    fn write_u8(&mut self, value: u8) -> Result<()> {
        self.write_bytes(&[value])
    }

    /// Write a 16-bit unsigned integer in big-endian format
    fn write_u16(&mut self, value: u16) -> Result<()> {
        self.write_bytes(&value.to_be_bytes())
    }

    /// Write a 32-bit unsigned integer in big-endian format
    fn write_u32(&mut self, value: u32) -> Result<()> {
        self.write_bytes(&value.to_be_bytes())
    }

    /// Write a 64-bit unsigned integer in big-endian format
    fn write_u64(&mut self, value: u64) -> Result<()> {
        self.write_bytes(&value.to_be_bytes())
    }

    /// Write a 16-bit signed integer
    fn write_i16(&mut self, value: i16) -> Result<()> {
        self.write_bytes(&value.to_be_bytes())
    }

    /// Write a 32-bit signed integer
    fn write_i32(&mut self, value: i32) -> Result<()> {
        self.write_bytes(&value.to_be_bytes())
    }

    /// Write a 64-bit signed integer
    fn write_i64(&mut self, value: i64) -> Result<()> {
        self.write_bytes(&value.to_be_bytes())
    }

    /// Write an IEEE-754 single precision float
    fn write_f32(&mut self, value: f32) -> Result<()> {
        self.write_u32(value.to_bits())
    }

    /// Write an IEEE-754 double precision float
    fn write_f64(&mut self, value: f64) -> Result<()> {
        self.write_u64(value.to_bits())
    }

    /// Write a string as modified UTF-8 prefixed by its encoded length as a
    /// `u16`, byte-for-byte what `java.io.DataOutput::writeUTF` produces
    fn write_utf(&mut self, s: &str) -> Result<()> {
        let encoded = encode_modified_utf8(s);
        let len = u16::try_from(encoded.len()).map_err(|_| {
            PrimapError::format(format!(
                "String of {} encoded bytes exceeds the {} byte limit",
                encoded.len(),
                u16::MAX
            ))
        })?;
        self.write_u16(len)?;
        self.write_bytes(&encoded)
    }
}

/// Encode `s` as modified UTF-8.
///
/// Works on UTF-16 code units: U+0000 takes two bytes (`C0 80`) and a
/// supplementary character becomes two 3-byte surrogate sequences.
pub(crate) fn encode_modified_utf8(s: &str) -> Vec<u8> {
    if s.bytes().all(|b| b != 0 && b < 0x80) {
        return s.as_bytes().to_vec();
    }

    let mut out = Vec::with_capacity(s.len() + s.len() / 2);
    for unit in s.encode_utf16() {
        match unit {
            0x0001..=0x007f => out.push(unit as u8),
            0x0000 | 0x0080..=0x07ff => {
                out.push(0xc0 | ((unit >> 6) & 0x1f) as u8);
                out.push(0x80 | (unit & 0x3f) as u8);
            }
            _ => {
                out.push(0xe0 | ((unit >> 12) & 0x0f) as u8);
                out.push(0x80 | ((unit >> 6) & 0x3f) as u8);
                out.push(0x80 | (unit & 0x3f) as u8);
            }
        }
    }
    out
}

/// DataOutput implementation for Vec<u8>
#[derive(Debug, Default)]
pub struct VecDataOutput {
    data: Vec<u8>,
}

impl VecDataOutput {
    /// Create a new VecDataOutput
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Create a new VecDataOutput with the specified initial capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Get the number of bytes written
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if no bytes have been written
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get a reference to the underlying data
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Convert into the underlying Vec<u8>
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// Clear all written data
    pub fn clear(&mut self) {
        self.data.clear();
    }
}

impl DataOutput for VecDataOutput {
    fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.data.extend_from_slice(data);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// DataOutput implementation for std::io::Write types
pub struct WriterDataOutput<W> {
    writer: W,
}

impl<W: Write> WriterDataOutput<W> {
    /// Create a new WriterDataOutput from a Write type
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Convert back to the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> DataOutput for WriterDataOutput<W> {
    fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.writer.write_all(data)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Create an in-memory DataOutput
pub fn to_vec() -> VecDataOutput {
    VecDataOutput::new()
}

/// Create a DataOutput over any writer
pub fn to_writer<W: Write>(writer: W) -> WriterDataOutput<W> {
    WriterDataOutput::new(writer)
}

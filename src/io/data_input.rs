//! Data input abstractions and implementations
//!
//! Readers for the container wire format. Multi-byte values are big-endian,
//! matching the byte order of Java's `DataOutputStream`, so payloads written by
//! the batch runtime decode bit-for-bit.

use std::io::{self, Read};

use crate::error::{PrimapError, Result};

/// Trait for reading structured big-endian data from various sources
pub trait DataInput {
    /// Read a single byte
    fn read_u8(&mut self) -> Result<u8>;

    /// Read exact number of bytes into the provided buffer
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<()>;

    /// Skip the specified number of bytes
    fn skip(&mut self, n: usize) -> Result<()>;

    /// Read a 16-bit unsigned integer in big-endian format
    fn read_u16(&mut self) -> Result<u16> {
        let mut buf = [0u8; 2];
        self.read_bytes(&mut buf)?;
        Ok(u16::from_be_bytes(buf))
    }

    /// Read a 32-bit unsigned integer in big-endian format
    fn read_u32(&mut self) -> Result<u32> {
        let mut buf = [0u8; 4];
        self.read_bytes(&mut buf)?;
        Ok(u32::from_be_bytes(buf))
    }

    /// Read a 64-bit unsigned integer in big-endian format
    fn read_u64(&mut self) -> Result<u64> {
        let mut buf = [0u8; 8];
        self.read_bytes(&mut buf)?;
        Ok(u64::from_be_bytes(buf))
    }

    /// Read a 16-bit signed integer
    fn read_i16(&mut self) -> Result<i16> {
        Ok(self.read_u16()? as i16)
    }

    /// Read a 32-bit signed integer
    fn read_i32(&mut self) -> Result<i32> {
        Ok(self.read_u32()? as i32)
    }

    /// Read a 64-bit signed integer
    fn read_i64(&mut self) -> Result<i64> {
        Ok(self.read_u64()? as i64)
    }

    /// Read an IEEE-754 single precision float
    fn read_f32(&mut self) -> Result<f32> {
        Ok(f32::from_bits(self.read_u32()?))
    }

    /// Read an IEEE-754 double precision float
    fn read_f64(&mut self) -> Result<f64> {
        Ok(f64::from_bits(self.read_u64()?))
    }

    /// Read a vector of bytes with the specified length
    fn read_vec(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; len];
        self.read_bytes(&mut buf)?;
        Ok(buf)
    }

    /// Read a modified UTF-8 string prefixed by its encoded length as a
    /// `u16`, the counterpart of `java.io.DataInput::readUTF`
    fn read_utf(&mut self) -> Result<String> {
        let len = self.read_u16()? as usize;
        let bytes = self.read_vec(len)?;
        decode_modified_utf8(&bytes)
    }
}

/// Decode modified UTF-8 into a `String`.
///
/// Each 1, 2 or 3 byte group yields one UTF-16 code unit, so `C0 80` is NUL and
/// a surrogate pair written as two groups recombines into one character.
pub(crate) fn decode_modified_utf8(bytes: &[u8]) -> Result<String> {
    if bytes.iter().all(|&b| b != 0 && b < 0x80) {
        // Pure ASCII is identical in both encodings
        return String::from_utf8(bytes.to_vec())
            .map_err(|e| PrimapError::format(format!("Invalid UTF-8 string: {}", e)));
    }

    let malformed = |at: usize| {
        PrimapError::format(format!("malformed modified UTF-8 sequence at byte {}", at))
    };
    let continuation = |at: usize| match bytes.get(at) {
        Some(&b) if b & 0xc0 == 0x80 => Ok(u16::from(b & 0x3f)),
        _ => Err(malformed(at)),
    };

    let mut units = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        match b >> 4 {
            0x0..=0x7 => {
                units.push(u16::from(b));
                i += 1;
            }
            0xc | 0xd => {
                let low = continuation(i + 1)?;
                units.push((u16::from(b & 0x1f) << 6) | low);
                i += 2;
            }
            0xe => {
                let mid = continuation(i + 1)?;
                let low = continuation(i + 2)?;
                units.push((u16::from(b & 0x0f) << 12) | (mid << 6) | low);
                i += 3;
            }
            _ => return Err(malformed(i)),
        }
    }

    String::from_utf16(&units)
        .map_err(|e| PrimapError::format(format!("Invalid modified UTF-8 string: {}", e)))
}

/// DataInput implementation for byte slices
pub struct SliceDataInput<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> SliceDataInput<'a> {
    /// Create a new SliceDataInput from a byte slice
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Get the current position
    pub fn pos(&self) -> usize {
        self.position
    }

    /// Get the remaining bytes
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Check if there are more bytes to read
    pub fn has_more(&self) -> bool {
        self.position < self.data.len()
    }
}

impl<'a> DataInput for SliceDataInput<'a> {
    fn read_u8(&mut self) -> Result<u8> {
        if !self.has_more() {
            return Err(PrimapError::unexpected_eof("u8"));
        }
        let value = self.data[self.position];
        self.position += 1;
        Ok(value)
    }

    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<()> {
        if buf.len() > self.remaining() {
            return Err(PrimapError::unexpected_eof(&format!("{} bytes", buf.len())));
        }
        buf.copy_from_slice(&self.data[self.position..self.position + buf.len()]);
        self.position += buf.len();
        Ok(())
    }

    fn skip(&mut self, n: usize) -> Result<()> {
        if n > self.remaining() {
            return Err(PrimapError::unexpected_eof("skipped bytes"));
        }
        self.position += n;
        Ok(())
    }
}

/// DataInput implementation for std::io::Read types
pub struct ReaderDataInput<R> {
    reader: R,
    position: u64,
}

impl<R: Read> ReaderDataInput<R> {
    /// Create a new ReaderDataInput from a Read type
    pub fn new(reader: R) -> Self {
        Self { reader, position: 0 }
    }

    /// Get the current position
    pub fn pos(&self) -> u64 {
        self.position
    }
}

/// A short read is malformed input, anything else is the stream's own failure
fn map_read_error(e: io::Error, what: &str) -> PrimapError {
    if e.kind() == io::ErrorKind::UnexpectedEof {
        PrimapError::unexpected_eof(what)
    } else {
        PrimapError::Io(e)
    }
}

impl<R: Read> DataInput for ReaderDataInput<R> {
    fn read_u8(&mut self) -> Result<u8> {
        let mut buf = [0u8; 1];
        self.reader
            .read_exact(&mut buf)
            .map_err(|e| map_read_error(e, "u8"))?;
        self.position += 1;
        Ok(buf[0])
    }

    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<()> {
        self.reader
            .read_exact(buf)
            .map_err(|e| map_read_error(e, &format!("{} bytes", buf.len())))?;
        self.position += buf.len() as u64;
        Ok(())
    }

    fn skip(&mut self, n: usize) -> Result<()> {
        let mut buf = vec![0u8; n.min(8192)];
        let mut remaining = n;

        while remaining > 0 {
            let to_read = remaining.min(buf.len());
            self.reader
                .read_exact(&mut buf[..to_read])
                .map_err(|e| map_read_error(e, "skipped bytes"))?;
            remaining -= to_read;
        }

        self.position += n as u64;
        Ok(())
    }
}

/// Create a DataInput over a byte slice
pub fn from_slice(data: &[u8]) -> SliceDataInput<'_> {
    SliceDataInput::new(data)
}

/// Create a DataInput over any reader
pub fn from_reader<R: Read>(reader: R) -> ReaderDataInput<R> {
    ReaderDataInput::new(reader)
}

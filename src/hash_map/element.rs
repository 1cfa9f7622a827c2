//! Key and value traits for the container family
//!
//! One generic container replaces a class per key/value pairing. The traits
//! here describe what the table needs from a key ([`TableKey`]), how a value
//! or key travels over the wire ([`WireValue`], [`WireKey`]) and which values
//! support vector algebra ([`Numeric`], [`Float`]).
//!
//! Float keys compare and hash by bit pattern, so `0.0` and `-0.0` are
//! distinct keys and a NaN key finds itself.

use std::cmp::Ordering;
use std::fmt::Debug;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Div, Mul, Sub};

use crate::error::{PrimapError, Result};
use crate::io::{DataInput, DataOutput};

/// Hashing, equality and ordering for table keys
pub trait TableKey: Clone + Debug {
    /// Feed the key into a hasher
    fn hash_key<H: Hasher>(&self, state: &mut H);

    /// Key equality as seen by the table
    fn key_eq(&self, other: &Self) -> bool;

    /// Natural key ordering, used to break ties in sorted views
    fn key_cmp(&self, other: &Self) -> Ordering;
}

/// Fixed-width or length-prefixed binary encoding
pub trait WireValue: Sized {
    /// Write the value in wire format
    fn write_value<O: DataOutput + ?Sized>(&self, out: &mut O) -> Result<()>;

    /// Read a value in wire format
    fn read_value<I: DataInput + ?Sized>(input: &mut I) -> Result<Self>;
}

/// Primitive keys: encoded fixed-width with no type identifier
pub trait PrimitiveKey: TableKey + WireValue + Copy {}

/// Generic keys: each key names its wire type, and the container records
/// that name once ahead of its records
pub trait WireKey: TableKey {
    /// Wire type identifier of this key
    fn type_tag(&self) -> &'static str;

    /// Whether a recorded type identifier can be decoded into `Self`
    fn accepts_tag(tag: &str) -> bool;

    /// Write the key's own encoding
    fn write_key<O: DataOutput + ?Sized>(&self, out: &mut O) -> Result<()>;

    /// Read one key under the container's recorded type identifier
    fn read_key<I: DataInput + ?Sized>(tag: &str, input: &mut I) -> Result<Self>;
}

/// Values that form a sparse vector
pub trait Numeric:
    WireValue
    + Copy
    + PartialEq
    + Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
{
    /// Additive identity, also the sentinel returned for missing keys
    const ZERO: Self;
    /// Multiplicative identity, the default increment
    const ONE: Self;

    /// Total ordering used by sorted views
    fn value_cmp(&self, other: &Self) -> Ordering;

    /// Lossy widening for statistics
    fn to_f64(self) -> f64;
}

/// Floating point values: support norms and normalization
pub trait Float: Numeric + Div<Output = Self> {
    /// Square root
    fn sqrt(self) -> Self;
}

macro_rules! impl_integer {
    ($($ty:ty => $read:ident, $write:ident;)*) => {$(
        impl TableKey for $ty {
            #[inline]
            fn hash_key<H: Hasher>(&self, state: &mut H) {
                self.hash(state);
            }

            #[inline]
            fn key_eq(&self, other: &Self) -> bool {
                self == other
            }

            #[inline]
            fn key_cmp(&self, other: &Self) -> Ordering {
                self.cmp(other)
            }
        }

        impl WireValue for $ty {
            #[inline]
            fn write_value<O: DataOutput + ?Sized>(&self, out: &mut O) -> Result<()> {
                out.$write(*self)
            }

            #[inline]
            fn read_value<I: DataInput + ?Sized>(input: &mut I) -> Result<Self> {
                input.$read()
            }
        }

        impl PrimitiveKey for $ty {}

        impl Numeric for $ty {
            const ZERO: Self = 0;
            const ONE: Self = 1;

            #[inline]
            fn value_cmp(&self, other: &Self) -> Ordering {
                self.cmp(other)
            }

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }
        }
    )*};
}

impl_integer! {
    i16 => read_i16, write_i16;
    i32 => read_i32, write_i32;
    i64 => read_i64, write_i64;
}

macro_rules! impl_float {
    ($($ty:ty => $read:ident, $write:ident;)*) => {$(
        impl TableKey for $ty {
            #[inline]
            fn hash_key<H: Hasher>(&self, state: &mut H) {
                self.to_bits().hash(state);
            }

            #[inline]
            fn key_eq(&self, other: &Self) -> bool {
                self.to_bits() == other.to_bits()
            }

            #[inline]
            fn key_cmp(&self, other: &Self) -> Ordering {
                self.total_cmp(other)
            }
        }

        impl WireValue for $ty {
            #[inline]
            fn write_value<O: DataOutput + ?Sized>(&self, out: &mut O) -> Result<()> {
                out.$write(*self)
            }

            #[inline]
            fn read_value<I: DataInput + ?Sized>(input: &mut I) -> Result<Self> {
                input.$read()
            }
        }

        impl PrimitiveKey for $ty {}

        impl Numeric for $ty {
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;

            #[inline]
            fn value_cmp(&self, other: &Self) -> Ordering {
                self.total_cmp(other)
            }

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }
        }

        impl Float for $ty {
            #[inline]
            fn sqrt(self) -> Self {
                <$ty>::sqrt(self)
            }
        }
    )*};
}

impl_float! {
    f32 => read_f32, write_f32;
    f64 => read_f64, write_f64;
}

macro_rules! impl_static_wire_key {
    ($($ty:ty => $tag:literal;)*) => {$(
        impl WireKey for $ty {
            fn type_tag(&self) -> &'static str {
                $tag
            }

            fn accepts_tag(tag: &str) -> bool {
                tag == $tag
            }

            fn write_key<O: DataOutput + ?Sized>(&self, out: &mut O) -> Result<()> {
                self.write_value(out)
            }

            fn read_key<I: DataInput + ?Sized>(_tag: &str, input: &mut I) -> Result<Self> {
                Self::read_value(input)
            }
        }
    )*};
}

impl_static_wire_key! {
    i16 => "i16";
    i32 => "i32";
    i64 => "i64";
    String => "string";
    (i32, i32) => "pair<i32,i32>";
}

impl TableKey for String {
    fn hash_key<H: Hasher>(&self, state: &mut H) {
        self.hash(state);
    }

    fn key_eq(&self, other: &Self) -> bool {
        self == other
    }

    fn key_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

impl WireValue for String {
    fn write_value<O: DataOutput + ?Sized>(&self, out: &mut O) -> Result<()> {
        out.write_utf(self)
    }

    fn read_value<I: DataInput + ?Sized>(input: &mut I) -> Result<Self> {
        input.read_utf()
    }
}

impl TableKey for (i32, i32) {
    fn hash_key<H: Hasher>(&self, state: &mut H) {
        self.hash(state);
    }

    fn key_eq(&self, other: &Self) -> bool {
        self == other
    }

    fn key_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

impl WireValue for (i32, i32) {
    fn write_value<O: DataOutput + ?Sized>(&self, out: &mut O) -> Result<()> {
        out.write_i32(self.0)?;
        out.write_i32(self.1)
    }

    fn read_value<I: DataInput + ?Sized>(input: &mut I) -> Result<Self> {
        let left = input.read_i32()?;
        let right = input.read_i32()?;
        Ok((left, right))
    }
}

/// A key whose wire type is chosen per instance.
///
/// A container may only be serialized while every key shares one variant;
/// the variant's tag is written once and used to decode every record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DynKey {
    /// 32-bit integer key
    Int(i32),
    /// 64-bit integer key
    Long(i64),
    /// UTF-8 string key
    Text(String),
}

impl DynKey {
    const INT_TAG: &'static str = "i32";
    const LONG_TAG: &'static str = "i64";
    const TEXT_TAG: &'static str = "string";
}

impl From<i32> for DynKey {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<i64> for DynKey {
    fn from(value: i64) -> Self {
        Self::Long(value)
    }
}

impl From<&str> for DynKey {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl TableKey for DynKey {
    fn hash_key<H: Hasher>(&self, state: &mut H) {
        self.hash(state);
    }

    fn key_eq(&self, other: &Self) -> bool {
        self == other
    }

    fn key_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

impl WireKey for DynKey {
    fn type_tag(&self) -> &'static str {
        match self {
            Self::Int(_) => Self::INT_TAG,
            Self::Long(_) => Self::LONG_TAG,
            Self::Text(_) => Self::TEXT_TAG,
        }
    }

    fn accepts_tag(tag: &str) -> bool {
        matches!(tag, Self::INT_TAG | Self::LONG_TAG | Self::TEXT_TAG)
    }

    fn write_key<O: DataOutput + ?Sized>(&self, out: &mut O) -> Result<()> {
        match self {
            Self::Int(v) => out.write_i32(*v),
            Self::Long(v) => out.write_i64(*v),
            Self::Text(v) => out.write_utf(v),
        }
    }

    fn read_key<I: DataInput + ?Sized>(tag: &str, input: &mut I) -> Result<Self> {
        match tag {
            Self::INT_TAG => Ok(Self::Int(input.read_i32()?)),
            Self::LONG_TAG => Ok(Self::Long(input.read_i64()?)),
            Self::TEXT_TAG => Ok(Self::Text(input.read_utf()?)),
            other => Err(PrimapError::format(format!(
                "unresolvable key type identifier '{}'",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{SliceDataInput, VecDataOutput};
    use std::collections::hash_map::DefaultHasher;

    fn hash_of<K: TableKey>(key: &K) -> u64 {
        let mut hasher = DefaultHasher::new();
        key.hash_key(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_float_keys_compare_by_bits() {
        assert!(1.5f32.key_eq(&1.5));
        assert!(!0.0f64.key_eq(&-0.0));
        assert!(f64::NAN.key_eq(&f64::NAN));
        assert_eq!(hash_of(&f32::NAN), hash_of(&f32::NAN));
        assert_eq!((-1.0f32).key_cmp(&2.0), Ordering::Less);
    }

    #[test]
    fn test_numeric_constants() {
        assert_eq!(i16::ZERO, 0);
        assert_eq!(i64::ONE, 1);
        assert_eq!(f32::ZERO, 0.0);
        assert_eq!(f64::ONE, 1.0);
        assert_eq!(Float::sqrt(16.0f64), 4.0);
        assert_eq!(3.0f32.value_cmp(&f32::NAN), Ordering::Less);
    }

    #[test]
    fn test_wire_widths() {
        let mut out = VecDataOutput::new();
        7i16.write_value(&mut out).unwrap();
        7i32.write_value(&mut out).unwrap();
        7i64.write_value(&mut out).unwrap();
        7f32.write_value(&mut out).unwrap();
        7f64.write_value(&mut out).unwrap();
        assert_eq!(out.len(), 2 + 4 + 8 + 4 + 8);

        let bytes = out.into_vec();
        let mut input = SliceDataInput::new(&bytes);
        assert_eq!(i16::read_value(&mut input).unwrap(), 7);
        assert_eq!(i32::read_value(&mut input).unwrap(), 7);
        assert_eq!(i64::read_value(&mut input).unwrap(), 7);
        assert_eq!(f32::read_value(&mut input).unwrap(), 7.0);
        assert_eq!(f64::read_value(&mut input).unwrap(), 7.0);
    }

    #[test]
    fn test_static_key_tags() {
        assert_eq!(String::from("a").type_tag(), "string");
        assert!(String::accepts_tag("string"));
        assert!(!String::accepts_tag("i32"));
        assert_eq!((1i32, 2i32).type_tag(), "pair<i32,i32>");
        assert!(i64::accepts_tag("i64"));
    }

    #[test]
    fn test_pair_key_encoding() {
        let mut out = VecDataOutput::new();
        (1i32, -1i32).write_key(&mut out).unwrap();
        assert_eq!(out.as_slice(), &[0, 0, 0, 1, 0xff, 0xff, 0xff, 0xff]);

        let bytes = out.into_vec();
        let mut input = SliceDataInput::new(&bytes);
        assert_eq!(<(i32, i32)>::read_key("pair<i32,i32>", &mut input).unwrap(), (1, -1));
    }

    #[test]
    fn test_dyn_key_tags_follow_variant() {
        assert_eq!(DynKey::from(1i32).type_tag(), "i32");
        assert_eq!(DynKey::from(1i64).type_tag(), "i64");
        assert_eq!(DynKey::from("x").type_tag(), "string");
        assert!(DynKey::accepts_tag("i64"));
        assert!(!DynKey::accepts_tag("f32"));
    }

    #[test]
    fn test_dyn_key_round_trip() {
        let mut out = VecDataOutput::new();
        DynKey::from("abc").write_key(&mut out).unwrap();
        DynKey::from(9i64).write_key(&mut out).unwrap();

        let bytes = out.into_vec();
        let mut input = SliceDataInput::new(&bytes);
        assert_eq!(DynKey::read_key("string", &mut input).unwrap(), DynKey::from("abc"));
        assert_eq!(DynKey::read_key("i64", &mut input).unwrap(), DynKey::Long(9));
    }

    #[test]
    fn test_dyn_key_unknown_tag() {
        let bytes = [0u8; 4];
        let mut input = SliceDataInput::new(&bytes);
        let err = DynKey::read_key("f64", &mut input).unwrap_err();
        assert!(matches!(err, PrimapError::Format { .. }));
    }
}

//! Fixed-width scalar codec.

use crate::binary::{GUID_SIZE, TYPE_MARKER_SIZE};
use crate::error::{ensure_len, Error, Result};
use crate::marker::{MarkerKind, NumberKind, TypeMarker};
use crate::vec::VecExt;
use byteorder::{ByteOrder, LittleEndian};
use std::fmt;
use std::mem::size_of;

/// A decoded number, either a 64-bit integer or a double.
#[derive(Copy, Clone, Debug)]
pub enum Number64 {
    Int(i64),
    Double(f64),
}

impl Number64 {
    #[inline]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Number64::Int(_))
    }

    #[inline]
    pub const fn is_double(&self) -> bool {
        matches!(self, Number64::Double(_))
    }

    /// Returns the integer value, or `None` if this is a double.
    #[inline]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Number64::Int(v) => Some(*v),
            Number64::Double(_) => None,
        }
    }

    /// Returns the value as a double, converting integers.
    #[inline]
    pub fn as_f64(&self) -> f64 {
        match self {
            Number64::Int(v) => *v as f64,
            Number64::Double(v) => *v,
        }
    }
}

impl PartialEq for Number64 {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Number64::Int(a), Number64::Int(b)) => a == b,
            (Number64::Double(a), Number64::Double(b)) => a == b,
            (Number64::Int(i), Number64::Double(d)) | (Number64::Double(d), Number64::Int(i)) => int_eq_double(*i, *d),
        }
    }
}

/// Exact comparison; `d` must be integral and inside `i64` range.
#[inline]
fn int_eq_double(i: i64, d: f64) -> bool {
    const LOWER: f64 = i64::MIN as f64;
    d.fract() == 0.0 && d >= LOWER && d < -LOWER && d as i64 == i
}

impl From<i64> for Number64 {
    #[inline]
    fn from(v: i64) -> Self {
        Number64::Int(v)
    }
}

impl From<f64> for Number64 {
    #[inline]
    fn from(v: f64) -> Self {
        Number64::Double(v)
    }
}

impl fmt::Display for Number64 {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number64::Int(v) => write!(f, "{}", v),
            Number64::Double(v) => write!(f, "{}", v),
        }
    }
}

/// Decodes a compact number: an encoded literal or one of the number markers.
///
/// Returns the value together with the number of bytes it occupies, marker included.
/// Literals occupy the marker byte alone.
#[inline]
pub fn try_get_number_value(bytes: &[u8]) -> Option<(Number64, usize)> {
    let marker = *bytes.first()?;
    match MarkerKind::of(marker) {
        MarkerKind::Literal(v) => Some((Number64::Int(v as i64), TYPE_MARKER_SIZE)),
        MarkerKind::Number(kind) => {
            let width = kind.width();
            let payload = bytes.get(TYPE_MARKER_SIZE..TYPE_MARKER_SIZE + width)?;
            let value = match kind {
                NumberKind::UInt8 => Number64::Int(payload[0] as i64),
                NumberKind::Int16 => Number64::Int(LittleEndian::read_i16(payload) as i64),
                NumberKind::Int32 => Number64::Int(LittleEndian::read_i32(payload) as i64),
                NumberKind::Int64 => Number64::Int(LittleEndian::read_i64(payload)),
                NumberKind::Double => Number64::Double(LittleEndian::read_f64(payload)),
            };
            Some((value, TYPE_MARKER_SIZE + width))
        }
        _ => None,
    }
}

/// Decodes a compact number, failing with `Error::InvalidNumber` for non-number markers.
#[inline]
pub fn get_number_value(bytes: &[u8]) -> Result<Number64> {
    ensure_len(bytes, TYPE_MARKER_SIZE)?;
    let marker = bytes[0];
    if !TypeMarker(marker).is_number() {
        return Err(Error::InvalidNumber(marker));
    }
    match try_get_number_value(bytes) {
        Some((value, _)) => Ok(value),
        None => Err(Error::Truncated {
            needed: TYPE_MARKER_SIZE + number_width(marker),
            available: bytes.len(),
        }),
    }
}

#[inline]
fn number_width(marker: u8) -> usize {
    match MarkerKind::of(marker) {
        MarkerKind::Number(kind) => kind.width(),
        _ => 0,
    }
}

macro_rules! fixed_width_codec {
    ($(#[$doc: meta])* $try_get: ident, $get: ident, $ty: ty, $marker: expr, $read: expr) => {
        $(#[$doc])*
        #[inline]
        pub fn $try_get(bytes: &[u8]) -> Option<$ty> {
            if bytes.first() != Some(&$marker) {
                return None;
            }
            let payload = bytes.get(TYPE_MARKER_SIZE..TYPE_MARKER_SIZE + size_of::<$ty>())?;
            Some($read(payload))
        }

        $(#[$doc])*
        ///
        /// Fails with `Error::InvalidToken` on a different marker and `Error::Truncated` on a
        /// short buffer.
        #[inline]
        pub fn $get(bytes: &[u8]) -> Result<$ty> {
            ensure_len(bytes, TYPE_MARKER_SIZE)?;
            if bytes[0] != $marker {
                return Err(Error::InvalidToken { marker: bytes[0] });
            }
            ensure_len(bytes, TYPE_MARKER_SIZE + size_of::<$ty>())?;
            Ok($read(&bytes[TYPE_MARKER_SIZE..]))
        }
    };
}

fixed_width_codec!(
    /// Decodes an int8 value.
    try_get_int8_value, get_int8_value, i8, TypeMarker::INT8, |p: &[u8]| p[0] as i8
);
fixed_width_codec!(
    /// Decodes an int16 value.
    try_get_int16_value, get_int16_value, i16, TypeMarker::INT16, LittleEndian::read_i16
);
fixed_width_codec!(
    /// Decodes an int32 value.
    try_get_int32_value, get_int32_value, i32, TypeMarker::INT32, LittleEndian::read_i32
);
fixed_width_codec!(
    /// Decodes an int64 value.
    try_get_int64_value, get_int64_value, i64, TypeMarker::INT64, LittleEndian::read_i64
);
fixed_width_codec!(
    /// Decodes a uint32 value.
    try_get_uint32_value, get_uint32_value, u32, TypeMarker::UINT32, LittleEndian::read_u32
);
fixed_width_codec!(
    /// Decodes a float32 value.
    try_get_float32_value, get_float32_value, f32, TypeMarker::FLOAT32, LittleEndian::read_f32
);
fixed_width_codec!(
    /// Decodes a float64 value.
    try_get_float64_value, get_float64_value, f64, TypeMarker::FLOAT64, LittleEndian::read_f64
);
fixed_width_codec!(
    /// Decodes the 16 raw bytes of a GUID value.
    try_get_guid_value, get_guid_value, [u8; GUID_SIZE], TypeMarker::GUID, read_guid
);

#[inline]
fn read_guid(payload: &[u8]) -> [u8; GUID_SIZE] {
    let mut guid = [0u8; GUID_SIZE];
    guid.copy_from_slice(&payload[..GUID_SIZE]);
    guid
}

/// Appends a number in its most compact form.
///
/// Integers in 0..32 become literals, other integers the smallest of uint8, int16, int32 and
/// int64 that holds them; doubles always take 9 bytes.
#[inline]
pub fn encode_number(value: Number64, out: &mut Vec<u8>) {
    match value {
        Number64::Int(v) => encode_integer(v, out),
        Number64::Double(v) => {
            out.push_u8(TypeMarker::NUMBER_DOUBLE);
            out.push_f64(v);
        }
    }
}

#[inline]
fn encode_integer(v: i64, out: &mut Vec<u8>) {
    if let Some(marker) = TypeMarker::encode_integer_literal(v) {
        out.push_u8(marker);
    } else if (0..=u8::MAX as i64).contains(&v) {
        out.push_u8(TypeMarker::NUMBER_UINT8);
        out.push_u8(v as u8);
    } else if (i16::MIN as i64..=i16::MAX as i64).contains(&v) {
        out.push_u8(TypeMarker::NUMBER_INT16);
        out.push_i16(v as i16);
    } else if (i32::MIN as i64..=i32::MAX as i64).contains(&v) {
        out.push_u8(TypeMarker::NUMBER_INT32);
        out.push_i32(v as i32);
    } else {
        out.push_u8(TypeMarker::NUMBER_INT64);
        out.push_i64(v);
    }
}

#[inline]
pub fn encode_int8(value: i8, out: &mut Vec<u8>) {
    out.push_u8(TypeMarker::INT8);
    out.push_u8(value as u8);
}

#[inline]
pub fn encode_int16(value: i16, out: &mut Vec<u8>) {
    out.push_u8(TypeMarker::INT16);
    out.push_i16(value);
}

#[inline]
pub fn encode_int32(value: i32, out: &mut Vec<u8>) {
    out.push_u8(TypeMarker::INT32);
    out.push_i32(value);
}

#[inline]
pub fn encode_int64(value: i64, out: &mut Vec<u8>) {
    out.push_u8(TypeMarker::INT64);
    out.push_i64(value);
}

#[inline]
pub fn encode_uint32(value: u32, out: &mut Vec<u8>) {
    out.push_u8(TypeMarker::UINT32);
    out.push_u32(value);
}

#[inline]
pub fn encode_float32(value: f32, out: &mut Vec<u8>) {
    out.push_u8(TypeMarker::FLOAT32);
    out.push_f32(value);
}

#[inline]
pub fn encode_float64(value: f64, out: &mut Vec<u8>) {
    out.push_u8(TypeMarker::FLOAT64);
    out.push_f64(value);
}

#[inline]
pub fn encode_guid(value: &[u8; GUID_SIZE], out: &mut Vec<u8>) {
    out.push_u8(TypeMarker::GUID);
    out.push_bytes(value);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_equality_is_exact() {
        let two_53 = 1i64 << 53;
        assert_eq!(Number64::Int(two_53), Number64::Double(two_53 as f64));
        assert_eq!(Number64::Double(two_53 as f64), Number64::Int(two_53));
        assert_ne!(Number64::Int(two_53 + 1), Number64::Double(two_53 as f64));
        assert_ne!(Number64::Double(two_53 as f64), Number64::Int(two_53 + 1));

        assert_eq!(Number64::Int(-3), Number64::Double(-3.0));
        assert_ne!(Number64::Int(3), Number64::Double(3.5));
        assert_ne!(Number64::Int(i64::MAX), Number64::Double(i64::MAX as f64));
        assert_eq!(Number64::Int(i64::MIN), Number64::Double(i64::MIN as f64));
        assert_ne!(Number64::Int(0), Number64::Double(f64::NAN));
        assert_ne!(Number64::Int(i64::MAX), Number64::Double(f64::INFINITY));
    }

    #[test]
    fn test_encode_integer_width() {
        fn assert_encoded(v: i64, marker: u8, len: usize) {
            let mut out = Vec::new();
            encode_number(Number64::Int(v), &mut out);
            assert_eq!(out[0], marker, "value {}", v);
            assert_eq!(out.len(), len, "value {}", v);
            assert_eq!(try_get_number_value(&out), Some((Number64::Int(v), len)));
        }

        assert_encoded(0, 0x00, 1);
        assert_encoded(31, 0x1F, 1);
        assert_encoded(32, TypeMarker::NUMBER_UINT8, 2);
        assert_encoded(255, TypeMarker::NUMBER_UINT8, 2);
        assert_encoded(256, TypeMarker::NUMBER_INT16, 3);
        assert_encoded(-1, TypeMarker::NUMBER_INT16, 3);
        assert_encoded(i16::MIN as i64, TypeMarker::NUMBER_INT16, 3);
        assert_encoded(i16::MAX as i64 + 1, TypeMarker::NUMBER_INT32, 5);
        assert_encoded(i32::MIN as i64, TypeMarker::NUMBER_INT32, 5);
        assert_encoded(i32::MAX as i64 + 1, TypeMarker::NUMBER_INT64, 9);
        assert_encoded(i64::MIN, TypeMarker::NUMBER_INT64, 9);
    }

    #[test]
    fn test_number64_eq() {
        assert_eq!(Number64::Int(3), Number64::Double(3.0));
        assert_ne!(Number64::Int(3), Number64::Double(3.5));
        assert!(Number64::Int(3).is_integer());
        assert_eq!(Number64::Double(2.5).as_i64(), None);
        assert_eq!(Number64::Int(-7).to_string(), "-7");
    }
}

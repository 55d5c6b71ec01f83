//! Value length resolution.

use crate::binary::{MAX_NESTED_DEPTH, TYPE_MARKER_SIZE};
use crate::error::{ensure_len, Error, Result};
use crate::marker::{CompressedKind, ContainerShape, LengthWidth, MarkerKind};
use byteorder::{ByteOrder, LittleEndian};

/// How the total length of a value is determined from its marker.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ValueLengthEntry {
    /// Unassigned marker.
    Invalid,
    /// Fixed total length, marker included.
    Fixed(usize),
    /// A length field of the given width follows the marker.
    Length(LengthWidth),
    /// A length field followed by a count field, both of the given width.
    LengthAndCount(LengthWidth),
    /// The length is that of the single child plus the marker.
    SingleItemArray,
    /// The length is that of the single name and value plus the marker.
    SinglePropertyObject,
    /// A character count follows the marker; the payload is bit-packed.
    Compressed(CompressedKind),
}

static VALUE_LENGTHS: [ValueLengthEntry; 256] = build_table();

const fn build_table() -> [ValueLengthEntry; 256] {
    let mut table = [ValueLengthEntry::Invalid; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = entry_for(MarkerKind::classify(i as u8));
        i += 1;
    }
    table
}

const fn entry_for(kind: MarkerKind) -> ValueLengthEntry {
    match kind {
        MarkerKind::Literal(_)
        | MarkerKind::SystemString(_)
        | MarkerKind::UserString1(_)
        | MarkerKind::Null
        | MarkerKind::False
        | MarkerKind::True => ValueLengthEntry::Fixed(1),
        MarkerKind::UserString2(_) => ValueLengthEntry::Fixed(2),
        MarkerKind::GuidString(_) | MarkerKind::Guid => ValueLengthEntry::Fixed(17),
        MarkerKind::CompressedString(kind) => ValueLengthEntry::Compressed(kind),
        MarkerKind::EncodedLengthString(len) => ValueLengthEntry::Fixed(1 + len as usize),
        MarkerKind::String(w) | MarkerKind::Binary(w) => ValueLengthEntry::Length(w),
        MarkerKind::ReferenceString(w) => ValueLengthEntry::Fixed(1 + w as usize),
        MarkerKind::Number(kind) => ValueLengthEntry::Fixed(1 + kind.width()),
        MarkerKind::Int8 => ValueLengthEntry::Fixed(2),
        MarkerKind::Int16 => ValueLengthEntry::Fixed(3),
        MarkerKind::Int32 | MarkerKind::UInt32 | MarkerKind::Float32 => ValueLengthEntry::Fixed(5),
        MarkerKind::Int64 | MarkerKind::Float64 => ValueLengthEntry::Fixed(9),
        MarkerKind::Array(shape) | MarkerKind::Object(shape) => match shape {
            ContainerShape::Empty => ValueLengthEntry::Fixed(1),
            ContainerShape::Single => {
                if matches!(kind, MarkerKind::Array(_)) {
                    ValueLengthEntry::SingleItemArray
                } else {
                    ValueLengthEntry::SinglePropertyObject
                }
            }
            ContainerShape::Length(w) => ValueLengthEntry::Length(w),
            ContainerShape::LengthAndCount(w) => ValueLengthEntry::LengthAndCount(w),
        },
        MarkerKind::Invalid => ValueLengthEntry::Invalid,
    }
}

/// Returns the static length table entry for a marker.
#[inline]
pub fn value_length_entry(marker: u8) -> ValueLengthEntry {
    VALUE_LENGTHS[marker as usize]
}

/// Returns the total number of bytes the value starting at `bytes[0]` occupies.
///
/// Fails with `Error::Truncated` if the value (or any length field it needs) runs past the
/// end of `bytes`, and with `Error::InvalidToken` for an unassigned marker.
#[inline]
pub fn get_value_length(bytes: &[u8]) -> Result<usize> {
    resolve_checked(bytes, 0)
}

/// Like [`get_value_length`], but returns `None` instead of an error.
#[inline]
pub fn try_get_value_length(bytes: &[u8]) -> Option<usize> {
    get_value_length(bytes).ok()
}

fn resolve_checked(bytes: &[u8], depth: usize) -> Result<usize> {
    let length = resolve(bytes, depth)?;
    ensure_len(bytes, length)?;
    Ok(length)
}

fn resolve(bytes: &[u8], depth: usize) -> Result<usize> {
    ensure_len(bytes, TYPE_MARKER_SIZE)?;
    let marker = bytes[0];
    match VALUE_LENGTHS[marker as usize] {
        ValueLengthEntry::Invalid => Err(Error::InvalidToken { marker }),
        ValueLengthEntry::Fixed(length) => Ok(length),
        ValueLengthEntry::Length(w) => {
            let length = read_length_field(bytes, TYPE_MARKER_SIZE, w)?;
            Ok(length.saturating_add(TYPE_MARKER_SIZE + w.size()))
        }
        ValueLengthEntry::LengthAndCount(w) => {
            let length = read_length_field(bytes, TYPE_MARKER_SIZE, w)?;
            Ok(length.saturating_add(TYPE_MARKER_SIZE + 2 * w.size()))
        }
        ValueLengthEntry::SingleItemArray => {
            check_depth(depth)?;
            let item = resolve_checked(&bytes[TYPE_MARKER_SIZE..], depth + 1)?;
            Ok(TYPE_MARKER_SIZE + item)
        }
        ValueLengthEntry::SinglePropertyObject => {
            check_depth(depth)?;
            let name = resolve_checked(&bytes[TYPE_MARKER_SIZE..], depth + 1)?;
            let value = resolve_checked(&bytes[TYPE_MARKER_SIZE + name..], depth + 1)?;
            Ok(TYPE_MARKER_SIZE + name + value)
        }
        ValueLengthEntry::Compressed(kind) => {
            let width = if kind.count_width() == 1 {
                LengthWidth::One
            } else {
                LengthWidth::Two
            };
            let count = read_length_field(bytes, TYPE_MARKER_SIZE, width)?;
            Ok(kind.header_size() + (count * kind.bits() + 7) / 8)
        }
    }
}

#[inline]
fn check_depth(depth: usize) -> Result<()> {
    if depth >= MAX_NESTED_DEPTH {
        return Err(Error::NestedTooDeeply {
            limit: MAX_NESTED_DEPTH,
        });
    }
    Ok(())
}

/// Reads an unsigned little-endian field of `width` bytes at `pos`.
#[inline]
pub(crate) fn read_length_field(bytes: &[u8], pos: usize, width: LengthWidth) -> Result<usize> {
    ensure_len(bytes, pos + width.size())?;
    let value = match width {
        LengthWidth::One => bytes[pos] as usize,
        LengthWidth::Two => LittleEndian::read_u16(&bytes[pos..]) as usize,
        LengthWidth::Four => LittleEndian::read_u32(&bytes[pos..]) as usize,
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marker::TypeMarker;

    #[test]
    fn test_table_entries() {
        assert_eq!(value_length_entry(TypeMarker::NULL), ValueLengthEntry::Fixed(1));
        assert_eq!(value_length_entry(TypeMarker::NUMBER_DOUBLE), ValueLengthEntry::Fixed(9));
        assert_eq!(value_length_entry(TypeMarker::INT16), ValueLengthEntry::Fixed(3));
        assert_eq!(value_length_entry(TypeMarker::STR_R3), ValueLengthEntry::Fixed(4));
        assert_eq!(value_length_entry(0xBF), ValueLengthEntry::Fixed(64));
        assert_eq!(value_length_entry(TypeMarker::ARR1), ValueLengthEntry::SingleItemArray);
        assert_eq!(value_length_entry(TypeMarker::OBJ1), ValueLengthEntry::SinglePropertyObject);
        assert_eq!(
            value_length_entry(TypeMarker::OBJ_LC2),
            ValueLengthEntry::LengthAndCount(LengthWidth::Two)
        );
        assert_eq!(value_length_entry(0xF0), ValueLengthEntry::Invalid);
    }

    #[test]
    fn test_compressed_length() {
        // 5 hex chars take 3 bytes
        let bytes = [TypeMarker::COMPRESSED_LOWERCASE_HEX_STRING, 5, 0x21, 0x43, 0x05];
        assert_eq!(get_value_length(&bytes).unwrap(), 5);

        // 3 chars of 6 bits take 3 bytes, after the base char
        let bytes = [TypeMarker::PACKED_6_BIT_STRING, 3, b'a', 0, 0, 0];
        assert_eq!(get_value_length(&bytes).unwrap(), 6);

        let bytes = [TypeMarker::PACKED_7_BIT_STRING_LENGTH_2, 8, 0, 1, 2, 3, 4, 5, 6, 7];
        assert_eq!(get_value_length(&bytes).unwrap(), 10);
    }

    #[test]
    fn test_depth_limit() {
        let mut bytes = vec![TypeMarker::ARR1; MAX_NESTED_DEPTH + 1];
        bytes.push(TypeMarker::NULL);
        assert!(matches!(
            get_value_length(&bytes),
            Err(Error::NestedTooDeeply { limit: MAX_NESTED_DEPTH })
        ));

        let mut bytes = vec![TypeMarker::ARR1; MAX_NESTED_DEPTH];
        bytes.push(TypeMarker::NULL);
        assert_eq!(get_value_length(&bytes).unwrap(), MAX_NESTED_DEPTH + 1);
    }
}

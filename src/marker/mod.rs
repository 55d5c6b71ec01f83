//! Type markers.
//!
//! Every encoded value starts with one type marker byte. All 256 byte values are classified,
//! unassigned ones as [`MarkerKind::Invalid`].

mod kind;

pub use crate::marker::kind::{CompressedKind, ContainerShape, GuidCase, LengthWidth, MarkerKind, NumberKind};

use std::fmt;

/// A single type marker byte.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(transparent)]
pub struct TypeMarker(pub u8);

impl TypeMarker {
    // [0x00, 0x20): encoded literal integers
    pub const LITERAL_INT_MIN: u8 = 0x00;
    pub const LITERAL_INT_MAX: u8 = Self::LITERAL_INT_MIN + 32;

    // [0x20, 0x40): 1-byte system strings
    pub const SYSTEM_STRING_1_BYTE_MIN: u8 = Self::LITERAL_INT_MAX;
    pub const SYSTEM_STRING_1_BYTE_MAX: u8 = Self::SYSTEM_STRING_1_BYTE_MIN + 32;

    // [0x40, 0x60): 1-byte user strings
    pub const USER_STRING_1_BYTE_MIN: u8 = Self::SYSTEM_STRING_1_BYTE_MAX;
    pub const USER_STRING_1_BYTE_MAX: u8 = Self::USER_STRING_1_BYTE_MIN + 32;

    // [0x60, 0x68): 2-byte user strings
    pub const USER_STRING_2_BYTE_MIN: u8 = Self::USER_STRING_1_BYTE_MAX;
    pub const USER_STRING_2_BYTE_MAX: u8 = Self::USER_STRING_2_BYTE_MIN + 8;

    // [0x68, 0x75): unassigned

    pub const LOWERCASE_GUID_STRING: u8 = 0x75;
    pub const UPPERCASE_GUID_STRING: u8 = 0x76;
    pub const DOUBLE_QUOTED_LOWERCASE_GUID_STRING: u8 = 0x77;

    // [0x78, 0x80): compressed strings
    pub const COMPRESSED_LOWERCASE_HEX_STRING: u8 = 0x78;
    pub const COMPRESSED_UPPERCASE_HEX_STRING: u8 = 0x79;
    pub const COMPRESSED_DATE_TIME_STRING: u8 = 0x7A;
    pub const PACKED_4_BIT_STRING: u8 = 0x7B;
    pub const PACKED_5_BIT_STRING: u8 = 0x7C;
    pub const PACKED_6_BIT_STRING: u8 = 0x7D;
    pub const PACKED_7_BIT_STRING_LENGTH_1: u8 = 0x7E;
    pub const PACKED_7_BIT_STRING_LENGTH_2: u8 = 0x7F;

    // [0x80, 0xC0): strings whose length is encoded in the marker
    pub const ENCODED_STRING_LENGTH_MIN: u8 = 0x80;
    pub const ENCODED_STRING_LENGTH_MAX: u8 = Self::ENCODED_STRING_LENGTH_MIN + 64;

    pub const STR_L1: u8 = 0xC0;
    pub const STR_L2: u8 = 0xC1;
    pub const STR_L4: u8 = 0xC2;
    pub const STR_R1: u8 = 0xC3;
    pub const STR_R2: u8 = 0xC4;
    pub const STR_R3: u8 = 0xC5;
    pub const STR_R4: u8 = 0xC6;

    pub const NUMBER_UINT8: u8 = 0xC8;
    pub const NUMBER_INT16: u8 = 0xC9;
    pub const NUMBER_INT32: u8 = 0xCA;
    pub const NUMBER_INT64: u8 = 0xCB;
    pub const NUMBER_DOUBLE: u8 = 0xCC;
    pub const FLOAT32: u8 = 0xCD;
    pub const FLOAT64: u8 = 0xCE;

    pub const NULL: u8 = 0xD0;
    pub const FALSE: u8 = 0xD1;
    pub const TRUE: u8 = 0xD2;
    pub const GUID: u8 = 0xD3;

    pub const INT8: u8 = 0xD8;
    pub const INT16: u8 = 0xD9;
    pub const INT32: u8 = 0xDA;
    pub const INT64: u8 = 0xDB;
    pub const UINT32: u8 = 0xDC;
    pub const BINARY_1_BYTE_LENGTH: u8 = 0xDD;
    pub const BINARY_2_BYTE_LENGTH: u8 = 0xDE;
    pub const BINARY_4_BYTE_LENGTH: u8 = 0xDF;

    pub const ARR0: u8 = 0xE0;
    pub const ARR1: u8 = 0xE1;
    pub const ARR_L1: u8 = 0xE2;
    pub const ARR_L2: u8 = 0xE3;
    pub const ARR_L4: u8 = 0xE4;
    pub const ARR_LC1: u8 = 0xE5;
    pub const ARR_LC2: u8 = 0xE6;
    pub const ARR_LC4: u8 = 0xE7;

    pub const OBJ0: u8 = 0xE8;
    pub const OBJ1: u8 = 0xE9;
    pub const OBJ_L1: u8 = 0xEA;
    pub const OBJ_L2: u8 = 0xEB;
    pub const OBJ_L4: u8 = 0xEC;
    pub const OBJ_LC1: u8 = 0xED;
    pub const OBJ_LC2: u8 = 0xEE;
    pub const OBJ_LC4: u8 = 0xEF;

    pub const INVALID: u8 = 0xFF;

    #[inline]
    pub const fn new(marker: u8) -> Self {
        TypeMarker(marker)
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Returns the classification of this marker.
    #[inline]
    pub fn kind(self) -> MarkerKind {
        MarkerKind::of(self.0)
    }

    #[inline]
    pub const fn is_encoded_number_literal(self) -> bool {
        in_range(self.0, Self::LITERAL_INT_MIN, Self::LITERAL_INT_MAX)
    }

    #[inline]
    pub const fn is_system_string(self) -> bool {
        in_range(self.0, Self::SYSTEM_STRING_1_BYTE_MIN, Self::SYSTEM_STRING_1_BYTE_MAX)
    }

    #[inline]
    pub const fn is_one_byte_encoded_user_string(self) -> bool {
        in_range(self.0, Self::USER_STRING_1_BYTE_MIN, Self::USER_STRING_1_BYTE_MAX)
    }

    #[inline]
    pub const fn is_two_byte_encoded_user_string(self) -> bool {
        in_range(self.0, Self::USER_STRING_2_BYTE_MIN, Self::USER_STRING_2_BYTE_MAX)
    }

    #[inline]
    pub const fn is_user_string(self) -> bool {
        self.is_one_byte_encoded_user_string() || self.is_two_byte_encoded_user_string()
    }

    /// System or user string resolved through a dictionary.
    #[inline]
    pub const fn is_encoded_string(self) -> bool {
        in_range(self.0, Self::SYSTEM_STRING_1_BYTE_MIN, Self::USER_STRING_2_BYTE_MAX)
    }

    #[inline]
    pub const fn is_guid_string(self) -> bool {
        in_range(
            self.0,
            Self::LOWERCASE_GUID_STRING,
            Self::DOUBLE_QUOTED_LOWERCASE_GUID_STRING + 1,
        )
    }

    #[inline]
    pub const fn is_compressed_string(self) -> bool {
        in_range(
            self.0,
            Self::COMPRESSED_LOWERCASE_HEX_STRING,
            Self::PACKED_7_BIT_STRING_LENGTH_2 + 1,
        )
    }

    #[inline]
    pub const fn is_encoded_length_string(self) -> bool {
        in_range(self.0, Self::ENCODED_STRING_LENGTH_MIN, Self::ENCODED_STRING_LENGTH_MAX)
    }

    /// Strings carrying their own UTF-8 bytes.
    #[inline]
    pub const fn is_variable_length_string(self) -> bool {
        self.is_encoded_length_string() || in_range(self.0, Self::STR_L1, Self::STR_L4 + 1)
    }

    #[inline]
    pub const fn is_reference_string(self) -> bool {
        in_range(self.0, Self::STR_R1, Self::STR_R4 + 1)
    }

    #[inline]
    pub const fn is_string(self) -> bool {
        self.is_encoded_string()
            || self.is_guid_string()
            || self.is_compressed_string()
            || self.is_variable_length_string()
            || self.is_reference_string()
    }

    #[inline]
    pub const fn is_fixed_length_number(self) -> bool {
        in_range(self.0, Self::NUMBER_UINT8, Self::NUMBER_DOUBLE + 1)
    }

    #[inline]
    pub const fn is_number(self) -> bool {
        self.is_encoded_number_literal() || self.is_fixed_length_number()
    }

    #[inline]
    pub const fn is_null(self) -> bool {
        self.0 == Self::NULL
    }

    #[inline]
    pub const fn is_false(self) -> bool {
        self.0 == Self::FALSE
    }

    #[inline]
    pub const fn is_true(self) -> bool {
        self.0 == Self::TRUE
    }

    #[inline]
    pub const fn is_boolean(self) -> bool {
        self.is_false() || self.is_true()
    }

    #[inline]
    pub const fn is_guid(self) -> bool {
        self.0 == Self::GUID
    }

    #[inline]
    pub const fn is_binary(self) -> bool {
        in_range(self.0, Self::BINARY_1_BYTE_LENGTH, Self::BINARY_4_BYTE_LENGTH + 1)
    }

    #[inline]
    pub const fn is_array(self) -> bool {
        in_range(self.0, Self::ARR0, Self::ARR_LC4 + 1)
    }

    #[inline]
    pub const fn is_object(self) -> bool {
        in_range(self.0, Self::OBJ0, Self::OBJ_LC4 + 1)
    }

    #[inline]
    pub const fn is_container(self) -> bool {
        self.is_array() || self.is_object()
    }

    /// Returns `false` for unassigned markers.
    #[inline]
    pub fn is_valid(self) -> bool {
        !matches!(self.kind(), MarkerKind::Invalid)
    }

    /// Encodes a small integer directly into a marker, if it fits.
    #[inline]
    pub const fn encode_integer_literal(value: i64) -> Option<u8> {
        if value >= Self::LITERAL_INT_MIN as i64 && value < Self::LITERAL_INT_MAX as i64 {
            Some(Self::LITERAL_INT_MIN + value as u8)
        } else {
            None
        }
    }

    /// Byte length of a string whose length is encoded in the marker.
    #[inline]
    pub const fn encoded_string_length(self) -> usize {
        (self.0 & (Self::ENCODED_STRING_LENGTH_MAX - Self::ENCODED_STRING_LENGTH_MIN - 1)) as usize
    }

    /// Encodes a string byte length into a marker, if it fits.
    #[inline]
    pub const fn encode_string_length(length: usize) -> Option<u8> {
        if length < (Self::ENCODED_STRING_LENGTH_MAX - Self::ENCODED_STRING_LENGTH_MIN) as usize {
            Some(Self::ENCODED_STRING_LENGTH_MIN + length as u8)
        } else {
            None
        }
    }
}

impl From<u8> for TypeMarker {
    #[inline]
    fn from(marker: u8) -> Self {
        TypeMarker(marker)
    }
}

impl From<TypeMarker> for u8 {
    #[inline]
    fn from(marker: TypeMarker) -> Self {
        marker.0
    }
}

impl fmt::Display for TypeMarker {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#04x}", self.0)
    }
}

#[inline]
const fn in_range(value: u8, min: u8, max_exclusive: u8) -> bool {
    value >= min && value < max_exclusive
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_marker_has_one_category() {
        for b in 0..=255u8 {
            let m = TypeMarker(b);
            let categories = [
                m.is_encoded_number_literal(),
                m.is_fixed_length_number(),
                m.is_string(),
                m.is_null(),
                m.is_boolean(),
                m.is_guid(),
                m.is_binary(),
                m.is_array(),
                m.is_object(),
                matches!(
                    m.kind(),
                    MarkerKind::Int8
                        | MarkerKind::Int16
                        | MarkerKind::Int32
                        | MarkerKind::Int64
                        | MarkerKind::UInt32
                        | MarkerKind::Float32
                        | MarkerKind::Float64
                ),
            ];
            let count = categories.iter().filter(|c| **c).count();
            if m.is_valid() {
                assert_eq!(count, 1, "marker {}", m);
            } else {
                assert_eq!(count, 0, "marker {}", m);
            }
        }
    }

    #[test]
    fn test_literal_encoding() {
        assert_eq!(TypeMarker::encode_integer_literal(0), Some(0x00));
        assert_eq!(TypeMarker::encode_integer_literal(31), Some(0x1F));
        assert_eq!(TypeMarker::encode_integer_literal(32), None);
        assert_eq!(TypeMarker::encode_integer_literal(-1), None);
    }

    #[test]
    fn test_encoded_string_length() {
        assert_eq!(TypeMarker::encode_string_length(0), Some(0x80));
        assert_eq!(TypeMarker::encode_string_length(63), Some(0xBF));
        assert_eq!(TypeMarker::encode_string_length(64), None);
        assert_eq!(TypeMarker(0xBF).encoded_string_length(), 63);
        assert_eq!(TypeMarker(0x85).encoded_string_length(), 5);
    }
}

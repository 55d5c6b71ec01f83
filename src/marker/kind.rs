//! Marker classification table.

use crate::marker::TypeMarker;

/// Width of a length, count or offset field.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[repr(u8)]
pub enum LengthWidth {
    One = 1,
    Two = 2,
    Four = 4,
}

impl LengthWidth {
    #[inline]
    pub const fn size(self) -> usize {
        self as usize
    }
}

/// Shape of an array or object header.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ContainerShape {
    Empty,
    Single,
    Length(LengthWidth),
    LengthAndCount(LengthWidth),
}

impl ContainerShape {
    /// Bytes between the marker and the first child, marker included.
    #[inline]
    pub const fn header_size(self) -> usize {
        match self {
            ContainerShape::Empty | ContainerShape::Single => 1,
            ContainerShape::Length(w) => 1 + w.size(),
            ContainerShape::LengthAndCount(w) => 1 + 2 * w.size(),
        }
    }

    #[inline]
    const fn from_index(index: u8) -> ContainerShape {
        match index {
            0 => ContainerShape::Empty,
            1 => ContainerShape::Single,
            2 => ContainerShape::Length(LengthWidth::One),
            3 => ContainerShape::Length(LengthWidth::Two),
            4 => ContainerShape::Length(LengthWidth::Four),
            5 => ContainerShape::LengthAndCount(LengthWidth::One),
            6 => ContainerShape::LengthAndCount(LengthWidth::Two),
            _ => ContainerShape::LengthAndCount(LengthWidth::Four),
        }
    }

    /// Offset of this shape within the eight array (or object) markers.
    #[inline]
    pub const fn index(self) -> u8 {
        match self {
            ContainerShape::Empty => 0,
            ContainerShape::Single => 1,
            ContainerShape::Length(LengthWidth::One) => 2,
            ContainerShape::Length(LengthWidth::Two) => 3,
            ContainerShape::Length(LengthWidth::Four) => 4,
            ContainerShape::LengthAndCount(LengthWidth::One) => 5,
            ContainerShape::LengthAndCount(LengthWidth::Two) => 6,
            ContainerShape::LengthAndCount(LengthWidth::Four) => 7,
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum GuidCase {
    Lowercase,
    Uppercase,
    DoubleQuotedLowercase,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum CompressedKind {
    LowercaseHex,
    UppercaseHex,
    DateTime,
    Packed4Bit,
    Packed5Bit,
    Packed6Bit,
    Packed7BitLength1,
    Packed7BitLength2,
}

impl CompressedKind {
    /// Bits used per character.
    #[inline]
    pub const fn bits(self) -> usize {
        match self {
            CompressedKind::LowercaseHex
            | CompressedKind::UppercaseHex
            | CompressedKind::DateTime
            | CompressedKind::Packed4Bit => 4,
            CompressedKind::Packed5Bit => 5,
            CompressedKind::Packed6Bit => 6,
            CompressedKind::Packed7BitLength1 | CompressedKind::Packed7BitLength2 => 7,
        }
    }

    /// Width of the character count following the marker.
    #[inline]
    pub const fn count_width(self) -> usize {
        match self {
            CompressedKind::Packed7BitLength2 => 2,
            _ => 1,
        }
    }

    /// Marker, count and base character bytes before the packed payload.
    #[inline]
    pub const fn header_size(self) -> usize {
        match self {
            CompressedKind::Packed4Bit | CompressedKind::Packed5Bit | CompressedKind::Packed6Bit => 3,
            _ => 1 + self.count_width(),
        }
    }
}

/// Sub-family of the compact number markers.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum NumberKind {
    UInt8,
    Int16,
    Int32,
    Int64,
    Double,
}

impl NumberKind {
    /// Payload width in bytes, marker excluded.
    #[inline]
    pub const fn width(self) -> usize {
        match self {
            NumberKind::UInt8 => 1,
            NumberKind::Int16 => 2,
            NumberKind::Int32 => 4,
            NumberKind::Int64 | NumberKind::Double => 8,
        }
    }
}

/// What a type marker denotes.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum MarkerKind {
    /// Small integer stored in the marker itself.
    Literal(u8),
    SystemString(u8),
    /// User string id held by the marker alone.
    UserString1(u8),
    /// User string needing one more byte; holds the marker offset in the 2-byte range.
    UserString2(u8),
    GuidString(GuidCase),
    CompressedString(CompressedKind),
    /// String whose byte length is the payload.
    EncodedLengthString(u8),
    String(LengthWidth),
    ReferenceString(u8),
    Number(NumberKind),
    Float32,
    Float64,
    Null,
    False,
    True,
    Guid,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt32,
    Binary(LengthWidth),
    Array(ContainerShape),
    Object(ContainerShape),
    Invalid,
}

static MARKER_KINDS: [MarkerKind; 256] = build_table();

const fn build_table() -> [MarkerKind; 256] {
    let mut table = [MarkerKind::Invalid; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = MarkerKind::classify(i as u8);
        i += 1;
    }
    table
}

impl MarkerKind {
    /// Looks the marker up in the static classification table.
    #[inline]
    pub fn of(marker: u8) -> MarkerKind {
        MARKER_KINDS[marker as usize]
    }

    pub(crate) const fn classify(b: u8) -> MarkerKind {
        match b {
            0x00..=0x1F => MarkerKind::Literal(b - TypeMarker::LITERAL_INT_MIN),
            0x20..=0x3F => MarkerKind::SystemString(b - TypeMarker::SYSTEM_STRING_1_BYTE_MIN),
            0x40..=0x5F => MarkerKind::UserString1(b - TypeMarker::USER_STRING_1_BYTE_MIN),
            0x60..=0x67 => MarkerKind::UserString2(b - TypeMarker::USER_STRING_2_BYTE_MIN),
            TypeMarker::LOWERCASE_GUID_STRING => MarkerKind::GuidString(GuidCase::Lowercase),
            TypeMarker::UPPERCASE_GUID_STRING => MarkerKind::GuidString(GuidCase::Uppercase),
            TypeMarker::DOUBLE_QUOTED_LOWERCASE_GUID_STRING => MarkerKind::GuidString(GuidCase::DoubleQuotedLowercase),
            TypeMarker::COMPRESSED_LOWERCASE_HEX_STRING => MarkerKind::CompressedString(CompressedKind::LowercaseHex),
            TypeMarker::COMPRESSED_UPPERCASE_HEX_STRING => MarkerKind::CompressedString(CompressedKind::UppercaseHex),
            TypeMarker::COMPRESSED_DATE_TIME_STRING => MarkerKind::CompressedString(CompressedKind::DateTime),
            TypeMarker::PACKED_4_BIT_STRING => MarkerKind::CompressedString(CompressedKind::Packed4Bit),
            TypeMarker::PACKED_5_BIT_STRING => MarkerKind::CompressedString(CompressedKind::Packed5Bit),
            TypeMarker::PACKED_6_BIT_STRING => MarkerKind::CompressedString(CompressedKind::Packed6Bit),
            TypeMarker::PACKED_7_BIT_STRING_LENGTH_1 => MarkerKind::CompressedString(CompressedKind::Packed7BitLength1),
            TypeMarker::PACKED_7_BIT_STRING_LENGTH_2 => MarkerKind::CompressedString(CompressedKind::Packed7BitLength2),
            0x80..=0xBF => MarkerKind::EncodedLengthString(b - TypeMarker::ENCODED_STRING_LENGTH_MIN),
            TypeMarker::STR_L1 => MarkerKind::String(LengthWidth::One),
            TypeMarker::STR_L2 => MarkerKind::String(LengthWidth::Two),
            TypeMarker::STR_L4 => MarkerKind::String(LengthWidth::Four),
            TypeMarker::STR_R1 => MarkerKind::ReferenceString(1),
            TypeMarker::STR_R2 => MarkerKind::ReferenceString(2),
            TypeMarker::STR_R3 => MarkerKind::ReferenceString(3),
            TypeMarker::STR_R4 => MarkerKind::ReferenceString(4),
            TypeMarker::NUMBER_UINT8 => MarkerKind::Number(NumberKind::UInt8),
            TypeMarker::NUMBER_INT16 => MarkerKind::Number(NumberKind::Int16),
            TypeMarker::NUMBER_INT32 => MarkerKind::Number(NumberKind::Int32),
            TypeMarker::NUMBER_INT64 => MarkerKind::Number(NumberKind::Int64),
            TypeMarker::NUMBER_DOUBLE => MarkerKind::Number(NumberKind::Double),
            TypeMarker::FLOAT32 => MarkerKind::Float32,
            TypeMarker::FLOAT64 => MarkerKind::Float64,
            TypeMarker::NULL => MarkerKind::Null,
            TypeMarker::FALSE => MarkerKind::False,
            TypeMarker::TRUE => MarkerKind::True,
            TypeMarker::GUID => MarkerKind::Guid,
            TypeMarker::INT8 => MarkerKind::Int8,
            TypeMarker::INT16 => MarkerKind::Int16,
            TypeMarker::INT32 => MarkerKind::Int32,
            TypeMarker::INT64 => MarkerKind::Int64,
            TypeMarker::UINT32 => MarkerKind::UInt32,
            TypeMarker::BINARY_1_BYTE_LENGTH => MarkerKind::Binary(LengthWidth::One),
            TypeMarker::BINARY_2_BYTE_LENGTH => MarkerKind::Binary(LengthWidth::Two),
            TypeMarker::BINARY_4_BYTE_LENGTH => MarkerKind::Binary(LengthWidth::Four),
            0xE0..=0xE7 => MarkerKind::Array(ContainerShape::from_index(b - TypeMarker::ARR0)),
            0xE8..=0xEF => MarkerKind::Object(ContainerShape::from_index(b - TypeMarker::OBJ0)),
            _ => MarkerKind::Invalid,
        }
    }

    /// Returns the container shape for array and object markers.
    #[inline]
    pub const fn container_shape(self) -> Option<ContainerShape> {
        match self {
            MarkerKind::Array(shape) | MarkerKind::Object(shape) => Some(shape),
            _ => None,
        }
    }
}

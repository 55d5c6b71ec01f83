//! Node type.

use crate::marker::MarkerKind;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// The logical JSON type of an encoded value.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum NodeType {
    Null,
    False,
    True,
    Number,
    String,
    Array,
    Object,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt32,
    Float32,
    Float64,
    Guid,
    Binary,
}

impl Display for NodeType {
    #[inline]
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let name = match self {
            NodeType::Null => "null",
            NodeType::False => "false",
            NodeType::True => "true",
            NodeType::Number => "number",
            NodeType::String => "string",
            NodeType::Array => "array",
            NodeType::Object => "object",
            NodeType::Int8 => "int8",
            NodeType::Int16 => "int16",
            NodeType::Int32 => "int32",
            NodeType::Int64 => "int64",
            NodeType::UInt32 => "uint32",
            NodeType::Float32 => "float32",
            NodeType::Float64 => "float64",
            NodeType::Guid => "guid",
            NodeType::Binary => "binary",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug)]
#[repr(transparent)]
pub struct InvalidNodeType(u8);

impl TryFrom<u8> for NodeType {
    type Error = InvalidNodeType;

    #[inline]
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        let node_type = match MarkerKind::of(value) {
            MarkerKind::Literal(_) | MarkerKind::Number(_) => NodeType::Number,
            MarkerKind::SystemString(_)
            | MarkerKind::UserString1(_)
            | MarkerKind::UserString2(_)
            | MarkerKind::GuidString(_)
            | MarkerKind::CompressedString(_)
            | MarkerKind::EncodedLengthString(_)
            | MarkerKind::String(_)
            | MarkerKind::ReferenceString(_) => NodeType::String,
            MarkerKind::Float32 => NodeType::Float32,
            MarkerKind::Float64 => NodeType::Float64,
            MarkerKind::Null => NodeType::Null,
            MarkerKind::False => NodeType::False,
            MarkerKind::True => NodeType::True,
            MarkerKind::Guid => NodeType::Guid,
            MarkerKind::Int8 => NodeType::Int8,
            MarkerKind::Int16 => NodeType::Int16,
            MarkerKind::Int32 => NodeType::Int32,
            MarkerKind::Int64 => NodeType::Int64,
            MarkerKind::UInt32 => NodeType::UInt32,
            MarkerKind::Binary(_) => NodeType::Binary,
            MarkerKind::Array(_) => NodeType::Array,
            MarkerKind::Object(_) => NodeType::Object,
            MarkerKind::Invalid => return Err(InvalidNodeType(value)),
        };
        Ok(node_type)
    }
}

impl Display for InvalidNodeType {
    #[inline]
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "invalid type marker '{:#04x}'", self.0)
    }
}

impl Error for InvalidNodeType {}

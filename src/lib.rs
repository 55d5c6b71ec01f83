//! Encoding and decoding support for a compact binary JSON format in Rust.
//!
//! Every value starts with a one-byte type marker. The marker alone tells how long the value
//! is, so a reader can skip any value without decoding it, and arrays and objects can be
//! enumerated lazily.
//!
//! ## Optional features
//!
//! ### `serde`
//!
//! When this optional dependency is enabled, `BinaryJsonBuf`, `StringDictionary` and
//! `WriterOptions` implement the `serde::Serialize` and `serde::Deserialize` traits.
//!
//! ## Binary format
//!
//! ```BNF
//! value ::= marker payload
//!
//! marker ::=
//!     0x00..0x1F |    // integer literal 0..31, no payload
//!     0x20..0x3F |    // system string, no payload
//!     0x40..0x5F |    // 1-byte user string, no payload
//!     0x60..0x67 |    // 2-byte user string, one id byte follows
//!     0x75..0x77 |    // GUID string: lowercase, uppercase, double-quoted lowercase
//!     0x78..0x7F |    // compressed string
//!     0x80..0xBF |    // string of length (marker - 0x80)
//!     0xC0..0xC2 |    // string with 1, 2 or 4 byte length
//!     0xC3..0xC6 |    // reference string with 1, 2, 3 or 4 byte offset
//!     0xC8..0xCC |    // number: uint8, int16, int32, int64, double
//!     0xCD | 0xCE |   // float32, float64
//!     0xD0..0xD3 |    // null, false, true, guid
//!     0xD8..0xDC |    // int8, int16, int32, int64, uint32
//!     0xDD..0xDF |    // binary with 1, 2 or 4 byte length
//!     0xE0..0xE7 |    // array
//!     0xE8..0xEF      // object
//!
//! // containers, shown for arrays; objects hold name/value pairs instead of items
//! array ::=
//!     0xE0 |                                  // empty
//!     0xE1 value |                            // single item
//!     (0xE2 | 0xE3 | 0xE4) length value* |    // 1, 2 or 4 byte length
//!     (0xE5 | 0xE6 | 0xE7) length count value*
//!
//! length ::= uint8 | uint16 | uint32  // payload bytes, little-endian
//! count ::= uint8 | uint16 | uint32   // number of children, same width as length
//! ```
//!
//! ## Usage
//!
//! ### Writing
//!
//! To encode a value, use [`Writer`]:
//!
//! ```rust
//! use jsonbin::{NodeType, Writer, WriterOptions};
//!
//! let mut writer = Writer::try_new(WriterOptions::default()).unwrap();
//! writer.write_array_start().unwrap();
//! writer.write_integer(1).unwrap();
//! writer.write_string("two").unwrap();
//! writer.write_array_end().unwrap();
//! let value = writer.finish().unwrap();
//! assert_eq!(value.node_type().unwrap(), NodeType::Array);
//! assert_eq!(value.as_bytes(), &[0xE2, 0x05, 0x01, 0x83, b't', b'w', b'o']);
//! ```
//!
//! To encode json text, use [`BinaryJsonBuf::parse`]:
//!
//! ```rust
//! use jsonbin::{BinaryJsonBuf, NodeType};
//!
//! let value = BinaryJsonBuf::parse(r#"{"name": "x", "tags": [true, null]}"#).unwrap();
//! assert_eq!(value.node_type().unwrap(), NodeType::Object);
//! assert_eq!(value.item_count().unwrap(), 2);
//! ```
//!
//! ### Reading
//!
//! ```rust
//! use jsonbin::{get_value_length, BinaryJson, Number64};
//!
//! let bytes = [0xE2, 0x04, 0xC8, 0xFF, 0x05, 0xD2];
//! assert_eq!(get_value_length(&bytes).unwrap(), 6);
//!
//! let value = BinaryJson::new(&bytes).unwrap();
//! let items = value.array_items().unwrap();
//! let numbers: Vec<_> = items
//!     .iter()
//!     .filter_map(|item| jsonbin::try_get_number_value(item.unwrap()))
//!     .map(|(number, _)| number)
//!     .collect();
//! assert_eq!(numbers, vec![Number64::Int(255), Number64::Int(5)]);
//! ```
//!
//! ### User strings
//!
//! Strings can be interned into a [`StringDictionary`]. The same dictionary is needed to read
//! them back:
//!
//! ```rust
//! use jsonbin::{BinaryJsonBuf, StringDictionary, WriterOptions};
//!
//! let json = serde_json::json!({"color": "red"});
//! let mut dict = StringDictionary::new();
//! let value = BinaryJsonBuf::from_json_with(&json, WriterOptions::default(), Some(&mut dict)).unwrap();
//! assert_eq!(value.as_bytes(), &[0xE9, 0x40, 0x41]);
//! assert_eq!(value.to_json(Some(&dict)).unwrap(), json);
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

mod binary;
mod dictionary;
mod document;
mod error;
mod json;
mod length;
mod marker;
mod node_type;
mod number;
mod offset;
mod options;
mod string;
mod vec;
mod writer;

#[cfg(feature = "serde")]
mod serde;

pub use self::{
    binary::{MAX_NESTED_DEPTH, MAX_USER_STRING_COUNT},
    dictionary::StringDictionary,
    document::{
        enumerate_array_items, enumerate_array_items_mut, enumerate_object_properties,
        enumerate_object_properties_mut, get_item_count, ArrayItemList, ArrayItems, ArrayItemsMut, BinaryJson,
        BinaryJsonBuf, ObjectProperties, ObjectPropertiesMut, ObjectProperty, ObjectPropertyList, ObjectPropertyMut,
    },
    error::{Error, Result},
    length::{get_value_length, try_get_value_length, value_length_entry, ValueLengthEntry},
    marker::{CompressedKind, ContainerShape, GuidCase, LengthWidth, MarkerKind, NumberKind, TypeMarker},
    node_type::{InvalidNodeType, NodeType},
    number::{
        encode_float32, encode_float64, encode_guid, encode_int16, encode_int32, encode_int64, encode_int8,
        encode_number, encode_uint32, get_float32_value, get_float64_value, get_guid_value, get_int16_value,
        get_int32_value, get_int64_value, get_int8_value, get_number_value, get_uint32_value, try_get_float32_value,
        try_get_float64_value, try_get_guid_value, try_get_int16_value, try_get_int32_value, try_get_int64_value,
        try_get_int8_value, try_get_number_value, try_get_uint32_value, Number64,
    },
    offset::get_first_value_offset,
    options::WriterOptions,
    string::{
        decode_guid_string, encode_user_string_id, get_encoded_string_type_marker, get_string_value,
        get_system_string, get_system_string_id, try_encode_guid_string, try_get_user_string_id,
        MultiByteTypeMarker, StringValue, SYSTEM_STRINGS,
    },
    writer::Writer,
};

//! Conversion between `serde_json::Value` and binary JSON.

use crate::binary::{GUID_SIZE, MAX_NESTED_DEPTH, TYPE_MARKER_SIZE};
use crate::dictionary::StringDictionary;
use crate::document::{enumerate_array_items, enumerate_object_properties, BinaryJson, BinaryJsonBuf};
use crate::error::{ensure_len, Error, Result};
use crate::marker::MarkerKind;
use crate::number::{
    get_float32_value, get_float64_value, get_guid_value, get_int16_value, get_int32_value, get_int64_value,
    get_int8_value, get_number_value, get_uint32_value, Number64,
};
use crate::options::WriterOptions;
use crate::string::get_string_value;
use crate::writer::Writer;
use serde_json::{Map, Value};
use std::fmt::Write;
use tracing::debug;

impl TryFrom<&serde_json::Value> for BinaryJsonBuf {
    type Error = Error;

    #[inline]
    fn try_from(value: &serde_json::Value) -> Result<Self> {
        BinaryJsonBuf::from_json_with(value, WriterOptions::default(), None)
    }
}

impl BinaryJsonBuf {
    /// Parses a json string to `BinaryJsonBuf`.
    #[inline]
    pub fn parse<T: AsRef<str>>(str: T) -> Result<Self> {
        let json: Value = serde_json::from_str(str.as_ref()).map_err(Error::JsonError)?;
        BinaryJsonBuf::try_from(&json)
    }

    /// Encodes `value`, interning strings into `dictionary` when one is given.
    pub fn from_json_with(
        value: &Value,
        options: WriterOptions,
        dictionary: Option<&mut StringDictionary>,
    ) -> Result<Self> {
        match dictionary {
            Some(dictionary) => {
                let mut writer = Writer::with_dictionary(options, dictionary)?;
                writer.write_json(value)?;
                writer.finish()
            }
            None => {
                let mut writer = Writer::try_new(options)?;
                writer.write_json(value)?;
                writer.finish()
            }
        }
    }
}

impl Writer<'_> {
    /// Writes a whole `serde_json::Value` at the current position.
    pub fn write_json(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::Null => self.write_null(),
            Value::Bool(val) => self.write_bool(*val),
            Value::Number(val) => self.write_number(json_number(val)?),
            Value::String(val) => self.write_string(val),
            Value::Array(array) => {
                self.write_array_start()?;
                for item in array {
                    self.write_json(item)?;
                }
                self.write_array_end()
            }
            Value::Object(object) => {
                self.write_object_start()?;
                for (key, item) in object {
                    self.write_field_name(key)?;
                    self.write_json(item)?;
                }
                self.write_object_end()
            }
        }
    }
}

/// Integers that fit `i64` stay integers; everything else becomes a double.
#[inline]
fn json_number(val: &serde_json::Number) -> Result<Number64> {
    if let Some(v) = val.as_i64() {
        return Ok(Number64::Int(v));
    }
    match val.as_f64() {
        Some(v) if v.is_finite() => Ok(Number64::Double(v)),
        _ => {
            debug!(number = %val, "number does not fit a double");
            Err(Error::NumberOutOfRange)
        }
    }
}

impl BinaryJson {
    /// Decodes the value into a `serde_json::Value`.
    ///
    /// User strings are looked up in `dict`. Binary values and compressed strings have no json
    /// counterpart and fail.
    #[inline]
    pub fn to_json(&self, dict: Option<&StringDictionary>) -> Result<Value> {
        let root = self.as_bytes();
        value_to_json(root, root, dict, 0).map_err(|e| {
            debug!(error = %e, "failed to convert binary json to json");
            e
        })
    }
}

fn value_to_json(root: &[u8], bytes: &[u8], dict: Option<&StringDictionary>, depth: usize) -> Result<Value> {
    ensure_len(bytes, TYPE_MARKER_SIZE)?;
    let marker = bytes[0];
    let value = match MarkerKind::of(marker) {
        MarkerKind::Null => Value::Null,
        MarkerKind::False => Value::Bool(false),
        MarkerKind::True => Value::Bool(true),
        MarkerKind::Literal(_) | MarkerKind::Number(_) => number_to_json(get_number_value(bytes)?)?,
        MarkerKind::Int8 => Value::from(get_int8_value(bytes)?),
        MarkerKind::Int16 => Value::from(get_int16_value(bytes)?),
        MarkerKind::Int32 => Value::from(get_int32_value(bytes)?),
        MarkerKind::Int64 => Value::from(get_int64_value(bytes)?),
        MarkerKind::UInt32 => Value::from(get_uint32_value(bytes)?),
        MarkerKind::Float32 => number_to_json(Number64::Double(get_float32_value(bytes)? as f64))?,
        MarkerKind::Float64 => number_to_json(Number64::Double(get_float64_value(bytes)?))?,
        MarkerKind::Guid => Value::String(format_guid(&get_guid_value(bytes)?)),
        MarkerKind::SystemString(_)
        | MarkerKind::UserString1(_)
        | MarkerKind::UserString2(_)
        | MarkerKind::GuidString(_)
        | MarkerKind::CompressedString(_)
        | MarkerKind::EncodedLengthString(_)
        | MarkerKind::String(_)
        | MarkerKind::ReferenceString(_) => Value::String(get_string_value(root, bytes, dict)?.into_string()?),
        MarkerKind::Array(_) => {
            let depth = enter(depth)?;
            let mut array = Vec::new();
            for item in enumerate_array_items(bytes)? {
                array.push(value_to_json(root, item?, dict, depth)?);
            }
            Value::Array(array)
        }
        MarkerKind::Object(_) => {
            let depth = enter(depth)?;
            let mut object = Map::new();
            for property in enumerate_object_properties(bytes)? {
                let property = property?;
                let name = get_string_value(root, property.name, dict)?.into_string()?;
                object.insert(name, value_to_json(root, property.value, dict, depth)?);
            }
            Value::Object(object)
        }
        MarkerKind::Binary(_) | MarkerKind::Invalid => return Err(Error::InvalidToken { marker }),
    };
    Ok(value)
}

#[inline]
fn enter(depth: usize) -> Result<usize> {
    if depth >= MAX_NESTED_DEPTH {
        return Err(Error::NestedTooDeeply {
            limit: MAX_NESTED_DEPTH,
        });
    }
    Ok(depth + 1)
}

#[inline]
fn number_to_json(number: Number64) -> Result<Value> {
    match number {
        Number64::Int(v) => Ok(Value::from(v)),
        Number64::Double(v) => serde_json::Number::from_f64(v)
            .map(Value::Number)
            .ok_or(Error::NumberOutOfRange),
    }
}

/// Formats raw GUID bytes in order as `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx`.
fn format_guid(guid: &[u8; GUID_SIZE]) -> String {
    let mut text = String::with_capacity(36);
    for (i, b) in guid.iter().enumerate() {
        if matches!(i, 4 | 6 | 8 | 10) {
            text.push('-');
        }
        // writing to a String cannot fail
        let _ = write!(text, "{:02x}", b);
    }
    text
}

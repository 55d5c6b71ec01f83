//! Streaming binary JSON writer.

use crate::binary::{
    ARRAY_COUNT_THRESHOLD, ARRAY_LARGE_PAYLOAD, GUID_SIZE, MAX_NESTED_DEPTH, MAX_USER_STRING_LENGTH,
    MIN_USER_STRING_LENGTH,
};
use crate::dictionary::StringDictionary;
use crate::document::BinaryJsonBuf;
use crate::error::{Error, Result};
use crate::marker::{ContainerShape, LengthWidth, TypeMarker};
use crate::number::{
    encode_float32, encode_float64, encode_guid, encode_int16, encode_int32, encode_int64, encode_int8,
    encode_number, encode_uint32, Number64,
};
use crate::options::WriterOptions;
use crate::string::{encode_user_string_id, get_system_string_id, try_encode_guid_string, MultiByteTypeMarker};
use crate::vec::VecExt;
use std::collections::HashMap;
use tracing::trace;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum ScopeKind {
    Array,
    Object,
}

#[derive(Debug)]
struct Scope {
    kind: ScopeKind,
    /// Position of the one-byte marker placeholder.
    start: usize,
    count: usize,
    /// Set between a field name and its value.
    has_field_name: bool,
}

/// A string written in full that later copies may point back to.
#[derive(Debug)]
struct SharedString {
    /// Current position of the string's marker.
    offset: usize,
    /// Upper bound of `offset` once every open container header is spliced in.
    max_offset: usize,
}

/// A reference string whose offset field is filled in by [`Writer::finish`].
#[derive(Debug)]
struct ReferenceSite {
    position: usize,
    width: usize,
    target: usize,
}

/// Header growth of the largest container shape over its placeholder.
const MAX_HEADER_GROWTH: usize = 8;
const MIN_REFERENCE_STRING_LENGTH: usize = 2;
const MAX_REFERENCE_STRING_VALUE_LENGTH: usize = 88;
const UINT24_MAX: usize = 0xFF_FFFF;

/// Writes one value, possibly nested, into a growing buffer.
///
/// Containers are written with a placeholder marker; closing a container picks the smallest
/// header that fits and splices it in.
///
/// ```rust
/// use jsonbin::{Writer, WriterOptions};
///
/// let mut writer = Writer::try_new(WriterOptions::default()).unwrap();
/// writer.write_object_start().unwrap();
/// writer.write_field_name("id").unwrap();
/// writer.write_integer(7).unwrap();
/// writer.write_object_end().unwrap();
/// let value = writer.finish().unwrap();
/// assert_eq!(value.as_bytes(), &[0xE9, 0x2C, 0x07]);
/// ```
#[derive(Debug)]
pub struct Writer<'d> {
    bytes: Vec<u8>,
    options: WriterOptions,
    dictionary: Option<&'d mut StringDictionary>,
    stack: Vec<Scope>,
    root_written: bool,
    shared_strings: Vec<SharedString>,
    shared_indexes: HashMap<String, usize>,
    reference_sites: Vec<ReferenceSite>,
}

impl Writer<'static> {
    /// Creates a writer without a user string dictionary.
    #[inline]
    pub fn try_new(options: WriterOptions) -> Result<Self> {
        Writer::build(options, None)
    }
}

impl<'d> Writer<'d> {
    /// Creates a writer that interns strings into `dictionary`.
    #[inline]
    pub fn with_dictionary(options: WriterOptions, dictionary: &'d mut StringDictionary) -> Result<Self> {
        Writer::build(options, Some(dictionary))
    }

    fn build(options: WriterOptions, dictionary: Option<&'d mut StringDictionary>) -> Result<Self> {
        Ok(Writer {
            bytes: <Vec<u8> as VecExt>::try_with_capacity(options.initial_capacity)?,
            options,
            dictionary,
            stack: Vec::new(),
            root_written: false,
            shared_strings: Vec::new(),
            shared_indexes: HashMap::new(),
            reference_sites: Vec::new(),
        })
    }

    #[inline]
    pub fn dictionary(&self) -> Option<&StringDictionary> {
        self.dictionary.as_deref()
    }

    /// Returns the number of containers currently open.
    #[inline]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    #[inline]
    pub fn write_array_start(&mut self) -> Result<()> {
        self.write_container_start(ScopeKind::Array)
    }

    #[inline]
    pub fn write_array_end(&mut self) -> Result<()> {
        self.write_container_end(ScopeKind::Array)
    }

    #[inline]
    pub fn write_object_start(&mut self) -> Result<()> {
        self.write_container_start(ScopeKind::Object)
    }

    #[inline]
    pub fn write_object_end(&mut self) -> Result<()> {
        self.write_container_end(ScopeKind::Object)
    }

    /// Writes the name of the next property. Must be followed by exactly one value.
    pub fn write_field_name(&mut self, name: &str) -> Result<()> {
        match self.stack.last() {
            Some(scope) if scope.kind == ScopeKind::Object && !scope.has_field_name => {}
            _ => return Err(Error::UnexpectedToken),
        }
        self.push_string(name, true)?;
        if let Some(scope) = self.stack.last_mut() {
            scope.has_field_name = true;
        }
        Ok(())
    }

    #[inline]
    pub fn write_string(&mut self, value: &str) -> Result<()> {
        self.check_value()?;
        self.push_string(value, false)?;
        self.value_written();
        Ok(())
    }

    #[inline]
    pub fn write_number(&mut self, value: Number64) -> Result<()> {
        self.check_value()?;
        encode_number(value, &mut self.bytes);
        self.value_written();
        Ok(())
    }

    /// Writes an integer in its most compact number form.
    #[inline]
    pub fn write_integer(&mut self, value: i64) -> Result<()> {
        self.write_number(Number64::Int(value))
    }

    #[inline]
    pub fn write_double(&mut self, value: f64) -> Result<()> {
        self.write_number(Number64::Double(value))
    }

    #[inline]
    pub fn write_bool(&mut self, value: bool) -> Result<()> {
        self.check_value()?;
        self.bytes
            .push_u8(if value { TypeMarker::TRUE } else { TypeMarker::FALSE });
        self.value_written();
        Ok(())
    }

    #[inline]
    pub fn write_null(&mut self) -> Result<()> {
        self.check_value()?;
        self.bytes.push_u8(TypeMarker::NULL);
        self.value_written();
        Ok(())
    }

    #[inline]
    pub fn write_int8(&mut self, value: i8) -> Result<()> {
        self.check_value()?;
        encode_int8(value, &mut self.bytes);
        self.value_written();
        Ok(())
    }

    #[inline]
    pub fn write_int16(&mut self, value: i16) -> Result<()> {
        self.check_value()?;
        encode_int16(value, &mut self.bytes);
        self.value_written();
        Ok(())
    }

    #[inline]
    pub fn write_int32(&mut self, value: i32) -> Result<()> {
        self.check_value()?;
        encode_int32(value, &mut self.bytes);
        self.value_written();
        Ok(())
    }

    #[inline]
    pub fn write_int64(&mut self, value: i64) -> Result<()> {
        self.check_value()?;
        encode_int64(value, &mut self.bytes);
        self.value_written();
        Ok(())
    }

    #[inline]
    pub fn write_uint32(&mut self, value: u32) -> Result<()> {
        self.check_value()?;
        encode_uint32(value, &mut self.bytes);
        self.value_written();
        Ok(())
    }

    #[inline]
    pub fn write_float32(&mut self, value: f32) -> Result<()> {
        self.check_value()?;
        encode_float32(value, &mut self.bytes);
        self.value_written();
        Ok(())
    }

    #[inline]
    pub fn write_float64(&mut self, value: f64) -> Result<()> {
        self.check_value()?;
        encode_float64(value, &mut self.bytes);
        self.value_written();
        Ok(())
    }

    #[inline]
    pub fn write_guid(&mut self, value: &[u8; GUID_SIZE]) -> Result<()> {
        self.check_value()?;
        encode_guid(value, &mut self.bytes);
        self.value_written();
        Ok(())
    }

    pub fn write_binary(&mut self, value: &[u8]) -> Result<()> {
        self.check_value()?;
        let len = value.len();
        let (marker, width) = if len <= u8::MAX as usize {
            (TypeMarker::BINARY_1_BYTE_LENGTH, 1)
        } else if len <= u16::MAX as usize {
            (TypeMarker::BINARY_2_BYTE_LENGTH, 2)
        } else if len <= u32::MAX as usize {
            (TypeMarker::BINARY_4_BYTE_LENGTH, 4)
        } else {
            return Err(Error::ValueTooLarge(len));
        };
        self.bytes.try_reserve(1 + width + len)?;
        self.bytes.push_u8(marker);
        self.bytes.push_length(len, width);
        self.bytes.push_bytes(value);
        self.value_written();
        Ok(())
    }

    /// Returns the written value. Fails if a container is still open or nothing was written.
    pub fn finish(mut self) -> Result<BinaryJsonBuf> {
        if !self.stack.is_empty() || !self.root_written {
            return Err(Error::UnexpectedToken);
        }
        for site in &self.reference_sites {
            let offset = self.shared_strings[site.target].offset as u32;
            let field = site.position + 1;
            self.bytes[field..field + site.width].copy_from_slice(&offset.to_le_bytes()[..site.width]);
        }
        Ok(unsafe { BinaryJsonBuf::new_unchecked(self.bytes) })
    }

    /// Fails unless a value may be written at the current position.
    fn check_value(&self) -> Result<()> {
        match self.stack.last() {
            None if self.root_written => Err(Error::UnexpectedToken),
            None => Ok(()),
            Some(scope) => match scope.kind {
                ScopeKind::Array => Ok(()),
                ScopeKind::Object if scope.has_field_name => Ok(()),
                ScopeKind::Object => Err(Error::UnexpectedToken),
            },
        }
    }

    /// Counts a value accepted by `check_value` once its bytes are written.
    fn value_written(&mut self) {
        match self.stack.last_mut() {
            None => self.root_written = true,
            Some(scope) => {
                scope.has_field_name = false;
                scope.count += 1;
            }
        }
    }

    fn write_container_start(&mut self, kind: ScopeKind) -> Result<()> {
        if self.stack.len() >= MAX_NESTED_DEPTH {
            return Err(Error::NestedTooDeeply {
                limit: MAX_NESTED_DEPTH,
            });
        }
        self.check_value()?;
        self.stack.try_reserve(1)?;
        let start = self.bytes.len();
        // placeholder, replaced by the real header on close
        self.bytes.push_u8(TypeMarker::INVALID);
        self.value_written();
        self.stack.push(Scope {
            kind,
            start,
            count: 0,
            has_field_name: false,
        });
        Ok(())
    }

    fn write_container_end(&mut self, kind: ScopeKind) -> Result<()> {
        let (start, count) = match self.stack.last() {
            Some(scope) if scope.kind == kind && !scope.has_field_name => (scope.start, scope.count),
            _ => return Err(Error::UnexpectedToken),
        };

        let payload = self.bytes.len() - start - 1;
        let is_array = kind == ScopeKind::Array;
        let shape = container_shape(is_array, count, payload)?;
        let base = if is_array { TypeMarker::ARR0 } else { TypeMarker::OBJ0 };

        let mut header: Vec<u8> = <Vec<u8> as VecExt>::try_with_capacity(shape.header_size())?;
        header.push_u8(base + shape.index());
        match shape {
            ContainerShape::Empty | ContainerShape::Single => {}
            ContainerShape::Length(w) => header.push_length(payload, w.size()),
            ContainerShape::LengthAndCount(w) => {
                header.push_length(payload, w.size());
                header.push_length(count, w.size());
            }
        }
        self.bytes.try_reserve(header.len())?;

        trace!(marker = header[0], count, payload, "closed container");
        self.stack.pop();
        self.bytes.replace_placeholder(start, &header);
        self.shift_positions(start, header.len() - 1);
        Ok(())
    }

    /// Moves every recorded position after `pos` by `delta` bytes.
    fn shift_positions(&mut self, pos: usize, delta: usize) {
        if delta == 0 {
            return;
        }
        let first = self.shared_strings.partition_point(|s| s.offset <= pos);
        for shared in &mut self.shared_strings[first..] {
            shared.offset += delta;
        }
        let first = self.reference_sites.partition_point(|r| r.position <= pos);
        for site in &mut self.reference_sites[first..] {
            site.position += delta;
        }
    }

    fn push_string(&mut self, value: &str, is_field_name: bool) -> Result<()> {
        let len = value.len();
        if len > u32::MAX as usize {
            return Err(Error::ValueTooLarge(len));
        }
        self.bytes.try_reserve(1 + 4 + len)?;

        if let Some(marker) = self.encoded_string_marker(value) {
            self.bytes.push_bytes(marker.as_bytes());
            return Ok(());
        }

        if !is_field_name && self.options.encode_guid_strings {
            if let Some(encoded) = try_encode_guid_string(value) {
                self.bytes.push_bytes(&encoded);
                return Ok(());
            }
        }

        let max_len = if is_field_name { usize::MAX } else { MAX_REFERENCE_STRING_VALUE_LENGTH };
        if self.options.encode_reference_strings
            && (MIN_REFERENCE_STRING_LENGTH..=max_len).contains(&len)
            && self.try_push_reference(value)?
        {
            return Ok(());
        }

        if let Some(marker) = TypeMarker::encode_string_length(len) {
            self.bytes.push_u8(marker);
        } else if len < u8::MAX as usize {
            self.bytes.push_u8(TypeMarker::STR_L1);
            self.bytes.push_length(len, 1);
        } else if len < u16::MAX as usize {
            self.bytes.push_u8(TypeMarker::STR_L2);
            self.bytes.push_length(len, 2);
        } else {
            self.bytes.push_u8(TypeMarker::STR_L4);
            self.bytes.push_length(len, 4);
        }
        self.bytes.push_bytes(value.as_bytes());
        Ok(())
    }

    /// Writes a reference to an earlier copy of `value`, or records the copy about to be written.
    ///
    /// Returns `true` when a reference was written.
    fn try_push_reference(&mut self, value: &str) -> Result<bool> {
        if let Some(&target) = self.shared_indexes.get(value) {
            let width = match reference_width(self.shared_strings[target].max_offset) {
                Some(width) => width,
                None => return Ok(false),
            };
            self.reference_sites.try_reserve(1)?;
            let position = self.bytes.len();
            self.bytes.push_u8(TypeMarker::STR_R1 + (width - 1) as u8);
            self.bytes.push_bytes(&[0; 4][..width]);
            self.reference_sites.push(ReferenceSite { position, width, target });
            trace!(position, index = target, width, "wrote reference string");
            return Ok(true);
        }

        let offset = self.bytes.len();
        let max_offset = offset + self.stack.len() * MAX_HEADER_GROWTH;
        // a reference is 2 to 5 bytes, only worth it for strings at least that long
        let len = value.len();
        let worth_sharing = (len >= 5 && max_offset <= u32::MAX as usize)
            || (max_offset <= u8::MAX as usize && len >= 2)
            || (max_offset <= u16::MAX as usize && len >= 3)
            || (max_offset <= UINT24_MAX && len >= 4);
        if worth_sharing {
            self.shared_strings.try_reserve(1)?;
            self.shared_indexes.insert(value.to_owned(), self.shared_strings.len());
            self.shared_strings.push(SharedString { offset, max_offset });
        }
        Ok(false)
    }

    /// System string marker, or a user string marker when interning is enabled.
    fn encoded_string_marker(&mut self, value: &str) -> Option<MultiByteTypeMarker> {
        if let Some(id) = get_system_string_id(value) {
            return Some(MultiByteTypeMarker::one(TypeMarker::SYSTEM_STRING_1_BYTE_MIN + id as u8));
        }
        if !self.options.use_user_strings || !(MIN_USER_STRING_LENGTH..=MAX_USER_STRING_LENGTH).contains(&value.len()) {
            return None;
        }
        let dictionary = self.dictionary.as_deref_mut()?;
        dictionary.try_add_string(value).and_then(encode_user_string_id)
    }
}

/// Offset field width able to hold `max_offset`.
#[inline]
fn reference_width(max_offset: usize) -> Option<usize> {
    match max_offset {
        0..=0xFF => Some(1),
        0x100..=0xFFFF => Some(2),
        0x1_0000..=UINT24_MAX => Some(3),
        _ if max_offset <= u32::MAX as usize => Some(4),
        _ => None,
    }
}

/// Picks the smallest header for a container with `count` children in `payload` bytes.
fn container_shape(is_array: bool, count: usize, payload: usize) -> Result<ContainerShape> {
    let wants_count = |large: bool| is_array && (count > ARRAY_COUNT_THRESHOLD || large);
    let shape = match count {
        0 => ContainerShape::Empty,
        1 => ContainerShape::Single,
        _ if payload <= u8::MAX as usize => {
            if wants_count(false) {
                ContainerShape::LengthAndCount(LengthWidth::One)
            } else {
                ContainerShape::Length(LengthWidth::One)
            }
        }
        _ if payload <= u16::MAX as usize => {
            if wants_count(payload > ARRAY_LARGE_PAYLOAD) {
                ContainerShape::LengthAndCount(LengthWidth::Two)
            } else {
                ContainerShape::Length(LengthWidth::Two)
            }
        }
        _ if payload <= u32::MAX as usize => {
            if is_array {
                ContainerShape::LengthAndCount(LengthWidth::Four)
            } else {
                ContainerShape::Length(LengthWidth::Four)
            }
        }
        _ => return Err(Error::ValueTooLarge(payload)),
    };
    Ok(shape)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_shape() {
        assert_eq!(container_shape(true, 0, 0).unwrap(), ContainerShape::Empty);
        assert_eq!(container_shape(false, 1, 300).unwrap(), ContainerShape::Single);
        assert_eq!(
            container_shape(true, 16, 16).unwrap(),
            ContainerShape::Length(LengthWidth::One)
        );
        assert_eq!(
            container_shape(true, 17, 17).unwrap(),
            ContainerShape::LengthAndCount(LengthWidth::One)
        );
        assert_eq!(
            container_shape(false, 17, 34).unwrap(),
            ContainerShape::Length(LengthWidth::One)
        );
        assert_eq!(
            container_shape(true, 2, 0x1000).unwrap(),
            ContainerShape::Length(LengthWidth::Two)
        );
        assert_eq!(
            container_shape(true, 2, 0x1001).unwrap(),
            ContainerShape::LengthAndCount(LengthWidth::Two)
        );
        assert_eq!(
            container_shape(false, 2, 0x10000).unwrap(),
            ContainerShape::Length(LengthWidth::Four)
        );
        assert_eq!(
            container_shape(true, 2, 0x10000).unwrap(),
            ContainerShape::LengthAndCount(LengthWidth::Four)
        );
    }

    #[test]
    fn test_misuse() {
        let mut writer = Writer::try_new(WriterOptions::default()).unwrap();
        writer.write_object_start().unwrap();
        assert!(matches!(writer.write_null(), Err(Error::UnexpectedToken)));
        writer.write_field_name("a").unwrap();
        assert!(matches!(writer.write_field_name("b"), Err(Error::UnexpectedToken)));
        assert!(matches!(writer.write_object_end(), Err(Error::UnexpectedToken)));
        assert!(matches!(writer.write_array_end(), Err(Error::UnexpectedToken)));
        writer.write_null().unwrap();
        writer.write_object_end().unwrap();
        assert!(matches!(writer.write_null(), Err(Error::UnexpectedToken)));

        let writer = Writer::try_new(WriterOptions::default()).unwrap();
        assert!(matches!(writer.finish(), Err(Error::UnexpectedToken)));
    }
}

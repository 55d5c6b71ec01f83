//! Binary JSON documents.

mod array;
mod object;

pub use crate::document::array::{
    enumerate_array_items, enumerate_array_items_mut, ArrayItemList, ArrayItems, ArrayItemsMut,
};
pub use crate::document::object::{
    enumerate_object_properties, enumerate_object_properties_mut, ObjectProperties, ObjectProperty,
    ObjectPropertyList, ObjectPropertyMut, ObjectPropertiesMut,
};

use crate::binary::TYPE_MARKER_SIZE;
use crate::dictionary::StringDictionary;
use crate::error::{ensure_len, Error, Result};
use crate::length::{get_value_length, read_length_field};
use crate::marker::{ContainerShape, MarkerKind, TypeMarker};
use crate::node_type::NodeType;
use crate::number::{get_number_value, Number64};
use crate::offset::get_first_value_offset;
use crate::string::{get_string_value, StringValue};
use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;

/// An owned binary JSON value, backed by a buffer holding exactly one encoded value.
#[derive(Clone, Eq, PartialEq)]
#[repr(transparent)]
pub struct BinaryJsonBuf {
    bytes: Vec<u8>,
}

impl BinaryJsonBuf {
    /// Creates a `BinaryJsonBuf`, checking that `bytes` holds exactly one value.
    #[inline]
    pub fn new(bytes: Vec<u8>) -> Result<Self> {
        BinaryJson::new(&bytes)?;
        Ok(BinaryJsonBuf { bytes })
    }

    /// Creates a new `BinaryJsonBuf` from `Vec<u8>`.
    ///
    /// # Safety
    ///
    /// Callers should guarantee the `bytes` holds exactly one encoded value.
    #[inline]
    pub unsafe fn new_unchecked(bytes: Vec<u8>) -> Self {
        debug_assert!(!bytes.is_empty());
        BinaryJsonBuf { bytes }
    }

    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// A slice of a binary JSON value. This can be created from a [`BinaryJsonBuf`] or any bytes
/// holding exactly one encoded value.
#[derive(Eq, PartialEq)]
#[repr(transparent)]
pub struct BinaryJson {
    bytes: [u8],
}

impl Deref for BinaryJsonBuf {
    type Target = BinaryJson;

    #[inline]
    fn deref(&self) -> &BinaryJson {
        unsafe { BinaryJson::new_unchecked(&self.bytes) }
    }
}

impl Borrow<BinaryJson> for BinaryJsonBuf {
    #[inline]
    fn borrow(&self) -> &BinaryJson {
        self.deref()
    }
}

impl ToOwned for BinaryJson {
    type Owned = BinaryJsonBuf;

    #[inline]
    fn to_owned(&self) -> BinaryJsonBuf {
        BinaryJsonBuf {
            bytes: self.bytes.to_vec(),
        }
    }
}

impl AsRef<BinaryJson> for BinaryJsonBuf {
    #[inline]
    fn as_ref(&self) -> &BinaryJson {
        self
    }
}

impl AsRef<[u8]> for BinaryJson {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for BinaryJson {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BinaryJson(")?;
        for b in &self.bytes {
            write!(f, "{:02x}", b)?;
        }
        write!(f, ")")
    }
}

impl fmt::Debug for BinaryJsonBuf {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.deref(), f)
    }
}

impl BinaryJson {
    /// Creates a `BinaryJson`, checking that `bytes` holds exactly one value.
    #[inline]
    pub fn new<B: AsRef<[u8]> + ?Sized>(bytes: &B) -> Result<&BinaryJson> {
        let bytes = bytes.as_ref();
        let length = get_value_length(bytes)?;
        if length != bytes.len() {
            return Err(Error::TrailingBytes {
                expected: length,
                actual: bytes.len(),
            });
        }
        Ok(unsafe { Self::new_unchecked(bytes) })
    }

    /// Creates a new `BinaryJson` from the reference of `[u8]`.
    ///
    /// # Safety
    ///
    /// Callers should guarantee the `bytes` holds exactly one encoded value.
    #[inline]
    pub unsafe fn new_unchecked<B: AsRef<[u8]> + ?Sized>(bytes: &B) -> &BinaryJson {
        debug_assert!(!bytes.as_ref().is_empty());
        &*(bytes.as_ref() as *const [u8] as *const BinaryJson)
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    pub fn to_binary_json_buf(&self) -> Result<BinaryJsonBuf> {
        let mut bytes = Vec::new();
        bytes.try_reserve(self.bytes.len())?;
        bytes.extend_from_slice(&self.bytes);
        Ok(BinaryJsonBuf { bytes })
    }

    #[inline]
    pub fn type_marker(&self) -> TypeMarker {
        TypeMarker(self.bytes[0])
    }

    #[inline]
    pub fn node_type(&self) -> Result<NodeType> {
        let marker = self.bytes[0];
        NodeType::try_from(marker).map_err(|_| Error::InvalidToken { marker })
    }

    #[inline]
    pub fn value_length(&self) -> Result<usize> {
        get_value_length(&self.bytes)
    }

    /// If the value is an array, returns its items. Returns `Error::InvalidToken` otherwise.
    #[inline]
    pub fn array_items(&self) -> Result<ArrayItemList<'_>> {
        ArrayItemList::new(&self.bytes)
    }

    /// If the value is an object, returns its properties. Returns `Error::InvalidToken` otherwise.
    #[inline]
    pub fn object_properties(&self) -> Result<ObjectPropertyList<'_>> {
        ObjectPropertyList::new(&self.bytes)
    }

    #[inline]
    pub fn number(&self) -> Result<Number64> {
        get_number_value(&self.bytes)
    }

    /// If the value is a string, returns it. Reference strings resolve against this value.
    #[inline]
    pub fn string<'a>(&'a self, dict: Option<&'a StringDictionary>) -> Result<StringValue<'a>> {
        get_string_value(&self.bytes, &self.bytes, dict)
    }

    #[inline]
    pub fn bool(&self) -> Result<bool> {
        match self.bytes[0] {
            TypeMarker::TRUE => Ok(true),
            TypeMarker::FALSE => Ok(false),
            marker => Err(Error::InvalidToken { marker }),
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        self.type_marker().is_null()
    }

    /// Returns the number of items of an array or properties of an object.
    #[inline]
    pub fn item_count(&self) -> Result<usize> {
        get_item_count(&self.bytes)
    }
}

/// Returns the number of items of an array or properties of an object.
///
/// Containers with an explicit count report it directly; the others are counted by walking
/// their children.
pub fn get_item_count(bytes: &[u8]) -> Result<usize> {
    ensure_len(bytes, TYPE_MARKER_SIZE)?;
    let marker = bytes[0];
    let kind = MarkerKind::of(marker);
    match kind.container_shape() {
        Some(ContainerShape::Empty) => Ok(0),
        Some(ContainerShape::Single) => Ok(1),
        Some(ContainerShape::LengthAndCount(w)) => read_length_field(bytes, TYPE_MARKER_SIZE + w.size(), w),
        Some(ContainerShape::Length(_)) => {
            if matches!(kind, MarkerKind::Array(_)) {
                enumerate_array_items(bytes)?.try_fold(0, |count, item| item.map(|_| count + 1))
            } else {
                enumerate_object_properties(bytes)?.try_fold(0, |count, property| property.map(|_| count + 1))
            }
        }
        None => Err(Error::InvalidToken { marker }),
    }
}

/// Checks the container marker and returns the bytes holding its children.
#[inline]
pub(crate) fn scope_container(bytes: &[u8], is_expected: fn(TypeMarker) -> bool) -> Result<(usize, usize)> {
    ensure_len(bytes, TYPE_MARKER_SIZE)?;
    let marker = bytes[0];
    if !is_expected(TypeMarker(marker)) {
        return Err(Error::InvalidToken { marker });
    }
    let length = get_value_length(bytes)?;
    let offset = get_first_value_offset(marker);
    Ok((offset, length))
}

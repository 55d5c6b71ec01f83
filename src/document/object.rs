//! Object enumeration.

use crate::document::scope_container;
use crate::error::Result;
use crate::length::get_value_length;
use crate::marker::TypeMarker;

/// A property of an object: the bytes of its name and of its value.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct ObjectProperty<'a> {
    pub name: &'a [u8],
    pub value: &'a [u8],
}

/// A property whose name and value can be edited in place.
#[derive(Eq, PartialEq, Debug)]
pub struct ObjectPropertyMut<'a> {
    pub name: &'a mut [u8],
    pub value: &'a mut [u8],
}

/// Returns a lazy iterator over the properties of the object at `bytes[0]`.
///
/// Fails with `Error::InvalidToken` if the marker is not an object marker.
#[inline]
pub fn enumerate_object_properties(bytes: &[u8]) -> Result<ObjectProperties<'_>> {
    let (offset, length) = scope_container(bytes, TypeMarker::is_object)?;
    Ok(ObjectProperties::new(&bytes[offset..length]))
}

/// Like [`enumerate_object_properties`], but yields writable spans.
#[inline]
pub fn enumerate_object_properties_mut(bytes: &mut [u8]) -> Result<ObjectPropertiesMut<'_>> {
    let (offset, length) = scope_container(bytes, TypeMarker::is_object)?;
    Ok(ObjectPropertiesMut {
        remaining: &mut bytes[offset..length],
        failed: false,
    })
}

/// The properties of an object, which can be iterated any number of times.
#[derive(Copy, Clone, Debug)]
pub struct ObjectPropertyList<'a> {
    properties: &'a [u8],
}

impl<'a> ObjectPropertyList<'a> {
    /// Fails with `Error::InvalidToken` if the marker is not an object marker.
    #[inline]
    pub fn new(bytes: &'a [u8]) -> Result<Self> {
        let (offset, length) = scope_container(bytes, TypeMarker::is_object)?;
        Ok(ObjectPropertyList {
            properties: &bytes[offset..length],
        })
    }

    /// Gets an iterator over the properties, always starting from the first one.
    #[inline]
    pub fn iter(&self) -> ObjectProperties<'a> {
        ObjectProperties::new(self.properties)
    }

    /// Returns true if the object contains no properties.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl<'a> IntoIterator for &ObjectPropertyList<'a> {
    type Item = Result<ObjectProperty<'a>>;
    type IntoIter = ObjectProperties<'a>;

    #[inline]
    fn into_iter(self) -> ObjectProperties<'a> {
        self.iter()
    }
}

/// Splits the next name and value off the front of `bytes`.
#[inline]
fn property_lengths(bytes: &[u8]) -> Result<(usize, usize)> {
    let name_length = get_value_length(bytes)?;
    let value_length = get_value_length(&bytes[name_length..])?;
    Ok((name_length, value_length))
}

/// An iterator over the properties of an object.
///
/// After an error, the iterator is exhausted.
#[derive(Clone, Debug)]
pub struct ObjectProperties<'a> {
    remaining: &'a [u8],
    failed: bool,
}

impl<'a> ObjectProperties<'a> {
    #[inline]
    fn new(properties: &'a [u8]) -> Self {
        ObjectProperties {
            remaining: properties,
            failed: false,
        }
    }
}

impl<'a> Iterator for ObjectProperties<'a> {
    type Item = Result<ObjectProperty<'a>>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.remaining.is_empty() {
            return None;
        }
        match property_lengths(self.remaining) {
            Ok((name_length, value_length)) => {
                let (name, rest) = self.remaining.split_at(name_length);
                let (value, rest) = rest.split_at(value_length);
                self.remaining = rest;
                Some(Ok(ObjectProperty { name, value }))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

/// An iterator over the writable properties of an object.
#[derive(Debug)]
pub struct ObjectPropertiesMut<'a> {
    remaining: &'a mut [u8],
    failed: bool,
}

impl<'a> Iterator for ObjectPropertiesMut<'a> {
    type Item = Result<ObjectPropertyMut<'a>>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.remaining.is_empty() {
            return None;
        }
        match property_lengths(&*self.remaining) {
            Ok((name_length, value_length)) => {
                let remaining = std::mem::take(&mut self.remaining);
                let (name, rest) = remaining.split_at_mut(name_length);
                let (value, rest) = rest.split_at_mut(value_length);
                self.remaining = rest;
                Some(Ok(ObjectPropertyMut { name, value }))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

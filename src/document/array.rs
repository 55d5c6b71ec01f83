//! Array enumeration.

use crate::document::scope_container;
use crate::error::Result;
use crate::length::get_value_length;
use crate::marker::TypeMarker;

/// Returns a lazy iterator over the items of the array at `bytes[0]`.
///
/// Fails with `Error::InvalidToken` if the marker is not an array marker.
#[inline]
pub fn enumerate_array_items(bytes: &[u8]) -> Result<ArrayItems<'_>> {
    let (offset, length) = scope_container(bytes, TypeMarker::is_array)?;
    Ok(ArrayItems::new(&bytes[offset..length]))
}

/// Like [`enumerate_array_items`], but yields writable item spans.
#[inline]
pub fn enumerate_array_items_mut(bytes: &mut [u8]) -> Result<ArrayItemsMut<'_>> {
    let (offset, length) = scope_container(bytes, TypeMarker::is_array)?;
    Ok(ArrayItemsMut {
        remaining: &mut bytes[offset..length],
        failed: false,
    })
}

/// The items of an array, which can be iterated any number of times.
#[derive(Copy, Clone, Debug)]
pub struct ArrayItemList<'a> {
    items: &'a [u8],
}

impl<'a> ArrayItemList<'a> {
    /// Fails with `Error::InvalidToken` if the marker is not an array marker.
    #[inline]
    pub fn new(bytes: &'a [u8]) -> Result<Self> {
        let (offset, length) = scope_container(bytes, TypeMarker::is_array)?;
        Ok(ArrayItemList {
            items: &bytes[offset..length],
        })
    }

    /// Gets an iterator over the items, always starting from the first one.
    #[inline]
    pub fn iter(&self) -> ArrayItems<'a> {
        ArrayItems::new(self.items)
    }

    /// Returns true if the array contains no items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a> IntoIterator for &ArrayItemList<'a> {
    type Item = Result<&'a [u8]>;
    type IntoIter = ArrayItems<'a>;

    #[inline]
    fn into_iter(self) -> ArrayItems<'a> {
        self.iter()
    }
}

/// An iterator over the items of an array.
///
/// Yields each item's bytes. After an error, the iterator is exhausted.
#[derive(Clone, Debug)]
pub struct ArrayItems<'a> {
    remaining: &'a [u8],
    failed: bool,
}

impl<'a> ArrayItems<'a> {
    #[inline]
    fn new(items: &'a [u8]) -> Self {
        ArrayItems {
            remaining: items,
            failed: false,
        }
    }
}

impl<'a> Iterator for ArrayItems<'a> {
    type Item = Result<&'a [u8]>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.remaining.is_empty() {
            return None;
        }
        match get_value_length(self.remaining) {
            Ok(length) => {
                let (item, rest) = self.remaining.split_at(length);
                self.remaining = rest;
                Some(Ok(item))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

/// An iterator over the writable items of an array.
#[derive(Debug)]
pub struct ArrayItemsMut<'a> {
    remaining: &'a mut [u8],
    failed: bool,
}

impl<'a> Iterator for ArrayItemsMut<'a> {
    type Item = Result<&'a mut [u8]>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.remaining.is_empty() {
            return None;
        }
        match get_value_length(&*self.remaining) {
            Ok(length) => {
                let remaining = std::mem::take(&mut self.remaining);
                let (item, rest) = remaining.split_at_mut(length);
                self.remaining = rest;
                Some(Ok(item))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_restartable() {
        let bytes = [TypeMarker::ARR_L1, 3, 0x01, 0x02, 0xD0];
        let list = ArrayItemList::new(&bytes).unwrap();
        let first: Vec<_> = list.iter().map(|r| r.unwrap()).collect();
        let second: Vec<_> = list.iter().map(|r| r.unwrap()).collect();
        assert_eq!(first, second);
        assert_eq!(first, vec![&[0x01][..], &[0x02][..], &[0xD0][..]]);
    }

    #[test]
    fn test_stops_after_error() {
        let bytes = [TypeMarker::ARR_L1, 3, 0x01, 0xFF, 0xD0];
        let mut items = enumerate_array_items(&bytes).unwrap();
        assert_eq!(items.next().unwrap().unwrap(), &[0x01]);
        assert!(matches!(items.next(), Some(Err(Error::InvalidToken { marker: 0xFF }))));
        assert!(items.next().is_none());
    }
}

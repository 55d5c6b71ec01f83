//! User string dictionary.
//!
//! Interns strings into dense ids so that documents can refer to them with a one or two
//! byte user string marker. Ids are assigned in insertion order starting at 0 and never change.
//!
//! Two dictionaries compare equal when their checksums match. The checksum folds a 128-bit
//! hash of every string in id order, so the same strings added in a different order give a
//! different dictionary.

mod trie;

use crate::binary::MAX_USER_STRING_COUNT;
use crate::dictionary::trie::Trie;
use crate::error::{Error, Result};
use std::fmt;
use tracing::{debug, trace};
use xxhash_rust::xxh3::xxh3_128_with_seed;

/// A bidirectional map between strings and user string ids.
#[derive(Clone)]
pub struct StringDictionary {
    strings: Vec<String>,
    trie: Trie,
    capacity: usize,
    checksum: u128,
}

impl StringDictionary {
    /// Creates an empty dictionary that can address every user string id.
    #[inline]
    pub fn new() -> Self {
        Self::with_capacity(MAX_USER_STRING_COUNT)
    }

    /// Creates an empty dictionary holding at most `capacity` strings.
    ///
    /// The capacity is clamped to the number of ids the user string markers can address.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        StringDictionary {
            strings: Vec::new(),
            trie: Trie::new(),
            capacity: capacity.min(MAX_USER_STRING_COUNT),
            checksum: 0,
        }
    }

    /// Creates a dictionary seeded with `strings`, in order. Duplicates keep their first id.
    pub fn from_strings<I, S>(strings: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dict = Self::new();
        for s in strings {
            dict.add_string(s.as_ref())?;
        }
        debug!(len = dict.len(), checksum = ?dict.checksum, "seeded string dictionary");
        Ok(dict)
    }

    /// Interns `text`, returning its id.
    ///
    /// A string already present returns its existing id and leaves the dictionary unchanged.
    /// Returns `None` once the dictionary is full.
    #[inline]
    pub fn try_add_string(&mut self, text: &str) -> Option<usize> {
        self.try_add_string_with_capacity(text, self.capacity)
    }

    /// Like [`try_add_string`](Self::try_add_string) but with an explicit capacity.
    pub fn try_add_string_with_capacity(&mut self, text: &str, capacity: usize) -> Option<usize> {
        if let Some(id) = self.try_get_index(text) {
            return Some(id);
        }

        let capacity = capacity.min(MAX_USER_STRING_COUNT);
        if self.strings.len() >= capacity {
            debug!(capacity, text, "string dictionary is full");
            return None;
        }

        let id = self.strings.len();
        self.trie.get_or_insert(text.as_bytes(), id as u32);
        self.strings.push(text.to_owned());
        self.checksum = fold_checksum(self.checksum, text);
        trace!(id, text, "interned user string");
        Some(id)
    }

    /// Interns `text`, failing with `Error::CapacityExceeded` once the dictionary is full.
    #[inline]
    pub fn add_string(&mut self, text: &str) -> Result<usize> {
        self.try_add_string(text).ok_or(Error::CapacityExceeded {
            capacity: self.capacity,
        })
    }

    /// Returns the string with the given id.
    #[inline]
    pub fn try_get_string(&self, id: usize) -> Option<&str> {
        self.strings.get(id).map(String::as_str)
    }

    /// Returns the id of `text`.
    #[inline]
    pub fn try_get_index(&self, text: &str) -> Option<usize> {
        self.trie.get(text.as_bytes()).map(|id| id as usize)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Order-dependent 128-bit checksum over all strings.
    #[inline]
    pub fn checksum(&self) -> u128 {
        self.checksum
    }

    /// Iterates the strings in id order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.strings.iter().map(String::as_str)
    }
}

#[inline]
fn fold_checksum(acc: u128, text: &str) -> u128 {
    let seed = (acc as u64) ^ ((acc >> 64) as u64);
    xxh3_128_with_seed(text.as_bytes(), seed)
}

impl Default for StringDictionary {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for StringDictionary {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.checksum == other.checksum
    }
}

impl Eq for StringDictionary {}

impl fmt::Debug for StringDictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringDictionary")
            .field("len", &self.strings.len())
            .field("capacity", &self.capacity)
            .field("checksum", &format_args!("{:032x}", self.checksum))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dense_ids() {
        let mut dict = StringDictionary::new();
        assert_eq!(dict.try_add_string("id"), Some(0));
        assert_eq!(dict.try_add_string("name"), Some(1));
        assert_eq!(dict.try_add_string("names"), Some(2));
        assert_eq!(dict.try_get_string(2), Some("names"));
        assert_eq!(dict.try_get_index("name"), Some(1));
        assert_eq!(dict.try_get_index("nam"), None);
        assert_eq!(dict.try_get_string(3), None);
    }

    #[test]
    fn test_checksum_is_incremental_fold() {
        let mut dict = StringDictionary::new();
        dict.try_add_string("a").unwrap();
        dict.try_add_string("b").unwrap();

        let expected = fold_checksum(fold_checksum(0, "a"), "b");
        assert_eq!(dict.checksum(), expected);
    }

    #[test]
    fn test_capacity_is_clamped() {
        let dict = StringDictionary::with_capacity(usize::MAX);
        assert_eq!(dict.capacity(), MAX_USER_STRING_COUNT);
    }
}

//! Writer options.

/// Options controlling how a [`Writer`](crate::Writer) encodes values.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WriterOptions {
    /// Whether strings and field names are interned into the attached
    /// [`StringDictionary`](crate::StringDictionary) and written as user string markers.
    ///
    /// Only strings of 2 to 128 bytes are interned. Once the dictionary is full, strings are
    /// written in full.
    ///
    /// # Default
    ///
    /// `true`
    pub use_user_strings: bool,

    /// Whether canonical GUID string values are packed into 17 bytes. Field names are never packed.
    ///
    /// # Examples
    ///
    /// ```json
    /// "ab4e92d1-7c0f-4a3b-9e21-f0c9d8a71b56"
    /// ```
    ///
    /// # Default
    ///
    /// `true`
    pub encode_guid_strings: bool,

    /// Whether repeated strings are written as references to their first occurrence.
    ///
    /// Field names of 2 or more bytes and string values of 2 to 88 bytes are shared. A string is
    /// only shared when the reference would be shorter than writing it again.
    ///
    /// # Default
    ///
    /// `true`
    pub encode_reference_strings: bool,

    /// Bytes reserved up front for the output buffer.
    ///
    /// # Default
    ///
    /// `128`
    pub initial_capacity: usize,
}

impl Default for WriterOptions {
    #[inline]
    fn default() -> Self {
        WriterOptions {
            use_user_strings: true,
            encode_guid_strings: true,
            encode_reference_strings: true,
            initial_capacity: 128,
        }
    }
}

impl WriterOptions {
    #[inline]
    pub fn with_user_strings(mut self, enabled: bool) -> Self {
        self.use_user_strings = enabled;
        self
    }

    #[inline]
    pub fn with_guid_strings(mut self, enabled: bool) -> Self {
        self.encode_guid_strings = enabled;
        self
    }

    #[inline]
    pub fn with_reference_strings(mut self, enabled: bool) -> Self {
        self.encode_reference_strings = enabled;
        self
    }

    #[inline]
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }
}

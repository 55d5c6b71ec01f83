//! Binary format sizes and limits.

use std::mem::size_of;

pub const TYPE_MARKER_SIZE: usize = size_of::<u8>();
pub const GUID_SIZE: usize = 16;
pub const ENCODED_GUID_LENGTH: usize = TYPE_MARKER_SIZE + GUID_SIZE;

/// Textual length of a canonical GUID, `XXXXXXXX-XXXX-XXXX-XXXX-XXXXXXXXXXXX`.
pub const GUID_STRING_LENGTH: usize = 36;
pub const GUID_WITH_QUOTES_LENGTH: usize = GUID_STRING_LENGTH + 2;

/// Maximum depth of nested containers accepted by the resolver and the writer.
pub const MAX_NESTED_DEPTH: usize = 100;

pub const SYSTEM_STRING_COUNT: usize = 32;
pub const ONE_BYTE_USER_STRING_COUNT: usize = 32;
pub const TWO_BYTE_USER_STRING_MARKER_COUNT: usize = 8;
/// The second byte of a 2-byte user string only spans 0..0xFF.
pub const TWO_BYTE_USER_STRING_MULTIPLIER: usize = 0xFF;
pub const MAX_USER_STRING_COUNT: usize =
    ONE_BYTE_USER_STRING_COUNT + TWO_BYTE_USER_STRING_MARKER_COUNT * TWO_BYTE_USER_STRING_MULTIPLIER;

/// Strings outside this byte-length range are never interned as user strings.
pub const MIN_USER_STRING_LENGTH: usize = 2;
pub const MAX_USER_STRING_LENGTH: usize = 128;

/// Arrays with more items than this use an explicit count field.
pub const ARRAY_COUNT_THRESHOLD: usize = 16;
/// Two-byte-length arrays with a larger payload also carry an explicit count.
pub const ARRAY_LARGE_PAYLOAD: usize = 0x1000;

//! String markers and string value resolution.

use crate::binary::{
    ENCODED_GUID_LENGTH, GUID_SIZE, GUID_STRING_LENGTH, GUID_WITH_QUOTES_LENGTH, MAX_NESTED_DEPTH,
    ONE_BYTE_USER_STRING_COUNT, SYSTEM_STRING_COUNT, TWO_BYTE_USER_STRING_MULTIPLIER, TYPE_MARKER_SIZE,
};
use crate::dictionary::StringDictionary;
use crate::error::{ensure_len, Error, Result};
use crate::length::{get_value_length, read_length_field};
use crate::marker::{GuidCase, MarkerKind, TypeMarker};
use byteorder::{ByteOrder, LittleEndian};

/// Strings known to every reader, addressed by a 1-byte system string marker.
pub const SYSTEM_STRINGS: [&str; SYSTEM_STRING_COUNT] = [
    "$s",
    "$t",
    "$v",
    "_attachments",
    "_etag",
    "_rid",
    "_self",
    "_ts",
    "attachments/",
    "coordinates",
    "geometry",
    "GeometryCollection",
    "id",
    "inE",
    "inV",
    "label",
    "LineString",
    "link",
    "MultiLineString",
    "MultiPoint",
    "MultiPolygon",
    "name",
    "outE",
    "outV",
    "Point",
    "Polygon",
    "properties",
    "type",
    "value",
    "Feature",
    "FeatureCollection",
    "_id",
];

#[inline]
pub fn get_system_string(id: usize) -> Option<&'static str> {
    SYSTEM_STRINGS.get(id).copied()
}

#[inline]
pub fn get_system_string_id(text: &str) -> Option<usize> {
    SYSTEM_STRINGS.iter().position(|s| *s == text)
}

/// A one or two byte marker sequence standing for a whole string.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct MultiByteTypeMarker {
    len: u8,
    bytes: [u8; 2],
}

impl MultiByteTypeMarker {
    #[inline]
    pub const fn one(first: u8) -> Self {
        MultiByteTypeMarker {
            len: 1,
            bytes: [first, 0],
        }
    }

    #[inline]
    pub const fn two(first: u8, second: u8) -> Self {
        MultiByteTypeMarker {
            len: 2,
            bytes: [first, second],
        }
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }
}

/// Encodes a user string id as its marker bytes.
#[inline]
pub fn encode_user_string_id(id: usize) -> Option<MultiByteTypeMarker> {
    if id < ONE_BYTE_USER_STRING_COUNT {
        return Some(MultiByteTypeMarker::one(TypeMarker::USER_STRING_1_BYTE_MIN + id as u8));
    }

    let offset = id - ONE_BYTE_USER_STRING_COUNT;
    let first = offset / TWO_BYTE_USER_STRING_MULTIPLIER;
    if first >= (TypeMarker::USER_STRING_2_BYTE_MAX - TypeMarker::USER_STRING_2_BYTE_MIN) as usize {
        return None;
    }
    Some(MultiByteTypeMarker::two(
        TypeMarker::USER_STRING_2_BYTE_MIN + first as u8,
        (offset % TWO_BYTE_USER_STRING_MULTIPLIER) as u8,
    ))
}

/// Reads the user string id from a 1-byte or 2-byte user string token.
#[inline]
pub fn try_get_user_string_id(token: &[u8]) -> Option<usize> {
    let marker = TypeMarker(*token.first()?);
    if marker.is_one_byte_encoded_user_string() {
        Some((marker.0 - TypeMarker::USER_STRING_1_BYTE_MIN) as usize)
    } else if marker.is_two_byte_encoded_user_string() {
        let second = *token.get(1)? as usize;
        Some(
            ONE_BYTE_USER_STRING_COUNT
                + second
                + (marker.0 - TypeMarker::USER_STRING_2_BYTE_MIN) as usize * TWO_BYTE_USER_STRING_MULTIPLIER,
        )
    } else {
        None
    }
}

/// Looks up the marker for `text` among the system strings, then in `dict`.
///
/// This never adds `text` to the dictionary.
#[inline]
pub fn get_encoded_string_type_marker(text: &str, dict: Option<&StringDictionary>) -> Option<MultiByteTypeMarker> {
    if let Some(id) = get_system_string_id(text) {
        return Some(MultiByteTypeMarker::one(TypeMarker::SYSTEM_STRING_1_BYTE_MIN + id as u8));
    }
    dict.and_then(|d| d.try_get_index(text)).and_then(encode_user_string_id)
}

/// A decoded string.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum StringValue<'a> {
    /// Borrowed from the buffer or a dictionary.
    Str(&'a str),
    /// Rebuilt from a GUID string encoding.
    Guid(String),
    /// Bit-packed characters, returned undecoded. `payload` follows the marker.
    Compressed { marker: u8, payload: &'a [u8] },
}

impl<'a> StringValue<'a> {
    /// Returns the text, or `None` for compressed strings.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            StringValue::Str(s) => Some(s),
            StringValue::Guid(s) => Some(s),
            StringValue::Compressed { .. } => None,
        }
    }

    /// Converts into an owned `String`, failing with `Error::UnsupportedString` for
    /// compressed strings.
    #[inline]
    pub fn into_string(self) -> Result<String> {
        match self {
            StringValue::Str(s) => Ok(s.to_owned()),
            StringValue::Guid(s) => Ok(s),
            StringValue::Compressed { marker, .. } => Err(Error::UnsupportedString(marker)),
        }
    }
}

/// Decodes the string token `token`.
///
/// `root` is the whole document; reference strings are resolved against it. User strings are
/// resolved through `dict`.
#[inline]
pub fn get_string_value<'a>(
    root: &'a [u8],
    token: &'a [u8],
    dict: Option<&'a StringDictionary>,
) -> Result<StringValue<'a>> {
    resolve_string(root, token, dict, 0)
}

fn resolve_string<'a>(
    root: &'a [u8],
    token: &'a [u8],
    dict: Option<&'a StringDictionary>,
    depth: usize,
) -> Result<StringValue<'a>> {
    ensure_len(token, TYPE_MARKER_SIZE)?;
    let marker = token[0];
    let value = match MarkerKind::of(marker) {
        MarkerKind::SystemString(id) => StringValue::Str(SYSTEM_STRINGS[id as usize]),
        MarkerKind::UserString1(_) | MarkerKind::UserString2(_) => {
            let id = try_get_user_string_id(token).ok_or(Error::Truncated {
                needed: 2,
                available: token.len(),
            })?;
            let text = dict
                .and_then(|d| d.try_get_string(id))
                .ok_or(Error::UnknownUserString(id))?;
            StringValue::Str(text)
        }
        MarkerKind::GuidString(case) => {
            ensure_len(token, ENCODED_GUID_LENGTH)?;
            StringValue::Guid(decode_guid_string(case, &token[TYPE_MARKER_SIZE..ENCODED_GUID_LENGTH]))
        }
        MarkerKind::CompressedString(_) => {
            let length = get_value_length(token)?;
            StringValue::Compressed {
                marker,
                payload: &token[TYPE_MARKER_SIZE..length],
            }
        }
        MarkerKind::EncodedLengthString(len) => {
            let end = TYPE_MARKER_SIZE + len as usize;
            ensure_len(token, end)?;
            StringValue::Str(std::str::from_utf8(&token[TYPE_MARKER_SIZE..end])?)
        }
        MarkerKind::String(w) => {
            let start = TYPE_MARKER_SIZE + w.size();
            let length = read_length_field(token, TYPE_MARKER_SIZE, w)?;
            let end = start.saturating_add(length);
            ensure_len(token, end)?;
            StringValue::Str(std::str::from_utf8(&token[start..end])?)
        }
        MarkerKind::ReferenceString(width) => {
            if depth >= MAX_NESTED_DEPTH {
                return Err(Error::NestedTooDeeply {
                    limit: MAX_NESTED_DEPTH,
                });
            }
            let offset = read_offset(token, width as usize)?;
            if offset >= root.len() {
                return Err(Error::InvalidReference { offset });
            }
            return resolve_string(root, &root[offset..], dict, depth + 1);
        }
        _ => return Err(Error::InvalidToken { marker }),
    };
    Ok(value)
}

#[inline]
fn read_offset(token: &[u8], width: usize) -> Result<usize> {
    ensure_len(token, TYPE_MARKER_SIZE + width)?;
    let field = &token[TYPE_MARKER_SIZE..];
    let offset = match width {
        1 => field[0] as usize,
        2 => LittleEndian::read_u16(field) as usize,
        3 => LittleEndian::read_u24(field) as usize,
        _ => LittleEndian::read_u32(field) as usize,
    };
    Ok(offset)
}

/// Encodes a canonical GUID string, `XXXXXXXX-XXXX-XXXX-XXXX-XXXXXXXXXXXX`, optionally wrapped
/// in double quotes.
///
/// Hex digits must share one case; quoted GUIDs must be lowercase. Returns `None` for
/// anything else.
pub fn try_encode_guid_string(text: &str) -> Option<[u8; ENCODED_GUID_LENGTH]> {
    let bytes = text.as_bytes();
    let (guid, quoted) = match bytes.len() {
        GUID_STRING_LENGTH => (bytes, false),
        GUID_WITH_QUOTES_LENGTH if bytes[0] == b'"' && bytes[GUID_WITH_QUOTES_LENGTH - 1] == b'"' => {
            (&bytes[1..GUID_WITH_QUOTES_LENGTH - 1], true)
        }
        _ => return None,
    };

    let mut encoded = [0u8; ENCODED_GUID_LENGTH];
    let mut lowercase = false;
    let mut uppercase = false;
    let mut nibble = 0;
    for (index, c) in guid.iter().enumerate() {
        if matches!(index, 8 | 13 | 18 | 23) {
            if *c != b'-' {
                return None;
            }
            continue;
        }
        let value = match c {
            b'0'..=b'9' => c - b'0',
            b'a'..=b'f' => {
                lowercase = true;
                10 + c - b'a'
            }
            b'A'..=b'F' => {
                uppercase = true;
                10 + c - b'A'
            }
            _ => return None,
        };
        // low nibble first
        let slot = &mut encoded[TYPE_MARKER_SIZE + nibble / 2];
        if nibble % 2 == 0 {
            *slot = value;
        } else {
            *slot |= value << 4;
        }
        nibble += 1;
    }

    encoded[0] = match (lowercase, uppercase, quoted) {
        (_, true, true) | (true, true, false) => return None,
        (_, false, true) => TypeMarker::DOUBLE_QUOTED_LOWERCASE_GUID_STRING,
        (_, false, false) => TypeMarker::LOWERCASE_GUID_STRING,
        (false, true, false) => TypeMarker::UPPERCASE_GUID_STRING,
    };
    Some(encoded)
}

/// Rebuilds the text of a GUID string from its 16 encoded bytes.
pub fn decode_guid_string(case: GuidCase, payload: &[u8]) -> String {
    const LOWER: &[u8; 16] = b"0123456789abcdef";
    const UPPER: &[u8; 16] = b"0123456789ABCDEF";

    let digits = if case == GuidCase::Uppercase { UPPER } else { LOWER };
    let mut text = String::with_capacity(GUID_WITH_QUOTES_LENGTH);
    if case == GuidCase::DoubleQuotedLowercase {
        text.push('"');
    }
    for (i, b) in payload.iter().take(GUID_SIZE).enumerate() {
        if matches!(i, 4 | 6 | 8 | 10) {
            text.push('-');
        }
        text.push(digits[(b & 0x0F) as usize] as char);
        text.push(digits[(b >> 4) as usize] as char);
    }
    if case == GuidCase::DoubleQuotedLowercase {
        text.push('"');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    const GUID: &str = "ab4e92d1-7c0f-4a3b-9e21-f0c9d8a71b56";

    #[test]
    fn test_user_string_ids() {
        fn assert_id(id: usize, bytes: &[u8]) {
            let marker = encode_user_string_id(id).unwrap();
            assert_eq!(marker.as_bytes(), bytes);
            assert_eq!(try_get_user_string_id(bytes), Some(id));
        }

        assert_id(0, &[0x40]);
        assert_id(31, &[0x5F]);
        assert_id(32, &[0x60, 0x00]);
        assert_id(32 + 254, &[0x60, 0xFE]);
        assert_id(32 + 255, &[0x61, 0x00]);
        assert_id(2071, &[0x67, 0xFE]);
        assert_eq!(encode_user_string_id(2072), None);
        assert_eq!(try_get_user_string_id(&[0x60]), None);
        assert_eq!(try_get_user_string_id(&[0x20]), None);
    }

    #[test]
    fn test_system_strings() {
        assert_eq!(get_system_string_id("$s"), Some(0));
        assert_eq!(get_system_string_id("id"), Some(12));
        assert_eq!(get_system_string_id("_id"), Some(31));
        assert_eq!(get_system_string(27), Some("type"));
        assert_eq!(get_system_string(32), None);
        assert_eq!(
            get_encoded_string_type_marker("type", None).unwrap().as_bytes(),
            &[0x20 + 27]
        );
        assert_eq!(get_encoded_string_type_marker("nope", None), None);
    }

    #[test]
    fn test_guid_string() {
        let encoded = try_encode_guid_string(GUID).unwrap();
        assert_eq!(encoded[0], TypeMarker::LOWERCASE_GUID_STRING);
        // "ab" packs low nibble first
        assert_eq!(encoded[1], 0xBA);
        assert_eq!(decode_guid_string(GuidCase::Lowercase, &encoded[1..]), GUID);

        let upper = GUID.to_uppercase();
        let encoded = try_encode_guid_string(&upper).unwrap();
        assert_eq!(encoded[0], TypeMarker::UPPERCASE_GUID_STRING);
        assert_eq!(decode_guid_string(GuidCase::Uppercase, &encoded[1..]), upper);

        let quoted = format!("\"{}\"", GUID);
        let encoded = try_encode_guid_string(&quoted).unwrap();
        assert_eq!(encoded[0], TypeMarker::DOUBLE_QUOTED_LOWERCASE_GUID_STRING);
        assert_eq!(decode_guid_string(GuidCase::DoubleQuotedLowercase, &encoded[1..]), quoted);

        assert!(try_encode_guid_string("ab4e92d1-7c0f-4a3b-9e21-F0C9D8A71B56").is_none());
        assert!(try_encode_guid_string("ab4e92d1x7c0f-4a3b-9e21-f0c9d8a71b56").is_none());
        assert!(try_encode_guid_string("ab4e92d1-7c0f-4a3b-9e21-f0c9d8a71b5").is_none());
        assert!(try_encode_guid_string("ab4e92d1-7c0f-4a3b-9e21-f0c9d8a71b5g").is_none());
    }

    #[test]
    fn test_reference_string() {
        // [StrL1 "abc", StrR1 -> 0]
        let root = [0xC0, 3, b'a', b'b', b'c', 0xC3, 0x00];
        let value = get_string_value(&root, &root[5..], None).unwrap();
        assert_eq!(value, StringValue::Str("abc"));

        let bad = [0xC3, 0x09];
        assert!(matches!(
            get_string_value(&bad, &bad, None),
            Err(Error::InvalidReference { offset: 9 })
        ));

        // a reference to itself never terminates on its own
        let cycle = [0xC3, 0x00];
        assert!(matches!(
            get_string_value(&cycle, &cycle, None),
            Err(Error::NestedTooDeeply { .. })
        ));
    }
}

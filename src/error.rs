//! Error type.

use std::collections::TryReserveError;
use std::fmt;
use std::str::Utf8Error;

/// Possible errors that can arise during encoding or decoding.
#[derive(Debug)]
pub enum Error {
    /// A type marker appeared where the structure does not allow it.
    InvalidToken { marker: u8 },
    /// A writer call arrived in the wrong state, e.g. a value without a field name.
    UnexpectedToken,
    /// A declared length requires more bytes than the buffer holds.
    Truncated { needed: usize, available: usize },
    InvalidNumber(u8),
    NumberOutOfRange,
    CapacityExceeded { capacity: usize },
    InvalidUtf8(Utf8Error),
    NestedTooDeeply { limit: usize },
    InvalidReference { offset: usize },
    UnknownUserString(usize),
    UnsupportedString(u8),
    TrailingBytes { expected: usize, actual: usize },
    /// A string, binary or container payload does not fit a 4-byte length.
    ValueTooLarge(usize),
    TryReserveError(TryReserveError),
    JsonError(serde_json::Error),
}

impl fmt::Display for Error {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidToken { marker } => write!(f, "invalid type marker '{:#04x}'", marker),
            Error::UnexpectedToken => write!(f, "unexpected token for the current writer state"),
            Error::Truncated { needed, available } => write!(
                f,
                "truncated data: needed {} bytes but only {} available",
                needed, available
            ),
            Error::InvalidNumber(marker) => write!(f, "type marker '{:#04x}' is not a number", marker),
            Error::NumberOutOfRange => write!(f, "number is out of range"),
            Error::CapacityExceeded { capacity } => {
                write!(f, "string dictionary capacity {} exceeded", capacity)
            }
            Error::InvalidUtf8(e) => write!(f, "{}", e),
            Error::NestedTooDeeply { limit } => write!(f, "nesting exceeds the limit of {} levels", limit),
            Error::InvalidReference { offset } => write!(f, "reference string offset {} is out of bounds", offset),
            Error::UnknownUserString(id) => write!(f, "user string id {} is not in the dictionary", id),
            Error::UnsupportedString(marker) => {
                write!(f, "compressed string '{:#04x}' cannot be decoded here", marker)
            }
            Error::TrailingBytes { expected, actual } => write!(
                f,
                "value occupies {} bytes but the buffer holds {}",
                expected, actual
            ),
            Error::ValueTooLarge(len) => write!(f, "value of {} bytes is too large to encode", len),
            Error::TryReserveError(e) => write!(f, "{}", e),
            Error::JsonError(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for Error {
    #[inline]
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::InvalidUtf8(e) => Some(e),
            Error::TryReserveError(e) => Some(e),
            Error::JsonError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TryReserveError> for Error {
    #[inline]
    fn from(e: TryReserveError) -> Self {
        Error::TryReserveError(e)
    }
}

impl From<Utf8Error> for Error {
    #[inline]
    fn from(e: Utf8Error) -> Self {
        Error::InvalidUtf8(e)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Returns `Error::Truncated` unless `bytes` holds at least `needed` bytes.
#[inline]
pub(crate) fn ensure_len(bytes: &[u8], needed: usize) -> Result<()> {
    if bytes.len() < needed {
        return Err(Error::Truncated {
            needed,
            available: bytes.len(),
        });
    }
    Ok(())
}

//! Impl the `serde::Serialize` and `serde::Deserialize` traits.

use crate::{BinaryJsonBuf, StringDictionary};
use std::fmt::Formatter;

#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
impl serde::Serialize for BinaryJsonBuf {
    #[inline]
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        if serializer.is_human_readable() {
            let json = self.to_json(None).map_err(serde::ser::Error::custom)?;
            serializer.serialize_str(&json.to_string())
        } else {
            serializer.serialize_bytes(self.as_bytes())
        }
    }
}

#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
impl<'de> serde::Deserialize<'de> for BinaryJsonBuf {
    #[inline]
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::de::Deserializer<'de>,
    {
        struct BinaryJsonBufVisitor;

        impl<'de> serde::de::Visitor<'de> for BinaryJsonBufVisitor {
            type Value = BinaryJsonBuf;

            #[inline]
            fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
                write!(formatter, "a binary json value")
            }

            #[inline]
            fn visit_str<E>(self, v: &str) -> Result<BinaryJsonBuf, E>
            where
                E: serde::de::Error,
            {
                BinaryJsonBuf::parse(v).map_err(serde::de::Error::custom)
            }

            #[inline]
            fn visit_bytes<E>(self, v: &[u8]) -> Result<BinaryJsonBuf, E>
            where
                E: serde::de::Error,
            {
                let mut buf = Vec::new();
                buf.try_reserve(v.len()).map_err(serde::de::Error::custom)?;
                buf.extend_from_slice(v);
                BinaryJsonBuf::new(buf).map_err(serde::de::Error::custom)
            }

            #[inline]
            fn visit_byte_buf<E>(self, v: Vec<u8>) -> Result<BinaryJsonBuf, E>
            where
                E: serde::de::Error,
            {
                BinaryJsonBuf::new(v).map_err(serde::de::Error::custom)
            }
        }

        if deserializer.is_human_readable() {
            deserializer.deserialize_str(BinaryJsonBufVisitor)
        } else {
            deserializer.deserialize_bytes(BinaryJsonBufVisitor)
        }
    }
}

#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
impl serde::Serialize for StringDictionary {
    #[inline]
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

/// A dictionary is rebuilt by adding its strings in order, so the checksum follows.
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
impl<'de> serde::Deserialize<'de> for StringDictionary {
    #[inline]
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::de::Deserializer<'de>,
    {
        let strings = <Vec<String> as serde::Deserialize>::deserialize(deserializer)?;
        StringDictionary::from_strings(strings).map_err(serde::de::Error::custom)
    }
}

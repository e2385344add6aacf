//! Serde support
//!
//! Human-readable formats carry the 26-character text form; binary formats
//! carry the 16 raw bytes.

use std::fmt;

use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Ulid, ULID_LEN};

impl Serialize for Ulid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            let text = self.encode();
            let text = std::str::from_utf8(&text)
                .map_err(<S::Error as serde::ser::Error>::custom)?;
            serializer.serialize_str(text)
        } else {
            serializer.serialize_bytes(self.as_bytes())
        }
    }
}

struct UlidVisitor;

impl<'de> Visitor<'de> for UlidVisitor {
    type Value = Ulid;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a 26-character ULID string or 16 bytes")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Ulid, E> {
        Ulid::parse(v).map_err(E::custom)
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<Ulid, E> {
        Ulid::try_from_slice(v).map_err(E::custom)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Ulid, A::Error> {
        let mut bytes = [0u8; ULID_LEN];
        for (i, slot) in bytes.iter_mut().enumerate() {
            *slot = seq
                .next_element()?
                .ok_or_else(|| <A::Error as de::Error>::invalid_length(i, &self))?;
        }
        if seq.next_element::<u8>()?.is_some() {
            return Err(de::Error::invalid_length(ULID_LEN + 1, &self));
        }
        Ok(Ulid::from_bytes(bytes))
    }
}

impl<'de> Deserialize<'de> for Ulid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            deserializer.deserialize_str(UlidVisitor)
        } else {
            deserializer.deserialize_bytes(UlidVisitor)
        }
    }
}

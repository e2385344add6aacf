//! The ULID value type
//!
//! 16 bytes, most significant first:
//! - Bytes 0-5: Unix timestamp in milliseconds (BE)
//! - Bytes 6-15: randomness
//!
//! Ordering, equality and hashing all work on the raw bytes, so sorting by
//! value, by binary form and by canonical text all agree.

use std::fmt;
use std::str::FromStr;
use std::time::SystemTime;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use rand::RngCore;

use crate::base32::{self, BINARY_LEN, ENCODED_LEN};
use crate::random::{fill_randomness, with_thread_rng, RANDOMNESS_LEN};
use crate::{from_unix_millis, unix_millis, LexidError, LexidResult, TIMESTAMP_MAX_MS};

/// Binary size of a ULID
pub const ULID_LEN: usize = BINARY_LEN;

/// Length of the canonical text form
pub const ULID_TEXT_LEN: usize = ENCODED_LEN;

/// Size of the timestamp field in bytes
pub const TIMESTAMP_LEN: usize = 6;

/// Universally Unique Lexicographically Sortable Identifier
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Ulid([u8; ULID_LEN]);

impl Ulid {
    /// All-zero value, same as `Default`
    pub const EMPTY: Ulid = Ulid([0; ULID_LEN]);
    /// Epoch timestamp, zero randomness
    pub const MIN: Ulid = Ulid([0; ULID_LEN]);
    /// Largest timestamp, randomness all ones
    pub const MAX: Ulid = Ulid([0xFF; ULID_LEN]);

    /// New identifier for the current time, using this thread's random source
    ///
    /// # Panics
    ///
    /// Panics on the first call in a thread if the OS entropy source is unavailable.
    pub fn new() -> Self {
        Ulid::new_at(SystemTime::now())
    }

    /// New identifier for `time` with fresh randomness
    pub fn new_at(time: SystemTime) -> Self {
        let ms = unix_millis(time);
        with_thread_rng(|rng| Ulid::generate_with(ms, rng))
    }

    /// New identifier for `time` with caller-supplied randomness
    ///
    /// `randomness` must be exactly 10 bytes.
    pub fn with_randomness(time: SystemTime, randomness: &[u8]) -> LexidResult<Self> {
        let randomness: [u8; RANDOMNESS_LEN] =
            randomness.try_into().map_err(|_| LexidError::InvalidByteLength {
                expected: RANDOMNESS_LEN,
                actual: randomness.len(),
            })?;
        Ok(Ulid::from_parts(unix_millis(time), randomness))
    }

    /// New identifier from a millisecond timestamp and an explicit random source
    #[inline]
    pub fn generate_with<R: RngCore + ?Sized>(timestamp_ms: u64, rng: &mut R) -> Self {
        Ulid::from_parts(timestamp_ms, fill_randomness(rng))
    }

    /// Assemble from parts; only the low 48 bits of `timestamp_ms` are kept
    pub fn from_parts(timestamp_ms: u64, randomness: [u8; RANDOMNESS_LEN]) -> Self {
        let ts = (timestamp_ms & TIMESTAMP_MAX_MS).to_be_bytes();
        let mut bytes = [0u8; ULID_LEN];
        bytes[..TIMESTAMP_LEN].copy_from_slice(&ts[8 - TIMESTAMP_LEN..]);
        bytes[TIMESTAMP_LEN..].copy_from_slice(&randomness);
        Ulid(bytes)
    }

    #[inline]
    pub const fn from_bytes(bytes: [u8; ULID_LEN]) -> Self {
        Ulid(bytes)
    }

    /// View a 16-byte slice as a ULID
    pub fn try_from_slice(bytes: &[u8]) -> LexidResult<Self> {
        let bytes: [u8; ULID_LEN] = bytes
            .try_into()
            .map_err(|_| LexidError::InvalidByteLength {
                expected: ULID_LEN,
                actual: bytes.len(),
            })?;
        Ok(Ulid(bytes))
    }

    /// Parse the 26-character text form (case-insensitive)
    pub fn parse(text: &str) -> LexidResult<Self> {
        Ulid::from_utf8(text.as_bytes())
    }

    /// Parse the text form from UTF-8 bytes
    pub fn from_utf8(text: &[u8]) -> LexidResult<Self> {
        let text: &[u8; ULID_TEXT_LEN] =
            text.try_into().map_err(|_| LexidError::InvalidLength {
                expected: ULID_TEXT_LEN,
                actual: text.len(),
            })?;
        base32::decode(text).map(Ulid)
    }

    /// Parse, mapping any malformed input to `None`
    #[inline]
    pub fn try_parse(text: &str) -> Option<Self> {
        Ulid::parse(text).ok()
    }

    /// Decode the standard Base64 form of the 16 bytes
    pub fn from_base64(text: &str) -> LexidResult<Self> {
        let bytes = BASE64
            .decode(text)
            .map_err(|e| LexidError::InvalidBase64(e.to_string()))?;
        if bytes.len() != ULID_LEN {
            return Err(LexidError::InvalidBase64(format!(
                "decoded {} bytes, expected {}",
                bytes.len(),
                ULID_LEN
            )));
        }
        Ulid::try_from_slice(&bytes)
    }

    /// Milliseconds since the Unix epoch
    #[inline]
    pub fn timestamp_ms(&self) -> u64 {
        let mut buf = [0u8; 8];
        buf[8 - TIMESTAMP_LEN..].copy_from_slice(&self.0[..TIMESTAMP_LEN]);
        u64::from_be_bytes(buf)
    }

    /// Timestamp as a point in time
    #[inline]
    pub fn datetime(&self) -> SystemTime {
        from_unix_millis(self.timestamp_ms())
    }

    #[inline]
    pub fn randomness(&self) -> [u8; RANDOMNESS_LEN] {
        let mut out = [0u8; RANDOMNESS_LEN];
        out.copy_from_slice(&self.0[TIMESTAMP_LEN..]);
        out
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        *self == Ulid::EMPTY
    }

    #[inline]
    pub const fn to_bytes(self) -> [u8; ULID_LEN] {
        self.0
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; ULID_LEN] {
        &self.0
    }

    /// Write the binary form into the start of `buf`
    pub fn write_bytes(&self, buf: &mut [u8]) -> LexidResult<()> {
        if buf.len() < ULID_LEN {
            return Err(LexidError::BufferTooShort {
                expected: ULID_LEN,
                actual: buf.len(),
            });
        }
        buf[..ULID_LEN].copy_from_slice(&self.0);
        Ok(())
    }

    /// Canonical text form as ASCII bytes
    #[inline]
    pub fn encode(&self) -> [u8; ULID_TEXT_LEN] {
        base32::encode(&self.0)
    }

    /// Write the canonical text form into the start of `buf`
    pub fn write_text(&self, buf: &mut [u8]) -> LexidResult<()> {
        if buf.len() < ULID_TEXT_LEN {
            return Err(LexidError::BufferTooShort {
                expected: ULID_TEXT_LEN,
                actual: buf.len(),
            });
        }
        buf[..ULID_TEXT_LEN].copy_from_slice(&self.encode());
        Ok(())
    }

    /// Standard Base64 of the 16 bytes
    pub fn to_base64(&self) -> String {
        BASE64.encode(self.0)
    }

    #[inline]
    pub const fn to_u128(self) -> u128 {
        u128::from_be_bytes(self.0)
    }

    #[inline]
    pub const fn from_u128(value: u128) -> Self {
        Ulid(value.to_be_bytes())
    }
}

impl fmt::Debug for Ulid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ulid({})", self)
    }
}

impl fmt::Display for Ulid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.encode();
        let text = std::str::from_utf8(&text).map_err(|_| fmt::Error)?;
        f.pad(text)
    }
}

impl FromStr for Ulid {
    type Err = LexidError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ulid::parse(s)
    }
}

impl TryFrom<&[u8]> for Ulid {
    type Error = LexidError;

    #[inline]
    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Ulid::try_from_slice(bytes)
    }
}

impl From<[u8; ULID_LEN]> for Ulid {
    #[inline]
    fn from(bytes: [u8; ULID_LEN]) -> Self {
        Ulid(bytes)
    }
}

impl From<Ulid> for [u8; ULID_LEN] {
    #[inline]
    fn from(id: Ulid) -> Self {
        id.0
    }
}

impl From<u128> for Ulid {
    #[inline]
    fn from(value: u128) -> Self {
        Ulid::from_u128(value)
    }
}

impl From<Ulid> for u128 {
    #[inline]
    fn from(id: Ulid) -> Self {
        id.to_u128()
    }
}

impl AsRef<[u8]> for Ulid {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};
    use std::time::{Duration, UNIX_EPOCH};

    use crate::XorShift64;

    use super::*;

    const VECTOR_RANDOMNESS: [u8; 10] = [0x4C, 0xC5, 0x54, 0xB0, 0x98, 0x1E, 0xD0, 0x9B, 0x0E, 0x0B];

    fn hash_of(id: &Ulid) -> u64 {
        let mut hasher = DefaultHasher::new();
        id.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_published_vector_decodes() {
        let id = Ulid::parse("01ARZ3NDEKTSV4RRFFQ69G5FAV").unwrap();
        assert_eq!(id.timestamp_ms(), 1_469_922_850_259);
        assert_eq!(
            id.randomness(),
            [0xd6, 0x76, 0x4c, 0x61, 0xef, 0xb9, 0x93, 0x02, 0xbd, 0x5b]
        );
        assert_eq!(id.to_string(), "01ARZ3NDEKTSV4RRFFQ69G5FAV");
    }

    #[test]
    fn test_timestamp_prefix_vector() {
        // Timestamp part of the "01ARYZ6S41..." example
        let id = Ulid::from_parts(1_469_918_176_385, VECTOR_RANDOMNESS);
        assert_eq!(id.to_string(), "01ARYZ6S419K2N9C4R3V89P3GB");
        assert_eq!(&id.to_string()[..10], "01ARYZ6S41");
        assert_eq!(id.randomness(), VECTOR_RANDOMNESS);
    }

    #[test]
    fn test_with_randomness() {
        let time = UNIX_EPOCH + Duration::from_millis(1_469_918_176_385);
        let id = Ulid::with_randomness(time, &VECTOR_RANDOMNESS).unwrap();
        assert_eq!(id, Ulid::from_parts(1_469_918_176_385, VECTOR_RANDOMNESS));
        assert_eq!(id.datetime(), time);
    }

    #[test]
    fn test_with_randomness_wrong_length() {
        let result = Ulid::with_randomness(SystemTime::now(), &[0u8; 9]);
        assert_eq!(
            result,
            Err(LexidError::InvalidByteLength { expected: 10, actual: 9 })
        );
        assert!(Ulid::with_randomness(SystemTime::now(), &[0u8; 11]).is_err());
    }

    #[test]
    fn test_endpoint_values() {
        assert_eq!(Ulid::MIN.to_string(), "00000000000000000000000000");
        assert_eq!(Ulid::MAX.to_string(), "7ZZZZZZZZZZZZZZZZZZZZZZZZZ");
        assert_eq!(Ulid::MIN.timestamp_ms(), 0);
        assert_eq!(Ulid::MAX.timestamp_ms(), TIMESTAMP_MAX_MS);
        assert_eq!(Ulid::MAX.randomness(), [0xFF; 10]);
        assert_eq!(Ulid::default(), Ulid::EMPTY);
        assert!(Ulid::EMPTY.is_empty());
        assert!(!Ulid::MAX.is_empty());
        assert_eq!(Ulid::parse("00000000000000000000000000").unwrap(), Ulid::MIN);
        assert_eq!(Ulid::parse("7zzzzzzzzzzzzzzzzzzzzzzzzz").unwrap(), Ulid::MAX);
    }

    #[test]
    fn test_timestamp_is_truncated_to_48_bits() {
        let id = Ulid::from_parts(TIMESTAMP_MAX_MS + 2, [0; 10]);
        assert_eq!(id.timestamp_ms(), 1);
    }

    #[test]
    fn test_pre_epoch_time_clamps() {
        let id = Ulid::new_at(UNIX_EPOCH - Duration::from_secs(1));
        assert_eq!(id.timestamp_ms(), 0);
    }

    #[test]
    fn test_new_uses_current_time() {
        let before = unix_millis(SystemTime::now());
        let id = Ulid::new();
        let after = unix_millis(SystemTime::now());
        assert!(id.timestamp_ms() >= before && id.timestamp_ms() <= after);
    }

    #[test]
    fn test_same_timestamp_distinct_randomness() {
        let time = UNIX_EPOCH + Duration::from_millis(1_700_000_000_000);
        let a = Ulid::new_at(time);
        let b = Ulid::new_at(time);
        assert_eq!(a.timestamp_ms(), b.timestamp_ms());
        assert_ne!(a.randomness(), b.randomness());

        let earlier = Ulid::new_at(time - Duration::from_millis(1));
        assert!(earlier < a && earlier < b);
    }

    #[test]
    fn test_generate_with_is_deterministic() {
        let mut a = XorShift64::new(99);
        let mut b = XorShift64::new(99);
        assert_eq!(Ulid::generate_with(5, &mut a), Ulid::generate_with(5, &mut b));
    }

    #[test]
    fn test_parse_length_errors() {
        assert_eq!(
            Ulid::parse(""),
            Err(LexidError::InvalidLength { expected: 26, actual: 0 })
        );
        assert!(Ulid::parse("01ARZ3NDEKTSV4RRFFQ69G5FA").is_err());
        assert!(Ulid::parse("01ARZ3NDEKTSV4RRFFQ69G5FAVV").is_err());
    }

    #[test]
    fn test_try_parse_never_panics() {
        let inputs = [
            "",
            "U",
            "01ARZ3NDEKTSV4RRFFQ69G5FAU",
            "01ARZ3NDEKTSV4RRFFQ69G5FAI",
            "01ARZ3NDEKTSV4RRFFQ69G5FAL",
            "01ARZ3NDEKTSV4RRFFQ69G5FAO",
            "ÄÖÜ01ARZ3NDEKTSV4RRFFQ69G",
            "日本語日本語日本語日",
            "80000000000000000000000000",
        ];
        for input in inputs {
            assert_eq!(Ulid::try_parse(input), None, "{input:?}");
        }
        assert!(Ulid::try_parse("01ARZ3NDEKTSV4RRFFQ69G5FAV").is_some());
    }

    #[test]
    fn test_from_str_and_lowercase() {
        let a: Ulid = "01ARZ3NDEKTSV4RRFFQ69G5FAV".parse().unwrap();
        let b: Ulid = "01arz3ndektsv4rrffq69g5fav".parse().unwrap();
        assert_eq!(a, b);
        // Output is always uppercase
        assert_eq!(b.to_string(), "01ARZ3NDEKTSV4RRFFQ69G5FAV");
    }

    #[test]
    fn test_slice_conversions() {
        let bytes: [u8; 16] = core::array::from_fn(|i| (i * 17) as u8);
        let id = Ulid::try_from_slice(&bytes).unwrap();
        assert_eq!(id.to_bytes(), bytes);
        assert_eq!(Ulid::try_from(&bytes[..]).unwrap(), id);
        assert_eq!(
            Ulid::try_from_slice(&bytes[..15]),
            Err(LexidError::InvalidByteLength { expected: 16, actual: 15 })
        );
    }

    #[test]
    fn test_write_bytes() {
        let id = Ulid::from_u128(0x0102_0304_0506_0708_090a_0b0c_0d0e_0f10);
        let mut buf = [0u8; 20];
        id.write_bytes(&mut buf).unwrap();
        assert_eq!(&buf[..16], id.as_bytes());
        assert_eq!(&buf[16..], &[0; 4]);

        let mut short = [0u8; 15];
        assert!(matches!(
            id.write_bytes(&mut short),
            Err(LexidError::BufferTooShort { expected: 16, actual: 15 })
        ));
    }

    #[test]
    fn test_write_text() {
        let id = Ulid::parse("01ARZ3NDEKTSV4RRFFQ69G5FAV").unwrap();
        let mut buf = [0u8; 26];
        id.write_text(&mut buf).unwrap();
        assert_eq!(&buf, b"01ARZ3NDEKTSV4RRFFQ69G5FAV");

        let mut short = [0u8; 25];
        assert!(id.write_text(&mut short).is_err());
    }

    #[test]
    fn test_base64() {
        let id = Ulid::parse("01ARZ3NDEKTSV4RRFFQ69G5FAV").unwrap();
        assert_eq!(id.to_base64(), "AVY+OrXT1nZMYe+5kwK9Ww==");
        assert_eq!(Ulid::from_base64("AVY+OrXT1nZMYe+5kwK9Ww==").unwrap(), id);
        assert!(matches!(
            Ulid::from_base64("AAEC"),
            Err(LexidError::InvalidBase64(_))
        ));
        assert!(Ulid::from_base64("not base64!").is_err());
    }

    #[test]
    fn test_u128_conversion() {
        let id = Ulid::parse("01ARZ3NDEKTSV4RRFFQ69G5FAV").unwrap();
        let value: u128 = id.into();
        assert_eq!(value, 0x0156_3e3a_b5d3_d676_4c61_efb9_9302_bd5b);
        assert_eq!(Ulid::from(value), id);
    }

    #[test]
    fn test_ordering_time_then_randomness() {
        let a = Ulid::from_parts(1, [0xFF; 10]);
        let b = Ulid::from_parts(2, [0x00; 10]);
        let c = Ulid::from_parts(2, [0x01; 10]);

        assert_eq!(a.cmp(&b), Ordering::Less);
        assert_eq!(b.cmp(&c), Ordering::Less);
        assert_eq!(c.cmp(&c), Ordering::Equal);
        assert!(a.to_string() < b.to_string());
        assert!(b.to_string() < c.to_string());
    }

    #[test]
    fn test_equal_values_hash_equal() {
        let a = Ulid::parse("01ARZ3NDEKTSV4RRFFQ69G5FAV").unwrap();
        let b = Ulid::parse("01arz3ndektsv4rrffq69g5fav").unwrap();
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_ne!(hash_of(&a), hash_of(&Ulid::MAX));
    }

    #[test]
    fn test_debug_and_padding() {
        let id = Ulid::MIN;
        assert_eq!(format!("{:?}", id), "Ulid(00000000000000000000000000)");
        assert_eq!(format!("{:>28}", id), "  00000000000000000000000000");
    }
}

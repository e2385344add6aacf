//! Binary wire codec
//!
//! On the wire a ULID is its 16 raw bytes, timestamp first. This is also the
//! layout for fixed-length binary columns.

use bytes::{Buf, BufMut};

use crate::{LexidError, LexidResult, Ulid, ULID_LEN};

/// Encoded size on the wire
pub const ULID_WIRE_SIZE: usize = ULID_LEN;

impl Ulid {
    /// Append the 16-byte form to `buf`
    #[inline]
    pub fn encode_to<B: BufMut>(&self, buf: &mut B) {
        buf.put_slice(self.as_bytes());
    }

    /// Read a 16-byte form from `buf`
    ///
    /// Leaves `buf` untouched when fewer than 16 bytes remain.
    pub fn decode_from<B: Buf>(buf: &mut B) -> LexidResult<Self> {
        if buf.remaining() < ULID_WIRE_SIZE {
            return Err(LexidError::BufferTooShort {
                expected: ULID_WIRE_SIZE,
                actual: buf.remaining(),
            });
        }
        let mut bytes = [0u8; ULID_WIRE_SIZE];
        buf.copy_to_slice(&mut bytes);
        Ok(Ulid::from_bytes(bytes))
    }
}

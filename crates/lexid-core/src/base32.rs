//! Crockford Base32 codec for the 26-character ULID text form
//!
//! The 128-bit value is split into a 10-symbol timestamp part (48 bits, two
//! leading pad bits) and a 16-symbol randomness part (80 bits). Both are
//! produced with fixed shift/mask formulas over adjacent bytes, so the output
//! is bit-identical to every conforming ULID implementation.

use crate::{LexidError, LexidResult};

/// Encoding alphabet (no I, L, O, U)
pub const ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

/// Length of the canonical text form
pub const ENCODED_LEN: usize = 26;

/// Length of the binary form
pub const BINARY_LEN: usize = 16;

/// Marker for bytes outside the alphabet
const INVALID: u8 = 0xFF;

/// Reverse lookup: ASCII byte -> 5-bit value, case-insensitive
static DECODE: [u8; 256] = build_decode_table();

const fn build_decode_table() -> [u8; 256] {
    let mut table = [INVALID; 256];
    let mut i = 0;
    while i < ALPHABET.len() {
        let c = ALPHABET[i];
        table[c as usize] = i as u8;
        table[c.to_ascii_lowercase() as usize] = i as u8;
        i += 1;
    }
    table
}

/// Encode 16 bytes into 26 uppercase ASCII symbols
pub fn encode(id: &[u8; BINARY_LEN]) -> [u8; ENCODED_LEN] {
    let e = |v: u8| ALPHABET[(v & 0x1F) as usize];
    [
        // Timestamp: 6 bytes -> 10 symbols
        e((id[0] & 0xE0) >> 5),
        e(id[0]),
        e((id[1] & 0xF8) >> 3),
        e(((id[1] & 0x07) << 2) | ((id[2] & 0xC0) >> 6)),
        e((id[2] & 0x3E) >> 1),
        e(((id[2] & 0x01) << 4) | ((id[3] & 0xF0) >> 4)),
        e(((id[3] & 0x0F) << 1) | ((id[4] & 0x80) >> 7)),
        e((id[4] & 0x7C) >> 2),
        e(((id[4] & 0x03) << 3) | ((id[5] & 0xE0) >> 5)),
        e(id[5]),
        // Randomness: 10 bytes -> 16 symbols
        e((id[6] & 0xF8) >> 3),
        e(((id[6] & 0x07) << 2) | ((id[7] & 0xC0) >> 6)),
        e((id[7] & 0x3E) >> 1),
        e(((id[7] & 0x01) << 4) | ((id[8] & 0xF0) >> 4)),
        e(((id[8] & 0x0F) << 1) | ((id[9] & 0x80) >> 7)),
        e((id[9] & 0x7C) >> 2),
        e(((id[9] & 0x03) << 3) | ((id[10] & 0xE0) >> 5)),
        e(id[10]),
        e((id[11] & 0xF8) >> 3),
        e(((id[11] & 0x07) << 2) | ((id[12] & 0xC0) >> 6)),
        e((id[12] & 0x3E) >> 1),
        e(((id[12] & 0x01) << 4) | ((id[13] & 0xF0) >> 4)),
        e(((id[13] & 0x0F) << 1) | ((id[14] & 0x80) >> 7)),
        e((id[14] & 0x7C) >> 2),
        e(((id[14] & 0x03) << 3) | ((id[15] & 0xE0) >> 5)),
        e(id[15]),
    ]
}

/// Decode 26 ASCII symbols into 16 bytes
///
/// Rejects bytes outside the alphabet (case-insensitive) and a leading symbol
/// above `7`, which would need more than 128 bits.
pub fn decode(text: &[u8; ENCODED_LEN]) -> LexidResult<[u8; BINARY_LEN]> {
    let mut v = [0u8; ENCODED_LEN];
    for (position, (&byte, slot)) in text.iter().zip(v.iter_mut()).enumerate() {
        let value = DECODE[byte as usize];
        if value == INVALID {
            return Err(LexidError::InvalidChar { byte, position });
        }
        *slot = value;
    }

    if v[0] > 7 {
        return Err(LexidError::Overflow);
    }

    Ok([
        (v[0] << 5) | v[1],
        (v[2] << 3) | (v[3] >> 2),
        (v[3] << 6) | (v[4] << 1) | (v[5] >> 4),
        (v[5] << 4) | (v[6] >> 1),
        (v[6] << 7) | (v[7] << 2) | (v[8] >> 3),
        (v[8] << 5) | v[9],
        (v[10] << 3) | (v[11] >> 2),
        (v[11] << 6) | (v[12] << 1) | (v[13] >> 4),
        (v[13] << 4) | (v[14] >> 1),
        (v[14] << 7) | (v[15] << 2) | (v[16] >> 3),
        (v[16] << 5) | v[17],
        (v[18] << 3) | (v[19] >> 2),
        (v[19] << 6) | (v[20] << 1) | (v[21] >> 4),
        (v[21] << 4) | (v[22] >> 1),
        (v[22] << 7) | (v[23] << 2) | (v[24] >> 3),
        (v[24] << 5) | v[25],
    ])
}

/// Check a single byte against the alphabet
#[inline]
pub fn is_valid_symbol(byte: u8) -> bool {
    DECODE[byte as usize] != INVALID
}

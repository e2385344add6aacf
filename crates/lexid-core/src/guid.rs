//! GUID and UUID interop
//!
//! A GUID in its 16-byte serialized form (as produced by `Guid.ToByteArray`
//! and COM) stores its first three fields little-endian:
//!
//! ```text
//! ulid bytes:  A B C D | E F | G H | I J K L M N O P
//! guid bytes:  D C B A | F E | H G | I J K L M N O P
//! ```
//!
//! The swap is done byte by byte, so the result does not depend on the host's
//! endianness. A `uuid::Uuid` keeps bytes in display order, so it converts
//! without any swap and shows the same hex digits as the GUID.

use uuid::Uuid;

use crate::{Ulid, ULID_LEN};

/// Reorder between ULID byte order and GUID mixed-endian byte order
///
/// The permutation is its own inverse.
#[inline]
fn swap_guid_fields(bytes: [u8; ULID_LEN]) -> [u8; ULID_LEN] {
    let mut out = bytes;
    out[..4].reverse();
    out[4..6].reverse();
    out[6..8].reverse();
    out
}

impl Ulid {
    /// Convert from the serialized mixed-endian GUID layout
    #[inline]
    pub fn from_guid_bytes(guid: [u8; ULID_LEN]) -> Self {
        Ulid::from_bytes(swap_guid_fields(guid))
    }

    /// Convert to the serialized mixed-endian GUID layout
    #[inline]
    pub fn to_guid_bytes(&self) -> [u8; ULID_LEN] {
        swap_guid_fields(self.to_bytes())
    }

    #[inline]
    pub fn to_uuid(&self) -> Uuid {
        Uuid::from_bytes(self.to_bytes())
    }

    #[inline]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Ulid::from_bytes(uuid.into_bytes())
    }
}

impl From<Uuid> for Ulid {
    #[inline]
    fn from(uuid: Uuid) -> Self {
        Ulid::from_uuid(uuid)
    }
}

impl From<Ulid> for Uuid {
    #[inline]
    fn from(id: Ulid) -> Self {
        id.to_uuid()
    }
}

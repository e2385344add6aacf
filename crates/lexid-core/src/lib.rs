//! lexid Core - Universally Unique Lexicographically Sortable Identifiers
//!
//! This crate defines the ULID value type and everything needed to produce it:
//! - Identifier value type (`Ulid`) with 16-byte big-endian layout
//! - Crockford Base32 text codec (26 characters)
//! - Fast xorshift random source, securely seeded per thread
//! - Explicit generators with injectable clock and random source
//! - GUID/UUID interop and a binary wire codec over `bytes`

pub mod base32;
pub mod clock;
pub mod error;
pub mod generator;
pub mod guid;
pub mod random;
#[cfg(feature = "serde")]
mod serde_impl;
pub mod ulid;
pub mod wire;

pub use clock::*;
pub use error::*;
pub use generator::*;
pub use random::*;
pub use ulid::*;
pub use wire::*;

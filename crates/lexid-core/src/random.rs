//! Random source for the 80-bit randomness field
//!
//! `XorShift64` is fast and deterministic, not cryptographically strong. Its
//! seed comes from the OS CSPRNG, which is enough to keep identifiers minted
//! in the same millisecond apart. The generator is not shared between
//! threads: each thread lazily seeds its own instance on first use.

use std::cell::RefCell;

use rand::rngs::OsRng;
use rand::{RngCore, SeedableRng};

use crate::{LexidError, LexidResult};

/// Size of the randomness field in bytes
pub const RANDOMNESS_LEN: usize = 10;

/// Replacement state for a zero seed (zero is a fixed point of xorshift)
const ZERO_SEED_REPLACEMENT: u64 = 0x9E37_79B9_7F4A_7C15;

/// 64-bit xorshift generator (`x ^= x << 7; x ^= x >> 9`)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    /// Create a generator from an explicit seed
    #[inline]
    pub fn new(seed: u64) -> Self {
        let state = if seed == 0 { ZERO_SEED_REPLACEMENT } else { seed };
        XorShift64 { state }
    }

    /// Seed from the operating system's secure entropy source
    pub fn from_os_rng() -> LexidResult<Self> {
        let mut seed = [0u8; 8];
        OsRng
            .try_fill_bytes(&mut seed)
            .map_err(|e| LexidError::EntropyUnavailable(e.to_string()))?;
        Ok(XorShift64::from_seed(seed))
    }

    /// Advance and return the next state
    #[inline]
    pub fn step(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 7;
        x ^= x >> 9;
        self.state = x;
        x
    }

    /// Current internal state
    #[inline]
    pub fn state(&self) -> u64 {
        self.state
    }
}

impl RngCore for XorShift64 {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        self.step() as u32
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        self.step()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.step().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for XorShift64 {
    type Seed = [u8; 8];

    #[inline]
    fn from_seed(seed: Self::Seed) -> Self {
        XorShift64::new(u64::from_le_bytes(seed))
    }

    #[inline]
    fn seed_from_u64(state: u64) -> Self {
        XorShift64::new(state)
    }
}

/// Draw the 80 randomness bits for one identifier
///
/// Consumes exactly two 64-bit outputs: the low two bytes of the first and
/// all eight bytes of the second, each in little-endian order.
pub fn fill_randomness<R: RngCore + ?Sized>(rng: &mut R) -> [u8; RANDOMNESS_LEN] {
    let first = rng.next_u64().to_le_bytes();
    let second = rng.next_u64().to_le_bytes();

    let mut out = [0u8; RANDOMNESS_LEN];
    out[..2].copy_from_slice(&first[..2]);
    out[2..].copy_from_slice(&second);
    out
}

fn seed_thread_rng() -> XorShift64 {
    match XorShift64::from_os_rng() {
        Ok(rng) => {
            tracing::debug!(
                thread = ?std::thread::current().id(),
                "seeded thread-local ulid random source"
            );
            rng
        }
        Err(e) => {
            // No weaker fallback: identifiers would lose their unpredictability
            tracing::error!(error = %e, "cannot seed ulid random source");
            panic!("lexid: {e}");
        }
    }
}

thread_local! {
    static THREAD_RNG: RefCell<XorShift64> = RefCell::new(seed_thread_rng());
}

/// Run `f` with this thread's generator, seeding it on first use
///
/// # Panics
///
/// Panics if the OS entropy source fails while seeding, or if `f` re-enters.
pub(crate) fn with_thread_rng<T>(f: impl FnOnce(&mut XorShift64) -> T) -> T {
    THREAD_RNG.with(|rng| f(&mut rng.borrow_mut()))
}

/// Fresh randomness from this thread's generator
#[inline]
pub fn thread_randomness() -> [u8; RANDOMNESS_LEN] {
    with_thread_rng(|rng| fill_randomness(rng))
}

//! Explicit ULID generator
//!
//! `Ulid::new()` draws from an implicit per-thread random source. Workers
//! that want the concurrency contract spelled out own a `UlidGenerator`
//! instead: one per worker, passed by `&mut`, with an injectable random
//! source and clock.

use std::time::SystemTime;

use rand::RngCore;

use crate::{unix_millis, Clock, FixedClock, LexidResult, SystemClock, Ulid, XorShift64};

/// Generator configuration
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Fixed seed for the random source; `None` seeds from the OS
    pub seed: Option<u64>,
}

impl GeneratorConfig {
    /// Reproducible output, for tests and replays
    pub fn deterministic(seed: u64) -> Self {
        GeneratorConfig { seed: Some(seed) }
    }

    /// Build the random source this configuration describes
    pub fn build_rng(&self) -> LexidResult<XorShift64> {
        match self.seed {
            Some(seed) => Ok(XorShift64::new(seed)),
            None => XorShift64::from_os_rng(),
        }
    }
}

/// ULID generator owning its random source and clock
#[derive(Debug)]
pub struct UlidGenerator<R = XorShift64, C = SystemClock> {
    rng: R,
    clock: C,
    generated: u64,
}

impl UlidGenerator {
    /// Generator seeded from the OS, stamping wall-clock time
    pub fn new() -> LexidResult<Self> {
        Self::from_config(GeneratorConfig::default())
    }

    pub fn from_config(config: GeneratorConfig) -> LexidResult<Self> {
        let rng = config.build_rng()?;
        tracing::debug!(
            deterministic = config.seed.is_some(),
            "created ulid generator"
        );
        Ok(UlidGenerator::with_parts(rng, SystemClock))
    }
}

impl UlidGenerator<XorShift64, FixedClock> {
    /// Fully deterministic generator: fixed seed, fixed clock
    pub fn deterministic(seed: u64, now_ms: u64) -> Self {
        UlidGenerator::with_parts(XorShift64::new(seed), FixedClock::new(now_ms))
    }
}

impl<R: RngCore, C: Clock> UlidGenerator<R, C> {
    pub fn with_parts(rng: R, clock: C) -> Self {
        UlidGenerator {
            rng,
            clock,
            generated: 0,
        }
    }

    /// New identifier stamped with the generator's clock
    pub fn generate(&mut self) -> Ulid {
        let now = self.clock.now_ms();
        self.generate_at_ms(now)
    }

    /// New identifier stamped with `time`
    pub fn generate_at(&mut self, time: SystemTime) -> Ulid {
        self.generate_at_ms(unix_millis(time))
    }

    pub fn generate_at_ms(&mut self, timestamp_ms: u64) -> Ulid {
        self.generated += 1;
        Ulid::generate_with(timestamp_ms, &mut self.rng)
    }

    /// Number of identifiers produced so far
    #[inline]
    pub fn generated(&self) -> u64 {
        self.generated
    }

    #[inline]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    #[inline]
    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn into_parts(self) -> (R, C) {
        (self.rng, self.clock)
    }
}

impl<R: RngCore, C: Clock> Iterator for UlidGenerator<R, C> {
    type Item = Ulid;

    fn next(&mut self) -> Option<Ulid> {
        Some(self.generate())
    }
}

//! Deterministic Lehmer (Park–Miller) random source.
//!
//! `stateₙ = stateₙ₋₁ × 48271 mod (2³¹ − 1)`, emitted as `stateₙ / (2³¹ − 1)`.
//! Two generators built from the same seed yield identical streams, which is
//! what keeps the demo series reproducible across runs.

/// Multiplier of the recurrence.
pub const MULTIPLIER: u64 = 48_271;

/// Prime modulus of the recurrence (2³¹ − 1).
pub const MODULUS: u64 = 2_147_483_647;

/// Seeded multiplicative linear-congruential generator.
///
/// Owned by exactly one series-generation call; never shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lehmer {
    seed: i64,
    state: u64,
}

impl Lehmer {
    pub fn new(seed: i64) -> Self {
        Self {
            seed,
            state: Self::initial_state(seed),
        }
    }

    fn initial_state(seed: i64) -> u64 {
        // rem_euclid keeps negative seeds inside [0, M)
        seed.rem_euclid(MODULUS as i64) as u64
    }

    pub fn seed(&self) -> i64 {
        self.seed
    }

    /// Current raw state (the numerator of the last emitted value).
    pub fn state(&self) -> u64 {
        self.state
    }

    /// Advance the recurrence and return the next value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.state = self.state * MULTIPLIER % MODULUS;
        self.state as f64 / MODULUS as f64
    }

    /// Rewind to the state the generator was constructed with.
    pub fn restart(&mut self) {
        self.state = Self::initial_state(self.seed);
    }
}

impl Iterator for Lehmer {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.next_f64())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

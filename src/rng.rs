//! Random sources for life generation.
//!
//! The generator never reaches for a platform RNG on its own: every draw
//! comes from the `R: Rng` the caller passes in. [`LifeRng`] is the concrete
//! source used by the binary, seeded either from a user-supplied seed (fully
//! reproducible) or from OS entropy.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Concrete random source for simulations
pub type LifeRng = ChaCha8Rng;

/// Reproducible source: the same seed always yields the same lives
pub fn seeded(seed: u64) -> LifeRng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Source seeded from OS entropy
pub fn from_entropy() -> LifeRng {
    ChaCha8Rng::from_entropy()
}

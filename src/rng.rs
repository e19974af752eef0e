//! Deterministic random number generation
//!
//! Every species x habitat pairing gets its own ChaCha stream derived from
//! the master seed, so a pairing's results are reproducible regardless of
//! how many other pairings run before it.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub struct RngManager {
    master_seed: u64,
}

impl RngManager {
    pub fn new(seed: u64) -> Self {
        Self { master_seed: seed }
    }

    /// The RNG stream for one species x habitat pairing.
    pub fn pair_rng(&self, species_index: u64, habitat_index: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.derive_seed(species_index, habitat_index))
    }

    /// Mix the master seed with both pairing indices.
    fn derive_seed(&self, species_index: u64, habitat_index: u64) -> u64 {
        let mut seed = self.master_seed;
        seed = seed
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        seed ^= species_index.wrapping_mul(1103515245);
        seed = seed
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        seed ^= habitat_index.wrapping_mul(48271);
        seed
    }
}

impl Default for RngManager {
    fn default() -> Self {
        Self::new(7)
    }
}

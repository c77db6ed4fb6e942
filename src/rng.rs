use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

/// The generator every random draw in the simulation goes through.
pub type SimRng = ChaCha12Rng;

/// Create a deterministic RNG from a seed.
pub fn create_rng(seed: u64) -> SimRng {
    ChaCha12Rng::seed_from_u64(seed)
}

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::fmt;

/// Injected random source for shuffled sessions.
///
/// Seeded shufflers make reshuffles reproducible in tests; widgets in
/// production use [`Shuffler::from_entropy`].
#[derive(Clone)]
pub struct Shuffler {
    rng: StdRng,
    seed: Option<u64>,
}

impl Shuffler {
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
            seed: None,
        }
    }

    /// Seed the shuffler was created with, if any.
    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }

    /// A random permutation of `0..len`.
    #[must_use]
    pub fn permutation(&mut self, len: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (0..len).collect();
        self.shuffle(&mut order);
        order
    }
}

impl fmt::Debug for Shuffler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shuffler")
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}

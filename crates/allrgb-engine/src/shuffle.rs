//! Seeded Fisher-Yates shuffling.
//!
//! The shuffler wraps a PCG32 generator. A seeded shuffler replays the same
//! permutation for the same seed; an unseeded one draws its seed from the
//! thread RNG and remembers it, so any run can be reproduced afterwards.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Reproducible permutation source.
///
/// # Example
///
/// ```
/// use allrgb_engine::Shuffler;
///
/// let mut a = vec![1, 2, 3, 4, 5];
/// let mut b = a.clone();
/// Shuffler::seeded(147).shuffle(&mut a);
/// Shuffler::seeded(147).shuffle(&mut b);
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone)]
pub struct Shuffler {
    rng: Pcg32,
    seed: u64,
}

impl Shuffler {
    /// Shuffler whose permutations depend only on `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            seed,
        }
    }

    /// Shuffler seeded from the thread RNG.
    pub fn from_entropy() -> Self {
        Self::seeded(rand::thread_rng().gen())
    }

    /// Seeded when `seed` is given, otherwise from entropy.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }

    /// The seed this shuffler started from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Permute `items` in place.
    ///
    /// Walks from the last index down to 1, swapping each position with a
    /// uniformly chosen index in `0..=i`.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.rng.gen_range(0..=i);
            items.swap(i, j);
        }
    }

    /// Return a shuffled copy, leaving `items` untouched.
    pub fn shuffled<T: Clone>(&mut self, items: &[T]) -> Vec<T> {
        let mut out = items.to_vec();
        self.shuffle(&mut out);
        out
    }
}

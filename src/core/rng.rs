//! Deterministic random number generation for match setup.
//!
//! A match is fully reproducible from its seed: the same seed, bank and
//! configuration always serve the same questions in the same order with the
//! same answer layout. Separate context streams keep question order and
//! answer order independent of each other.
//!
//! ```
//! use quiz_engine::core::QuizRng;
//!
//! let rng = QuizRng::new(42);
//! let mut questions = rng.for_context("questions");
//! let mut again = QuizRng::new(42).for_context("questions");
//!
//! let mut a = vec![1, 2, 3, 4, 5];
//! let mut b = a.clone();
//! questions.shuffle(&mut a);
//! again.shuffle(&mut b);
//! assert_eq!(a, b);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHasher;
use std::hash::Hasher;

/// Seeded RNG used for question and answer shuffling.
///
/// Uses ChaCha8 for speed while keeping sequences stable across platforms.
#[derive(Clone, Debug)]
pub struct QuizRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl QuizRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this stream was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Create an independent stream for a specific context.
    ///
    /// The same context always produces the same stream from the same seed.
    /// The context seed is mixed with `FxHasher` over the raw seed and context
    /// bytes, so it does not depend on the toolchain's `DefaultHasher`.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        let mut hasher = FxHasher::default();
        hasher.write_u64(self.seed);
        hasher.write(context.as_bytes());
        let context_seed = hasher.finish();

        Self {
            inner: ChaCha8Rng::seed_from_u64(context_seed),
            seed: context_seed,
        }
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Shuffle a slice in place.
    ///
    /// Fisher-Yates scanning left to right: index `i` swaps with a uniformly
    /// chosen index in `[i, len)`.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        let len = slice.len();
        for i in 0..len {
            let j = self.gen_range_usize(i..len);
            slice.swap(i, j);
        }
    }
}

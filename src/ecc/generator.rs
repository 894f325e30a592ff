//! Randomized construction of the parity submatrix `A`.
//!
//! The parity-check matrix of a systematic code is `H = [A^T | I_r]`, so its columns are the
//! `k` rows of `A` followed by the `r` unit vectors. A code has minimum distance at least `d`
//! exactly when every `d - 1` columns of `H` are linearly independent.
//!
//! Rows of `A` are drawn one at a time by rejection sampling: a candidate is accepted only if
//! it is not the XOR of `d - 2` or fewer columns already in the pool (the unit vectors plus
//! the rows accepted so far). The empty sum is the zero vector, so zero is always rejected
//! once `d >= 2`. Any dependency among `d - 1` or fewer columns would make its last-added
//! column such a sum, so none can exist.
//!
//! The Varshamov-Gilbert check in [`crate::ecc::bound`] guarantees the forbidden set never
//! covers the whole space, so each draw succeeds with positive probability. There is no
//! bound on the number of draws unless one is configured.

use crate::ecc::gf2::{format_word, to_integer, BinaryMatrix, BitWord};
use crate::ecc::params::GeneratorOptions;
use crate::error::{Error, Result};
use log::{debug, trace};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::collections::HashSet;

/// Every XOR of at most `max_terms` distinct vectors from a growing pool.
///
/// Sums are kept per number of terms so a new pool member only has to be combined with the
/// sums one size smaller.
#[derive(Debug, Clone)]
pub struct ForbiddenSet {
    /// `levels[s]` holds the sums of exactly `s` pool vectors.
    levels: Vec<HashSet<u64>>,
    pool_size: usize,
}

impl ForbiddenSet {
    /// Creates the set for sums of at most `max_terms` vectors.
    ///
    /// `None` means no sum at all is tracked and nothing is ever forbidden.
    pub fn new(max_terms: Option<usize>) -> Self {
        let levels = match max_terms {
            Some(terms) => {
                let mut levels = vec![HashSet::new(); terms + 1];
                levels[0].insert(0);
                levels
            }
            None => Vec::new(),
        };
        ForbiddenSet {
            levels,
            pool_size: 0,
        }
    }

    /// Forbidden set for a code of minimum distance `d`: sums of up to `d - 2` columns.
    pub fn for_distance(d: usize) -> Self {
        Self::new(d.checked_sub(2))
    }

    /// Adds a vector to the pool, extending every level by the sums that include it.
    pub fn insert(&mut self, vector: u64) {
        for size in (1..self.levels.len()).rev() {
            let extended: Vec<u64> = self.levels[size - 1].iter().map(|x| x ^ vector).collect();
            self.levels[size].extend(extended);
        }
        self.pool_size += 1;
    }

    /// Returns whether `vector` is the XOR of at most `max_terms` pool vectors.
    pub fn contains(&self, vector: u64) -> bool {
        self.levels.iter().any(|level| level.contains(&vector))
    }

    /// Number of distinct forbidden vectors.
    pub fn len(&self) -> usize {
        self.levels
            .iter()
            .flat_map(|level| level.iter())
            .collect::<HashSet<_>>()
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.iter().all(|level| level.is_empty())
    }

    pub fn pool_size(&self) -> usize {
        self.pool_size
    }
}

/// Draws random parity submatrices whose columns keep the code's distance.
#[derive(Debug, Clone)]
pub struct MatrixGenerator<R: Rng> {
    rng: R,
    max_draws: Option<usize>,
}

impl MatrixGenerator<ChaCha20Rng> {
    /// Builds a generator from the user-facing options.
    pub fn from_options(options: &GeneratorOptions) -> Self {
        let rng = match options.seed {
            Some(seed) => ChaCha20Rng::seed_from_u64(seed),
            None => ChaCha20Rng::from_entropy(),
        };
        MatrixGenerator {
            rng,
            max_draws: options.max_draws,
        }
    }
}

impl<R: Rng> MatrixGenerator<R> {
    pub fn new(rng: R) -> Self {
        MatrixGenerator {
            rng,
            max_draws: None,
        }
    }

    /// Caps the number of rejected draws for any one row.
    pub fn with_max_draws(mut self, max_draws: usize) -> Self {
        self.max_draws = Some(max_draws);
        self
    }

    /// A vector drawn uniformly from `{0,1}^len`.
    pub fn random_vector(&mut self, len: usize) -> BitWord {
        (0..len).map(|_| self.rng.gen::<bool>()).collect()
    }

    /// Generates the `k` x `r` matrix `A` for a code of minimum distance `d`.
    ///
    /// Row `i` of the result is the `i`-th non-identity column of the parity-check matrix.
    pub fn generate(&mut self, r: usize, k: usize, d: usize) -> Result<BinaryMatrix> {
        let mut forbidden = ForbiddenSet::for_distance(d);
        for i in 0..r {
            forbidden.insert(1u64 << i);
        }

        let mut rows: Vec<BitWord> = Vec::with_capacity(k);
        while rows.len() < k {
            let row = self.draw_allowed(r, &forbidden)?;
            forbidden.insert(to_integer(&row));
            rows.push(row);
        }

        debug!(
            "Generated {} x {} parity submatrix, {} vectors forbidden at the end",
            k,
            r,
            forbidden.len()
        );
        BinaryMatrix::new(rows)
    }

    fn draw_allowed(&mut self, len: usize, forbidden: &ForbiddenSet) -> Result<BitWord> {
        let mut rejected = 0;
        loop {
            let candidate = self.random_vector(len);
            let value = to_integer(&candidate);
            if !forbidden.contains(value) {
                debug!(
                    "Accepted row {} after {} rejected draws",
                    forbidden.pool_size() - len,
                    rejected
                );
                return Ok(candidate);
            }
            trace!("Rejected candidate {}", format_word(&candidate));
            rejected += 1;
            if self.max_draws.is_some_and(|max| rejected >= max) {
                return Err(Error::GenerationStalled { draws: rejected });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecc::gf2::weight;

    fn brute_force_sums(pool: &[u64], max_terms: usize) -> HashSet<u64> {
        let mut sums = HashSet::new();
        for mask in 0u32..(1 << pool.len()) {
            if mask.count_ones() as usize <= max_terms {
                let sum = pool
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| mask & (1u32 << *i) != 0)
                    .fold(0u64, |acc, (_, v)| acc ^ v);
                sums.insert(sum);
            }
        }
        sums
    }

    #[test]
    fn test_forbidden_set_matches_brute_force() {
        let pool = [0b0001, 0b0010, 0b0100, 0b1000, 0b0111, 0b1011];
        for max_terms in 0..4 {
            let mut set = ForbiddenSet::new(Some(max_terms));
            for &v in &pool {
                set.insert(v);
            }
            let expected = brute_force_sums(&pool, max_terms);
            assert_eq!(set.len(), expected.len());
            for value in 0..16 {
                assert_eq!(set.contains(value), expected.contains(&value));
            }
        }
    }

    #[test]
    fn test_forbidden_set_without_terms() {
        let mut set = ForbiddenSet::for_distance(1);
        set.insert(0b11);
        assert!(set.is_empty());
        assert!(!set.contains(0));
        assert_eq!(set.pool_size(), 1);

        let set = ForbiddenSet::for_distance(2);
        assert!(set.contains(0));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_generated_rows_avoid_small_sums() {
        let mut generator = MatrixGenerator::new(ChaCha20Rng::seed_from_u64(42));
        let a = generator.generate(4, 3, 3).unwrap();
        assert_eq!(a.num_rows(), 3);
        assert_eq!(a.num_cols(), 4);

        // d = 3: no row may be zero, a unit vector, or equal to an earlier row
        for (i, row) in a.rows().iter().enumerate() {
            assert!(weight(row) >= 2);
            for earlier in &a.rows()[..i] {
                assert_ne!(row, earlier);
            }
        }
    }

    #[test]
    fn test_generation_is_reproducible() {
        let options = GeneratorOptions::default().with_seed(9);
        let first = MatrixGenerator::from_options(&options)
            .generate(6, 5, 3)
            .unwrap();
        let second = MatrixGenerator::from_options(&options)
            .generate(6, 5, 3)
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_stall_limit() {
        // Only 0b11 is allowed among 2-bit vectors for d = 3, and a second row has nowhere
        // to go, so the generator must give up.
        let mut generator =
            MatrixGenerator::new(ChaCha20Rng::seed_from_u64(1)).with_max_draws(50);
        let result = generator.generate(2, 2, 3);
        assert!(matches!(result, Err(Error::GenerationStalled { draws: 50 })));
    }

    #[test]
    fn test_random_vector_length() {
        let mut generator = MatrixGenerator::new(ChaCha20Rng::seed_from_u64(3));
        assert_eq!(generator.random_vector(11).len(), 11);
        assert!(generator.random_vector(0).is_empty());
    }
}

//! Code parameters and generation options.

use crate::error::{Error, Result};

/// Longest block length the crate will build tables for.
///
/// The syndrome table holds every one of the 2^n words, so this is the practical ceiling.
pub const MAX_BLOCK_LENGTH: usize = 24;

/// Validated parameters of a random linear code.
///
/// `n` is the codeword length, `r` the number of check digits and `p` the bit-error
/// probability of the channel. Everything else is derived from them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CodeParams {
    n: usize,
    r: usize,
    p: f64,
}

impl CodeParams {
    /// Checks the raw numbers and builds a parameter set.
    ///
    /// # Arguments
    ///
    /// * `n` - Codeword length, at most [`MAX_BLOCK_LENGTH`]
    /// * `r` - Number of check digits, `0 < r < n`
    /// * `p` - Channel error probability in `[0, 1]`
    pub fn new(n: usize, r: usize, p: f64) -> Result<Self> {
        if n == 0 {
            return Err(Error::InvalidInput(
                "Code length must be positive".to_string(),
            ));
        }
        if n > MAX_BLOCK_LENGTH {
            return Err(Error::InputTooLarge(format!(
                "Code length {} exceeds the supported maximum of {}",
                n, MAX_BLOCK_LENGTH
            )));
        }
        if r == 0 || r >= n {
            return Err(Error::InvalidInput(format!(
                "Number of check digits must satisfy 0 < r < n, got r = {} for n = {}",
                r, n
            )));
        }
        if !(0.0..=1.0).contains(&p) {
            return Err(Error::InvalidInput(format!(
                "Error probability must lie in [0, 1], got {}",
                p
            )));
        }
        Ok(CodeParams { n, r, p })
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn r(&self) -> usize {
        self.r
    }

    pub fn p(&self) -> f64 {
        self.p
    }

    /// Message length.
    pub fn k(&self) -> usize {
        self.n - self.r
    }

    /// Number of errors per block the code must correct: `floor(p * n)`.
    pub fn t(&self) -> usize {
        (self.p * self.n as f64).floor() as usize
    }

    /// Required minimum distance: `2t + 1`.
    pub fn d(&self) -> usize {
        2 * self.t() + 1
    }
}

/// Knobs for the randomized parts of code generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Seed for a reproducible generator; `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Maximum rejected draws per matrix row before giving up; `None` never gives up.
    pub max_draws: Option<usize>,
}

impl GeneratorOptions {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_max_draws(mut self, max_draws: usize) -> Self {
        self.max_draws = Some(max_draws);
        self
    }
}

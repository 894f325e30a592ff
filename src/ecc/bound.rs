//! Existence checks for binary linear codes.
//!
//! The Varshamov-Gilbert theorem gives a sufficient condition for an `[n, k, d]` binary
//! linear code to exist:
//!
//! ```text
//! 1 + C(n-1, 1) + C(n-1, 2) + ... + C(n-1, d-2) < 2^(n-k)
//! ```
//!
//! The left side counts every sum of at most `d - 2` of the `n - 1` parity-check columns
//! already chosen; when it is smaller than the number of possible columns there is always a
//! column left that keeps every `d - 1` columns independent. The greedy construction in
//! [`crate::ecc::generator`] relies on exactly this argument.

use crate::ecc::params::CodeParams;
use crate::error::{Error, Result};
use num_bigint::BigUint;
use num_integer::binomial;
use num_traits::One;

/// Left side of the Varshamov-Gilbert inequality, computed exactly.
pub fn varshamov_gilbert_sum(n: usize, d: usize) -> BigUint {
    let pool = BigUint::from(n.saturating_sub(1));
    (1..d.saturating_sub(1)).fold(BigUint::one(), |acc, i| {
        acc + binomial(pool.clone(), BigUint::from(i))
    })
}

/// Returns whether `n`, `k`, `d` satisfy the Varshamov-Gilbert condition.
pub fn code_exists(n: usize, k: usize, d: usize) -> bool {
    if k == 0 || k >= n {
        return false;
    }
    varshamov_gilbert_sum(n, d) < (BigUint::one() << (n - k))
}

/// Fails with [`Error::InfeasibleParameters`] unless a code with `params` is known to exist.
pub fn validate(params: &CodeParams) -> Result<()> {
    let (n, k, d) = (params.n(), params.k(), params.d());
    if code_exists(n, k, d) {
        Ok(())
    } else {
        Err(Error::InfeasibleParameters { n, k, d })
    }
}

/// Probability that a block of length `n` suffers more than `t` bit errors on a channel
/// with bit-error probability `p`, i.e. the chance that decoding can go wrong.
pub fn word_error_probability(n: usize, t: usize, p: f64) -> f64 {
    let correctable: f64 = (0..=t.min(n))
        .map(|i| {
            let ways = binomial(n as u64, i as u64) as f64;
            ways * p.powi(i as i32) * (1.0 - p).powi((n - i) as i32)
        })
        .sum();
    (1.0 - correctable).max(0.0)
}

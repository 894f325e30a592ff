//! Systematic generator and parity-check matrices.
//!
//! Given the `k` x `r` parity submatrix `A`:
//!
//! ```text
//! G = [ I_k | A   ]   (k rows, n columns)
//! H = [ A^T | I_r ]   (r rows, n columns)
//! ```
//!
//! Every row of `G` is orthogonal to every row of `H`, since row `i` of `G` and row `j` of
//! `H` share exactly the entry `A[i][j]`, once in each half.

use crate::ecc::gf2::BinaryMatrix;
use crate::error::{Error, Result};

/// Generator and parity-check matrix of one code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystematicMatrices {
    pub generator: BinaryMatrix,
    pub parity_check: BinaryMatrix,
}

/// Builds `G = [I_k | A]`.
pub fn build_generator_matrix(a: &BinaryMatrix) -> Result<BinaryMatrix> {
    BinaryMatrix::identity(a.num_rows()).hconcat(a)
}

/// Builds `H = [A^T | I_r]`.
pub fn build_parity_check_matrix(a: &BinaryMatrix) -> Result<BinaryMatrix> {
    a.transpose().hconcat(&BinaryMatrix::identity(a.num_cols()))
}

/// Builds both matrices from the parity submatrix.
pub fn build_systematic(a: &BinaryMatrix) -> Result<SystematicMatrices> {
    Ok(SystematicMatrices {
        generator: build_generator_matrix(a)?,
        parity_check: build_parity_check_matrix(a)?,
    })
}

/// Splits a systematic generator matrix back into its parity submatrix `A`.
///
/// Fails if the first `k` columns are not the identity.
pub fn parity_submatrix(generator: &BinaryMatrix) -> Result<BinaryMatrix> {
    let k = generator.num_rows();
    if generator.num_cols() < k {
        return Err(Error::InvalidInput(format!(
            "Generator matrix with {} rows needs at least {} columns, has {}",
            k,
            k,
            generator.num_cols()
        )));
    }
    if generator.columns(0, k) != BinaryMatrix::identity(k) {
        return Err(Error::InvalidInput(
            "Generator matrix is not in systematic form".to_string(),
        ));
    }
    Ok(generator.columns(k, generator.num_cols()))
}

/// Recovers `H` from a systematic `G`.
pub fn parity_check_from_generator(generator: &BinaryMatrix) -> Result<BinaryMatrix> {
    build_parity_check_matrix(&parity_submatrix(generator)?)
}

/// Returns whether `G * H^T = 0 (mod 2)`.
pub fn is_orthogonal(generator: &BinaryMatrix, parity_check: &BinaryMatrix) -> bool {
    generator.rows().iter().all(|row| {
        parity_check
            .mul_vec(row)
            .map(|syndrome| syndrome.not_any())
            .unwrap_or(false)
    })
}

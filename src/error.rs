//! Error types shared by every part of the crate.

use thiserror::Error;

/// Errors raised while building, persisting, or using a linear code.
#[derive(Debug, Error)]
pub enum Error {
    /// Raw input could not be interpreted (bad characters, out-of-range parameters).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The request exceeds what exhaustive enumeration can handle.
    #[error("Input too large: {0}")]
    InputTooLarge(String),

    /// The parameters fail the Varshamov-Gilbert existence check.
    #[error(
        "Cannot build a code with n = {n}, k = {k}, d = {d}: \
         the parameters do not satisfy the Varshamov-Gilbert bound"
    )]
    InfeasibleParameters { n: usize, k: usize, d: usize },

    /// A vector has the wrong length for the code it is used with.
    #[error("Wrong {what} size: expected {expected} bits, got {actual}")]
    SizeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A caller-supplied error vector is heavier than the code can correct.
    #[error("Invalid error vector: weight {weight} is more than {max}")]
    ErrorWeightExceeded { weight: usize, max: usize },

    /// The received word could not be placed in any coset of the table.
    #[error("Too many errors: no coset for syndrome {syndrome} contains the received word")]
    Uncorrectable { syndrome: u64 },

    /// The tables and matrices of a code disagree with each other.
    #[error("Internal inconsistency: {0}")]
    InternalInconsistency(String),

    /// Rejection sampling hit its configured draw limit.
    #[error("Generation stalled after {draws} rejected draws")]
    GenerationStalled { draws: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Serialization failed: {0}")]
    Serialization(#[from] bincode::Error),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

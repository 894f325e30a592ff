//! Random binary linear error-correcting codes.
//!
//! This module builds a random `[n, k]` binary linear code that is guaranteed to correct
//! `t` errors per block, and decodes it with a precomputed syndrome table:
//! - Varshamov-Gilbert existence check for the requested parameters
//! - Randomized construction of the parity submatrix
//! - Systematic generator and parity-check matrices
//! - Exhaustive codeword and syndrome tables
//! - Encoding with simulated channel noise and coset-leader decoding
//!
//! The tables hold all `2^n` words of the space, so only short block lengths are supported.
//!
//! # Examples
//!
//! ```rust
//! use lincode::ecc::gf2::parse_word;
//! use lincode::{Code, CodeParams, GeneratorOptions};
//!
//! let params = CodeParams::new(7, 4, 0.15).unwrap();
//! let code = Code::generate(&params, &GeneratorOptions::default().with_seed(1)).unwrap();
//!
//! let message = parse_word("101").unwrap();
//! let error = parse_word("0001000").unwrap();
//! let encoded = code.encode(&message, Some(&error)).unwrap();
//!
//! let decoded = code.decode(&encoded.corrupted).unwrap();
//! assert_eq!(decoded.message, message);
//! assert_eq!(decoded.error, error);
//! ```

pub use crate::error::Result;
use crate::ecc::gf2::{BitWord, Bits};

/// Trait for error correction code implementations
pub trait ErrorCorrection {
    /// Encode a message without adding any error
    fn encode_word(&self, message: &Bits) -> Result<BitWord>;

    /// Correct a received word and return the message it carries
    fn decode_word(&self, received: &Bits) -> Result<BitWord>;
}

pub mod bound;
pub mod code;
pub mod coder;
pub mod generator;
pub mod gf2;
pub mod params;
pub mod systematic;
pub mod tables;


pub use code::Code;
pub use coder::{Decoded, Encoded};
pub use params::{CodeParams, GeneratorOptions, MAX_BLOCK_LENGTH};

impl ErrorCorrection for Code {
    fn encode_word(&self, message: &Bits) -> Result<BitWord> {
        let zero = BitWord::repeat(false, self.n());
        Ok(self.encode(message, Some(&zero))?.codeword)
    }

    fn decode_word(&self, received: &Bits) -> Result<BitWord> {
        Ok(self.decode(received)?.message)
    }
}

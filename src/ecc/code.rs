//! The code descriptor: everything needed to encode and decode, built once and persisted.

use crate::ecc::bound::{self, word_error_probability};
use crate::ecc::generator::MatrixGenerator;
use crate::ecc::gf2::{weight, BinaryMatrix};
use crate::ecc::params::{CodeParams, GeneratorOptions, MAX_BLOCK_LENGTH};
use crate::ecc::systematic::{build_systematic, parity_check_from_generator};
use crate::ecc::tables::{CodewordTable, SyndromeTable};
use crate::error::{Error, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A random binary linear code with its decoding tables.
///
/// Once built the descriptor never changes. It is written to disk by generation and loaded
/// again by every encode or decode run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Code {
    pub(crate) n: usize,
    pub(crate) t: usize,
    pub(crate) r: usize,
    pub(crate) generator: BinaryMatrix,
    pub(crate) codewords: CodewordTable,
    pub(crate) syndromes: SyndromeTable,
}

impl Code {
    /// Builds a code for `params`.
    ///
    /// Fails with [`Error::InfeasibleParameters`] before doing any matrix work when the
    /// Varshamov-Gilbert condition does not hold.
    pub fn generate(params: &CodeParams, options: &GeneratorOptions) -> Result<Self> {
        let (n, r, k, t, d) = (params.n(), params.r(), params.k(), params.t(), params.d());
        info!("Start generation with t = {}, d = {}, k = {}", t, d, k);
        bound::validate(params)?;

        let mut generator = MatrixGenerator::from_options(options);
        let a = generator.generate(r, k, d)?;
        let matrices = build_systematic(&a)?;
        debug!("H:\n{}", matrices.parity_check);
        debug!("G:\n{}", matrices.generator);
        info!(
            "Word error probability of the code: {}",
            word_error_probability(n, t, params.p())
        );

        let codewords = CodewordTable::build(&matrices.generator)?;
        let syndromes = SyndromeTable::build(&matrices.parity_check)?;

        Ok(Code {
            n,
            t,
            r,
            generator: matrices.generator,
            codewords,
            syndromes,
        })
    }

    /// Assembles a descriptor from its parts, checking that they fit together.
    pub fn from_parts(
        n: usize,
        t: usize,
        r: usize,
        generator: BinaryMatrix,
        codewords: CodewordTable,
        syndromes: SyndromeTable,
    ) -> Result<Self> {
        let code = Code {
            n,
            t,
            r,
            generator,
            codewords,
            syndromes,
        };
        code.check_structure()?;
        Ok(code)
    }

    fn check_structure(&self) -> Result<()> {
        let malformed =
            |detail: String| Err(Error::InvalidInput(format!("Malformed code: {}", detail)));

        if self.n == 0 || self.n > MAX_BLOCK_LENGTH || self.r == 0 || self.r >= self.n {
            return malformed(format!("n = {}, r = {}", self.n, self.r));
        }
        if self.t > self.n {
            return malformed(format!("t = {} exceeds n = {}", self.t, self.n));
        }
        if self.generator.num_rows() != self.k() || self.generator.num_cols() != self.n {
            return malformed(format!(
                "generator matrix is {} x {}, expected {} x {}",
                self.generator.num_rows(),
                self.generator.num_cols(),
                self.k(),
                self.n
            ));
        }
        if self.codewords.len() != 1 << self.k() {
            return malformed(format!(
                "{} codewords, expected {}",
                self.codewords.len(),
                1u64 << self.k()
            ));
        }
        if let Some((codeword, message)) = self
            .codewords
            .iter()
            .find(|(codeword, message)| codeword.len() != self.n || message.len() != self.k())
        {
            return malformed(format!(
                "codeword {} of length {} with message of length {}",
                codeword,
                codeword.len(),
                message.len()
            ));
        }
        if self.syndromes.total_words() != 1 << self.n {
            return malformed(format!(
                "syndrome table holds {} words, expected {}",
                self.syndromes.total_words(),
                1u64 << self.n
            ));
        }
        for (value, members) in self.syndromes.iter() {
            if let Some(member) = members.iter().find(|member| member.len() != self.n) {
                return malformed(format!(
                    "coset {} holds a word of length {}",
                    value,
                    member.len()
                ));
            }
        }
        parity_check_from_generator(&self.generator)?;
        Ok(())
    }

    /// Codeword length.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Number of check digits.
    pub fn r(&self) -> usize {
        self.r
    }

    /// Message length.
    pub fn k(&self) -> usize {
        self.n - self.r
    }

    /// Number of errors per block the code corrects.
    pub fn t(&self) -> usize {
        self.t
    }

    /// Designed minimum distance.
    pub fn d(&self) -> usize {
        2 * self.t + 1
    }

    pub fn generator(&self) -> &BinaryMatrix {
        &self.generator
    }

    /// Parity-check matrix, recomputed from the systematic generator.
    pub fn parity_check(&self) -> Result<BinaryMatrix> {
        parity_check_from_generator(&self.generator)
    }

    pub fn codewords(&self) -> &CodewordTable {
        &self.codewords
    }

    pub fn syndromes(&self) -> &SyndromeTable {
        &self.syndromes
    }

    /// Probability that a block sent over a channel with bit-error probability `p`
    /// picks up more errors than the code corrects.
    pub fn word_error_probability(&self, p: f64) -> f64 {
        word_error_probability(self.n, self.t, p)
    }

    /// Actual minimum distance: the smallest weight of a nonzero codeword.
    pub fn minimum_distance(&self) -> Option<usize> {
        self.syndromes
            .coset(0)?
            .iter()
            .map(|codeword| weight(codeword))
            .filter(|&w| w > 0)
            .min()
    }

    /// Serializes the descriptor.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Deserializes a descriptor and checks that it is well formed.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let code: Code = bincode::deserialize(bytes)?;
        code.check_structure()?;
        Ok(code)
    }

    /// Writes the descriptor to `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path.as_ref(), self.to_bytes()?)?;
        info!("Code written to {}", path.as_ref().display());
        Ok(())
    }

    /// Reads a descriptor from `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = fs::read(path.as_ref())?;
        debug!("Read {} bytes from {}", bytes.len(), path.as_ref().display());
        Self::from_bytes(&bytes)
    }
}

//! Lookup tables used for decoding.
//!
//! Both tables are built by exhaustive enumeration: the codeword table walks all `2^k`
//! messages, the syndrome table all `2^n` words of the ambient space. Words are enumerated
//! in ascending integer order (most significant bit first), and that order is preserved
//! inside every coset.

use crate::ecc::gf2::{
    format_word, from_integer, to_integer, weight, BinaryMatrix, BitWord, Bits,
};
use crate::error::{Error, Result};
use log::info;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Integer value of `H * word (mod 2)`, first row of `H` as the most significant bit.
pub fn syndrome(parity_check: &BinaryMatrix, word: &Bits) -> Result<u64> {
    Ok(to_integer(&parity_check.mul_vec(word)?))
}

/// Maps every codeword (as a `"0"`/`"1"` string) to the message that produces it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodewordTable {
    entries: BTreeMap<String, BitWord>,
}

impl CodewordTable {
    /// Encodes every message of length `k` with `generator`.
    ///
    /// Two messages producing the same codeword means `generator` is rank deficient,
    /// which is reported as an internal inconsistency.
    pub fn build(generator: &BinaryMatrix) -> Result<Self> {
        let k = generator.num_rows();
        let mut entries = BTreeMap::new();
        for i in 0..(1u64 << k) {
            let message = from_integer(i, k);
            let codeword = generator.left_mul(&message)?;
            let key = format_word(&codeword);
            if entries.insert(key, message).is_some() {
                return Err(Error::InternalInconsistency(format!(
                    "Codeword {} is produced by two different messages",
                    format_word(&codeword)
                )));
            }
        }
        info!("Built codeword table with {} entries", entries.len());
        Ok(CodewordTable { entries })
    }

    /// Wraps an existing codeword-to-message map.
    pub fn from_entries(entries: BTreeMap<String, BitWord>) -> Self {
        CodewordTable { entries }
    }

    /// Message that encodes to `codeword`, if it is a codeword.
    pub fn message_for(&self, codeword: &Bits) -> Option<&BitWord> {
        self.entries.get(&format_word(codeword))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &BitWord)> {
        self.entries.iter()
    }
}

/// Maps every syndrome value to its coset: the words of length `n` sharing it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyndromeTable {
    cosets: BTreeMap<u64, Vec<BitWord>>,
}

impl SyndromeTable {
    /// Computes the syndrome of all `2^n` words and groups them into cosets.
    pub fn build(parity_check: &BinaryMatrix) -> Result<Self> {
        let n = parity_check.num_cols();
        let syndromes = Self::enumerate_syndromes(parity_check)?;

        let mut cosets: BTreeMap<u64, Vec<BitWord>> = BTreeMap::new();
        for (i, value) in syndromes.into_iter().enumerate() {
            cosets.entry(value).or_default().push(from_integer(i as u64, n));
        }

        info!(
            "Built syndrome table with {} cosets covering {} words",
            cosets.len(),
            1u64 << n
        );
        Ok(SyndromeTable { cosets })
    }

    /// Wraps an existing syndrome-to-coset map.
    pub fn from_cosets(cosets: BTreeMap<u64, Vec<BitWord>>) -> Self {
        SyndromeTable { cosets }
    }

    #[cfg(feature = "parallel")]
    fn enumerate_syndromes(parity_check: &BinaryMatrix) -> Result<Vec<u64>> {
        let n = parity_check.num_cols();
        (0..(1usize << n))
            .into_par_iter()
            .map(|i| syndrome(parity_check, &from_integer(i as u64, n)))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn enumerate_syndromes(parity_check: &BinaryMatrix) -> Result<Vec<u64>> {
        let n = parity_check.num_cols();
        (0..(1usize << n))
            .map(|i| syndrome(parity_check, &from_integer(i as u64, n)))
            .collect()
    }

    /// Words with the given syndrome, in enumeration order.
    pub fn coset(&self, syndrome: u64) -> Option<&[BitWord]> {
        self.cosets.get(&syndrome).map(Vec::as_slice)
    }

    /// Finds the coset containing `word` by scanning every coset.
    ///
    /// This trusts the table alone and never touches `H`; decoding uses the direct
    /// syndrome computation instead.
    pub fn locate(&self, word: &Bits) -> Option<u64> {
        self.cosets
            .iter()
            .find(|(_, members)| members.iter().any(|member| member.as_bitslice() == word))
            .map(|(&syndrome, _)| syndrome)
    }

    /// Minimum-weight member of a coset. Ties go to the member enumerated first.
    pub fn coset_leader(&self, syndrome: u64) -> Option<&BitWord> {
        let members = self.cosets.get(&syndrome)?;
        let mut leader = members.first()?;
        for member in &members[1..] {
            if weight(member) < weight(leader) {
                leader = member;
            }
        }
        Some(leader)
    }

    /// Number of cosets.
    pub fn len(&self) -> usize {
        self.cosets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cosets.is_empty()
    }

    /// Total number of words over all cosets.
    pub fn total_words(&self) -> usize {
        self.cosets.values().map(Vec::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&u64, &Vec<BitWord>)> {
        self.cosets.iter()
    }
}

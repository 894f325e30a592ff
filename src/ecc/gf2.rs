//! Vector and matrix arithmetic over GF(2).
//!
//! Binary vectors are stored as `BitVec<u8, Msb0>` so that index 0 is the most significant
//! bit of the integer a word represents. That is the same order used when words are rendered
//! as `"0"`/`"1"` strings, and it is the order in which the code tables enumerate words.

use crate::error::{Error, Result};
use bitvec::prelude::*;
use serde::{Deserialize, Serialize};

/// An owned binary vector.
pub type BitWord = BitVec<u8, Msb0>;

/// A borrowed binary vector.
pub type Bits = BitSlice<u8, Msb0>;

/// Largest vector length that still fits the integer conversions below.
pub const MAX_INTEGER_BITS: usize = 64;

/// Hamming weight: the number of ones in `word`.
pub fn weight(word: &Bits) -> usize {
    word.count_ones()
}

/// Reduces an integer-valued vector modulo 2.
pub fn reduce_mod2(values: &[u32]) -> BitWord {
    values.iter().map(|&v| v % 2 == 1).collect()
}

/// XORs `other` into `acc` bit by bit.
///
/// Both slices must have the same length.
pub fn xor_assign(acc: &mut Bits, other: &Bits) {
    debug_assert_eq!(acc.len(), other.len());
    for (mut a, b) in acc.iter_mut().zip(other.iter().by_vals()) {
        *a ^= b;
    }
}

/// Sum (XOR) of any number of vectors of length `len`.
///
/// The empty sum is the zero vector.
pub fn xor_sum<'a, I>(vectors: I, len: usize) -> BitWord
where
    I: IntoIterator<Item = &'a Bits>,
{
    let mut result = BitWord::repeat(false, len);
    for vector in vectors {
        xor_assign(&mut result, vector);
    }
    result
}

/// Reads a binary vector as an unsigned integer, most significant bit first.
pub fn to_integer(word: &Bits) -> u64 {
    debug_assert!(word.len() <= MAX_INTEGER_BITS);
    word.iter()
        .by_vals()
        .fold(0u64, |acc, bit| (acc << 1) | u64::from(bit))
}

/// Renders `value` as a `len`-bit vector, most significant bit first.
pub fn from_integer(value: u64, len: usize) -> BitWord {
    debug_assert!(len <= MAX_INTEGER_BITS);
    (0..len).rev().map(|shift| (value >> shift) & 1 == 1).collect()
}

/// Parses a string of `'0'` and `'1'` characters.
pub fn parse_word(text: &str) -> Result<BitWord> {
    text.chars()
        .map(|c| match c {
            '0' => Ok(false),
            '1' => Ok(true),
            other => Err(Error::InvalidInput(format!(
                "Binary word may only contain '0' and '1', found {:?}",
                other
            ))),
        })
        .collect()
}

/// Renders a binary vector as a string of `'0'` and `'1'` characters.
pub fn format_word(word: &Bits) -> String {
    word.iter()
        .by_vals()
        .map(|bit| if bit { '1' } else { '0' })
        .collect()
}

/// Dense binary matrix stored row by row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinaryMatrix {
    rows: Vec<BitWord>,
    cols: usize,
}

impl BinaryMatrix {
    /// Creates a matrix from its rows. All rows must have the same length.
    pub fn new(rows: Vec<BitWord>) -> Result<Self> {
        let cols = rows.first().map_or(0, |row| row.len());
        if let Some(row) = rows.iter().find(|row| row.len() != cols) {
            return Err(Error::SizeMismatch {
                what: "matrix row",
                expected: cols,
                actual: row.len(),
            });
        }
        Ok(BinaryMatrix { rows, cols })
    }

    /// Creates a matrix from rows of integers, reducing every entry modulo 2.
    pub fn from_integer_rows(rows: &[Vec<u32>]) -> Result<Self> {
        Self::new(rows.iter().map(|row| reduce_mod2(row)).collect())
    }

    /// The `size` x `size` identity matrix.
    pub fn identity(size: usize) -> Self {
        let rows = (0..size)
            .map(|i| {
                let mut row = BitWord::repeat(false, size);
                row.set(i, true);
                row
            })
            .collect();
        BinaryMatrix { rows, cols: size }
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> &[BitWord] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> &Bits {
        &self.rows[index]
    }

    /// Returns the transposed matrix.
    pub fn transpose(&self) -> Self {
        let rows = (0..self.cols)
            .map(|j| self.rows.iter().map(|row| row[j]).collect())
            .collect();
        BinaryMatrix {
            rows,
            cols: self.rows.len(),
        }
    }

    /// Places `other` to the right of `self`.
    pub fn hconcat(&self, other: &BinaryMatrix) -> Result<Self> {
        if self.num_rows() != other.num_rows() {
            return Err(Error::SizeMismatch {
                what: "matrix height",
                expected: self.num_rows(),
                actual: other.num_rows(),
            });
        }
        let rows = self
            .rows
            .iter()
            .zip(&other.rows)
            .map(|(left, right)| {
                let mut row = left.clone();
                row.extend_from_bitslice(right);
                row
            })
            .collect();
        Ok(BinaryMatrix {
            rows,
            cols: self.cols + other.cols,
        })
    }

    /// Copies the columns in `start..end` into a new matrix.
    pub fn columns(&self, start: usize, end: usize) -> Self {
        let rows = self
            .rows
            .iter()
            .map(|row| row[start..end].to_bitvec())
            .collect();
        BinaryMatrix {
            rows,
            cols: end - start,
        }
    }

    /// Row vector times matrix: `vector * self (mod 2)`.
    pub fn left_mul(&self, vector: &Bits) -> Result<BitWord> {
        if vector.len() != self.num_rows() {
            return Err(Error::SizeMismatch {
                what: "vector",
                expected: self.num_rows(),
                actual: vector.len(),
            });
        }
        Ok(xor_sum(
            vector
                .iter()
                .by_vals()
                .zip(&self.rows)
                .filter(|(bit, _)| *bit)
                .map(|(_, row)| row.as_bitslice()),
            self.cols,
        ))
    }

    /// Matrix times column vector: `self * vector (mod 2)`.
    pub fn mul_vec(&self, vector: &Bits) -> Result<BitWord> {
        if vector.len() != self.cols {
            return Err(Error::SizeMismatch {
                what: "vector",
                expected: self.cols,
                actual: vector.len(),
            });
        }
        Ok(self
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .by_vals()
                    .zip(vector.iter().by_vals())
                    .filter(|&(a, b)| a && b)
                    .count()
                    % 2
                    == 1
            })
            .collect())
    }

    /// Rank over GF(2), by Gaussian elimination on a copy.
    pub fn rank(&self) -> usize {
        let mut rows = self.rows.clone();
        let mut rank = 0;
        for col in 0..self.cols {
            let Some(pivot) = (rank..rows.len()).find(|&i| rows[i][col]) else {
                continue;
            };
            rows.swap(rank, pivot);
            let pivot_row = rows[rank].clone();
            for (i, row) in rows.iter_mut().enumerate() {
                if i != rank && row[col] {
                    xor_assign(row, &pivot_row);
                }
            }
            rank += 1;
        }
        rank
    }
}

impl std::fmt::Display for BinaryMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.rows {
            writeln!(f, "{}", format_word(row))?;
        }
        Ok(())
    }
}

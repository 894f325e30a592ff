//! Encoding with simulated channel noise, and syndrome decoding.

use crate::ecc::code::Code;
use crate::ecc::gf2::{format_word, weight, xor_sum, BitWord, Bits};
use crate::ecc::tables::syndrome;
use crate::error::{Error, Result};
use log::{debug, error, warn};
use rand::Rng;

/// Output of [`Code::encode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    /// `message * G`
    pub codeword: BitWord,
    /// Error pattern added by the channel.
    pub error: BitWord,
    /// `codeword + error`
    pub corrupted: BitWord,
}

/// Output of [`Code::decode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// Most likely error pattern: the leader of the received word's coset.
    pub error: BitWord,
    /// Received word with the error pattern removed.
    pub corrected: BitWord,
    /// Message that encodes to `corrected`.
    pub message: BitWord,
}

impl Code {
    /// Encodes `message` and adds an error pattern.
    ///
    /// Without an explicit `error`, a random pattern of weight at most `t` is drawn from the
    /// thread-local generator.
    pub fn encode(&self, message: &Bits, error: Option<&Bits>) -> Result<Encoded> {
        self.encode_with_rng(&mut rand::thread_rng(), message, error)
    }

    /// Same as [`Code::encode`], drawing any random error pattern from `rng`.
    pub fn encode_with_rng<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        message: &Bits,
        error: Option<&Bits>,
    ) -> Result<Encoded> {
        if message.len() != self.k() {
            return Err(Error::SizeMismatch {
                what: "message",
                expected: self.k(),
                actual: message.len(),
            });
        }

        let error = match error {
            Some(error) => {
                if error.len() != self.n() {
                    return Err(Error::SizeMismatch {
                        what: "error",
                        expected: self.n(),
                        actual: error.len(),
                    });
                }
                if weight(error) > self.t() {
                    return Err(Error::ErrorWeightExceeded {
                        weight: weight(error),
                        max: self.t(),
                    });
                }
                error.to_bitvec()
            }
            None => self.random_error(rng),
        };

        let codeword = self.generator().left_mul(message)?;
        let corrupted = xor_sum([codeword.as_bitslice(), error.as_bitslice()], self.n());
        debug!(
            "Encoded {} as {} with error {}",
            format_word(message),
            format_word(&codeword),
            format_word(&error)
        );

        Ok(Encoded {
            codeword,
            error,
            corrupted,
        })
    }

    /// Uniform draws from `{0,1}^n`, repeated until the weight is at most `t`.
    fn random_error<R: Rng + ?Sized>(&self, rng: &mut R) -> BitWord {
        loop {
            let candidate: BitWord = (0..self.n()).map(|_| rng.gen::<bool>()).collect();
            if weight(&candidate) <= self.t() {
                return candidate;
            }
        }
    }

    /// Corrects `received` and recovers the message.
    ///
    /// The syndrome is computed from `H` and used as an index into the syndrome table.
    /// The received word must actually be listed in that coset, otherwise decoding fails
    /// with [`Error::Uncorrectable`].
    pub fn decode(&self, received: &Bits) -> Result<Decoded> {
        if received.len() != self.n() {
            return Err(Error::SizeMismatch {
                what: "received word",
                expected: self.n(),
                actual: received.len(),
            });
        }

        let value = syndrome(&self.parity_check()?, received)?;
        let listed = self
            .syndromes()
            .coset(value)
            .is_some_and(|coset| coset.iter().any(|member| member.as_bitslice() == received));
        let leader = match self.syndromes().coset_leader(value) {
            Some(leader) if listed => leader,
            _ => return Err(Error::Uncorrectable { syndrome: value }),
        };
        if weight(leader) > self.t() {
            warn!(
                "Coset leader {} is heavier than t = {}, the correction may be wrong",
                format_word(leader),
                self.t()
            );
        }

        let corrected = xor_sum([leader.as_bitslice(), received], self.n());
        let message = match self.codewords().message_for(&corrected) {
            Some(message) => message.clone(),
            None => {
                error!(
                    "Corrected word {} is missing from the codeword table",
                    format_word(&corrected)
                );
                return Err(Error::InternalInconsistency(format!(
                    "corrected word {} is not a codeword",
                    format_word(&corrected)
                )));
            }
        };

        Ok(Decoded {
            error: leader.clone(),
            corrected,
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecc::gf2::parse_word;
    use crate::ecc::params::{CodeParams, GeneratorOptions};
    use crate::ecc::tables::{CodewordTable, SyndromeTable};
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn word(text: &str) -> BitWord {
        parse_word(text).unwrap()
    }

    fn hamming_like() -> Code {
        let params = CodeParams::new(7, 4, 0.15).unwrap();
        Code::generate(&params, &GeneratorOptions::default().with_seed(11)).unwrap()
    }

    #[test]
    fn test_encode_is_systematic() {
        let code = hamming_like();
        let encoded = code.encode(&word("101"), Some(&word("0000000"))).unwrap();
        assert_eq!(&encoded.codeword[..3], word("101").as_bitslice());
        assert_eq!(encoded.corrupted, encoded.codeword);
        assert_eq!(
            code.codewords().message_for(&encoded.codeword),
            Some(&word("101"))
        );
    }

    #[test]
    fn test_encode_adds_given_error() {
        let code = hamming_like();
        let encoded = code.encode(&word("101"), Some(&word("0010000"))).unwrap();
        let mut expected = encoded.codeword.clone();
        let flipped = !expected[2];
        expected.set(2, flipped);
        assert_eq!(encoded.corrupted, expected);
        assert_eq!(encoded.error, word("0010000"));
    }

    #[test]
    fn test_encode_size_checks() {
        let code = hamming_like();
        assert!(matches!(
            code.encode(&word("1011"), None),
            Err(Error::SizeMismatch {
                what: "message",
                expected: 3,
                actual: 4
            })
        ));
        assert!(matches!(
            code.encode(&word("101"), Some(&word("0001"))),
            Err(Error::SizeMismatch { what: "error", .. })
        ));
    }

    #[test]
    fn test_encode_rejects_heavy_error() {
        let code = hamming_like();
        assert!(matches!(
            code.encode(&word("101"), Some(&word("1100000"))),
            Err(Error::ErrorWeightExceeded { weight: 2, max: 1 })
        ));
    }

    #[test]
    fn test_random_error_respects_weight() {
        let code = hamming_like();
        let mut rng = ChaCha20Rng::seed_from_u64(77);
        for _ in 0..50 {
            let encoded = code.encode_with_rng(&mut rng, &word("011"), None).unwrap();
            assert!(weight(&encoded.error) <= code.t());
            assert_eq!(code.decode(&encoded.corrupted).unwrap().message, word("011"));
        }
    }

    #[test]
    fn test_decode_single_error() {
        let code = hamming_like();
        let encoded = code.encode(&word("101"), Some(&word("0000010"))).unwrap();
        let decoded = code.decode(&encoded.corrupted).unwrap();
        assert_eq!(decoded.error, word("0000010"));
        assert_eq!(decoded.corrected, encoded.codeword);
        assert_eq!(decoded.message, word("101"));
    }

    #[test]
    fn test_decode_size_check() {
        let code = hamming_like();
        assert!(matches!(
            code.decode(&word("101")),
            Err(Error::SizeMismatch {
                what: "received word",
                ..
            })
        ));
    }

    #[test]
    fn test_decode_with_missing_coset_is_uncorrectable() {
        let code = hamming_like();
        let h = code.parity_check().unwrap();
        let received = word("1111111");
        let value = syndrome(&h, &received).unwrap();

        // A table that lost the coset of `received`, as a damaged descriptor might.
        let cosets = code
            .syndromes()
            .iter()
            .filter(|&(&s, _)| s != value)
            .map(|(&s, members)| (s, members.clone()))
            .collect();
        let damaged = Code {
            syndromes: SyndromeTable::from_cosets(cosets),
            ..code.clone()
        };
        assert!(matches!(
            damaged.decode(&received),
            Err(Error::Uncorrectable { syndrome }) if syndrome == value
        ));
    }

    #[test]
    fn test_decode_with_missing_codeword_is_inconsistent() {
        let code = hamming_like();
        let encoded = code.encode(&word("110"), Some(&word("0000000"))).unwrap();
        let entries = code
            .codewords()
            .iter()
            .filter(|(_, message)| **message != word("110"))
            .map(|(codeword, message)| (codeword.clone(), message.clone()))
            .collect();
        let damaged = Code {
            codewords: CodewordTable::from_entries(entries),
            ..code.clone()
        };
        assert!(matches!(
            damaged.decode(&encoded.corrupted),
            Err(Error::InternalInconsistency(_))
        ));
    }
}

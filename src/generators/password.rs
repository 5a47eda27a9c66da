// src/generators/password.rs
use rand::rngs::OsRng;
use rand::seq::SliceRandom;
use rand::{CryptoRng, Rng, RngCore};
use thiserror::Error;

use super::charset::{self, CLASSES};

/// Length used when the caller does not ask for one.
pub const DEFAULT_LENGTH: usize = 12;

/// Shortest length that can hold one character of every class.
pub const MIN_LENGTH: usize = CLASSES.len();

/// Longest password the generator will produce.
pub const MAX_LENGTH: usize = 128;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("Password length {length} is too short, need at least {min} characters")]
    InvalidLength { length: usize, min: usize },

    #[error("Password length {length} is too long, at most {max} characters allowed")]
    TooLong { length: usize, max: usize },
}

pub type Result<T> = std::result::Result<T, GeneratorError>;

/// Generates passwords that contain at least one uppercase letter, lowercase
/// letter, digit and special symbol, in a uniformly shuffled order.
///
/// The random source is owned by the generator. Production code uses the
/// operating system CSPRNG through [`PasswordGenerator::new`]; any other
/// `CryptoRng` (for example a seeded ChaCha) can be injected with
/// [`PasswordGenerator::with_rng`].
pub struct PasswordGenerator<R = OsRng> {
    rng: R,
    union: Vec<u8>,
}

impl PasswordGenerator<OsRng> {
    pub fn new() -> Self {
        Self::with_rng(OsRng)
    }
}

impl Default for PasswordGenerator<OsRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RngCore + CryptoRng> PasswordGenerator<R> {
    pub fn with_rng(rng: R) -> Self {
        PasswordGenerator {
            rng,
            union: charset::union_alphabet(),
        }
    }

    /// Generate a password of exactly `length` characters.
    ///
    /// Lengths outside [`MIN_LENGTH`]..=[`MAX_LENGTH`] are rejected before
    /// any randomness is drawn.
    pub fn generate(&mut self, length: usize) -> Result<String> {
        if length < MIN_LENGTH {
            return Err(GeneratorError::InvalidLength {
                length,
                min: MIN_LENGTH,
            });
        }
        if length > MAX_LENGTH {
            return Err(GeneratorError::TooLong {
                length,
                max: MAX_LENGTH,
            });
        }

        let mut chars = Vec::with_capacity(length);

        // One guaranteed character per class, always drawn in the same order
        for class in CLASSES.iter() {
            chars.push(pick(&mut self.rng, class.alphabet));
        }

        // Uniform over the union, not weighted by class
        for _ in MIN_LENGTH..length {
            chars.push(pick(&mut self.rng, &self.union));
        }

        chars.shuffle(&mut self.rng);

        // Every alphabet is ASCII, so each byte is one char
        Ok(chars.into_iter().map(char::from).collect())
    }

    pub fn generate_default(&mut self) -> Result<String> {
        self.generate(DEFAULT_LENGTH)
    }
}

fn pick<R: Rng + ?Sized>(rng: &mut R, alphabet: &[u8]) -> u8 {
    alphabet[rng.gen_range(0..alphabet.len())]
}

/// Generate a password from the operating system random source.
pub fn generate_secure_password(length: usize) -> Result<String> {
    PasswordGenerator::new().generate(length)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::charset::{classify, covers_all_classes, ClassKind};
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;
    use std::collections::HashMap;

    fn seeded(seed: u64) -> PasswordGenerator<ChaCha20Rng> {
        PasswordGenerator::with_rng(ChaCha20Rng::seed_from_u64(seed))
    }

    #[test]
    fn test_generate_exact_length() {
        let mut generator = seeded(1);
        for length in [4, 5, 12, 16, 64, MAX_LENGTH] {
            let password = generator.generate(length).unwrap();
            assert_eq!(password.chars().count(), length);
        }
    }

    #[test]
    fn test_generate_default_length() {
        let password = seeded(2).generate_default().unwrap();
        assert_eq!(password.len(), DEFAULT_LENGTH);
    }

    #[test]
    fn test_every_password_covers_all_classes() {
        let mut generator = seeded(3);
        for i in 0..2_000 {
            let length = MIN_LENGTH + i % 20;
            let password = generator.generate(length).unwrap();
            assert!(covers_all_classes(&password), "missing a class: {password}");
        }
    }

    #[test]
    fn test_only_known_characters() {
        let mut generator = seeded(4);
        for _ in 0..1_000 {
            let password = generator.generate(32).unwrap();
            assert!(password.chars().all(|c| classify(c).is_some()), "{password}");
        }
    }

    #[test]
    fn test_minimum_length_has_one_of_each_class() {
        let mut generator = seeded(5);
        for _ in 0..500 {
            let password = generator.generate(4).unwrap();
            let mut kinds: Vec<ClassKind> = password.chars().filter_map(classify).collect();
            kinds.sort_by_key(|k| *k as u8);
            assert_eq!(
                kinds,
                vec![
                    ClassKind::Uppercase,
                    ClassKind::Lowercase,
                    ClassKind::Digit,
                    ClassKind::Special
                ]
            );
        }
    }

    #[test]
    fn test_minimum_length_is_shuffled() {
        // Without the shuffle the first character would always be uppercase
        let mut generator = seeded(6);
        let first_kinds: std::collections::HashSet<ClassKind> = (0..200)
            .map(|_| generator.generate(4).unwrap())
            .filter_map(|p| p.chars().next().and_then(classify))
            .collect();
        assert_eq!(first_kinds.len(), 4);
    }

    #[test]
    fn test_short_lengths_are_rejected() {
        let mut generator = seeded(7);
        for length in 0..MIN_LENGTH {
            assert_eq!(
                generator.generate(length),
                Err(GeneratorError::InvalidLength { length, min: 4 })
            );
        }
    }

    #[test]
    fn test_long_lengths_are_rejected() {
        let mut generator = seeded(10);
        for length in [MAX_LENGTH + 1, 1 << 40, usize::MAX] {
            assert_eq!(
                generator.generate(length),
                Err(GeneratorError::TooLong { length, max: MAX_LENGTH })
            );
        }
    }

    #[test]
    fn test_rejection_consumes_no_randomness() {
        let mut rejected_first = seeded(8);
        assert!(rejected_first.generate(3).is_err());
        assert!(rejected_first.generate(0).is_err());
        assert!(rejected_first.generate(usize::MAX).is_err());

        let mut fresh = seeded(8);
        assert_eq!(
            rejected_first.generate(12).unwrap(),
            fresh.generate(12).unwrap()
        );
    }

    #[test]
    fn test_same_seed_same_password() {
        assert_eq!(
            seeded(42).generate(20).unwrap(),
            seeded(42).generate(20).unwrap()
        );
        assert_ne!(
            seeded(42).generate(20).unwrap(),
            seeded(43).generate(20).unwrap()
        );
    }

    #[test]
    fn test_consecutive_os_passwords_differ() {
        let first = generate_secure_password(12).unwrap();
        let second = generate_secure_password(12).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_positions_have_no_class_bias() {
        const RUNS: usize = 10_000;
        const LENGTH: usize = 12;

        let mut generator = seeded(9);
        let mut counts: Vec<HashMap<ClassKind, usize>> = vec![HashMap::new(); LENGTH];
        for _ in 0..RUNS {
            let password = generator.generate(LENGTH).unwrap();
            for (position, c) in password.chars().enumerate() {
                let kind = classify(c).unwrap();
                *counts[position].entry(kind).or_default() += 1;
            }
        }

        // One guaranteed character per class plus eight uniform draws from
        // the 65-character union, spread evenly across all twelve positions
        let fill = (LENGTH - MIN_LENGTH) as f64;
        let expected = |size: usize| (1.0 + fill * size as f64 / 65.0) / LENGTH as f64;
        let expectations = [
            (ClassKind::Uppercase, expected(24)),
            (ClassKind::Lowercase, expected(25)),
            (ClassKind::Digit, expected(8)),
            (ClassKind::Special, expected(8)),
        ];

        for (position, per_class) in counts.iter().enumerate() {
            for (kind, want) in expectations {
                let seen = *per_class.get(&kind).unwrap_or(&0) as f64 / RUNS as f64;
                assert!(
                    (seen - want).abs() < 0.03,
                    "position {position} {kind}: saw {seen:.4}, expected {want:.4}"
                );
            }
        }
    }
}

// src/crypto.rs
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use std::collections::HashSet;
use thiserror::Error;

use crate::generators::charset::{DIGITS, LOWERCASE, SPECIAL, UPPERCASE};

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Argon2 error: {0}")]
    Argon2Error(String),

    #[error("Hashing error: {0}")]
    HashingError(String),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),
}

pub type Result<T> = std::result::Result<T, CryptoError>;

/// Argon2id cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    pub memory_cost: u32,
    pub time_cost: u32,
    pub parallelism: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            memory_cost: 65536, // 64 MB
            time_cost: 3,
            parallelism: 4,
        }
    }
}

fn argon2(params: &KdfParams) -> Result<Argon2<'static>> {
    let params = Params::new(params.memory_cost, params.time_cost, params.parallelism, None)
        .map_err(|e| CryptoError::Argon2Error(e.to_string()))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hash a secret with Argon2id and a fresh salt, returning the PHC string.
pub fn hash_password(password: &str, params: &KdfParams) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = argon2(params)?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| CryptoError::HashingError(e.to_string()))?;
    Ok(hash.to_string())
}

/// Check a candidate against a stored PHC string.
///
/// The cost parameters are read from the stored hash, so hashes made with
/// older settings still verify.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| CryptoError::InvalidFormat(e.to_string()))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(CryptoError::Argon2Error(e.to_string())),
    }
}

pub fn analyze_password_strength(password: &str) -> u8 {
    let length = password.chars().count();

    // Length contribution (up to 40 points)
    let mut score = length.min(40) as i32;

    // Character variety (15 points per class)
    for class in [UPPERCASE, LOWERCASE, DIGITS, SPECIAL] {
        if password.chars().any(|c| class.contains(c)) {
            score += 15;
        }
    }

    // Repeated characters
    if length > 0 && password.chars().collect::<HashSet<_>>().len() < length / 2 {
        score -= 10;
    }

    score.clamp(0, 100) as u8
}

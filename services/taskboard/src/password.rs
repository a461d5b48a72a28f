//! Password hashing with Argon2
//!
//! Hashes are stored as PHC strings, so the algorithm, parameters and the
//! random salt travel with the hash itself.

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use std::sync::OnceLock;
use thiserror::Error;

static DUMMY_HASH: OnceLock<Option<String>> = OnceLock::new();

/// Error type for password hashing operations
#[derive(Debug, Error)]
pub enum PasswordError {
    /// Failed to hash password
    #[error("Failed to hash password: {0}")]
    Hash(String),

    /// Stored hash could not be parsed
    #[error("Invalid password hash format: {0}")]
    InvalidHash(String),
}

/// Hash a plain-text password with a freshly generated salt
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::Hash(e.to_string()))
}

/// Check a plain-text password against a stored PHC hash
///
/// A mismatch is `Ok(false)`; only a malformed hash is an error.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, PasswordError> {
    let parsed_hash =
        PasswordHash::new(password_hash).map_err(|e| PasswordError::InvalidHash(e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Spend the cost of one verification without a stored hash
///
/// Called when the account does not exist, so that an unknown username takes
/// as long to reject as a wrong password.
pub fn verify_dummy(password: &str) {
    let dummy = DUMMY_HASH.get_or_init(|| hash_password("taskboard-dummy-password").ok());
    if let Some(hash) = dummy.as_deref() {
        std::hint::black_box(verify_password(password, hash).ok());
    }
}

//! Password hashing and verification.
//!
//! Wraps Argon2 with fresh per-call salts. Hashes are non-deterministic for
//! identical input, so callers must never compare hashes for equality; the
//! only supported check is [`verify`].

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::error::{UserError, UserResult};

/// Hash a password with a freshly generated random salt.
///
/// The work factor is the fixed Argon2id default parameter set; it never
/// varies per call.
pub fn hash(password: &str) -> UserResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| UserError::Credential(e.to_string()))
}

/// Verify a candidate password against a stored hash.
///
/// A wrong password is `Ok(false)`, never an error. Errors only when the
/// stored hash string cannot be parsed.
pub fn verify(candidate: &str, hash: &str) -> UserResult<bool> {
    let parsed_hash = PasswordHash::new(hash).map_err(|e| UserError::Credential(e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(candidate.as_bytes(), &parsed_hash)
        .is_ok())
}

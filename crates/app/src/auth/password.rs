//! Password hashing and verification.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::auth::AuthServiceError;

/// Hash a plain-text password with Argon2id, producing a PHC string.
///
/// # Errors
///
/// Returns an error when the hashing operation itself fails.
pub fn hash_password(password: &str) -> Result<String, AuthServiceError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(AuthServiceError::Hash)
}

/// Verify a plain-text password against a stored PHC hash string.
///
/// # Errors
///
/// Returns an error when the stored hash cannot be parsed or the
/// verification itself fails; a non-matching password is `Ok(false)`.
pub fn verify_password(hash: &str, password: &str) -> Result<bool, AuthServiceError> {
    let parsed = PasswordHash::new(hash).map_err(AuthServiceError::Hash)?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(error) => Err(AuthServiceError::Hash(error)),
    }
}

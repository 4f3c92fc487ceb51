//! Admin passwords, stored as Argon2id PHC strings.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use folio_core::error::CoreError;

use crate::error::{AppError, AppResult};

/// Shortest bootstrap password accepted, in characters.
pub const MIN_LENGTH: usize = 8;

/// Hash with a fresh random salt.
pub fn hash(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|phc| phc.to_string())
        .map_err(|e| internal("hash", e))
}

/// Whether `password` matches `stored`. A stored value that is not a PHC
/// string is an internal error, not a mismatch.
pub fn matches(password: &str, stored: &str) -> AppResult<bool> {
    let parsed = PasswordHash::new(stored).map_err(|e| internal("parse stored", e))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(internal("verify", e)),
    }
}

pub fn check_length(password: &str) -> Result<(), CoreError> {
    if password.chars().count() < MIN_LENGTH {
        return Err(CoreError::Validation(format!(
            "Admin password must be at least {MIN_LENGTH} characters"
        )));
    }
    Ok(())
}

fn internal(step: &str, e: password_hash::Error) -> AppError {
    AppError::InternalError(format!("Could not {step} password: {e}"))
}

//! Password hashing using Argon2.

use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher as Argon2PasswordHasher, PasswordVerifier, SaltString,
        rand_core::OsRng,
    },
};
use serde_json::json;

use crate::error::AppError;

/// Hashes and verifies member passwords.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hashes a password into a PHC string.
    fn hash(&self, password: &str) -> Result<String, AppError>;

    /// Verifies a password against a stored hash. Malformed hashes never verify.
    fn verify(&self, password: &str, hash: &str) -> bool;
}

/// Argon2id hasher with default parameters.
#[derive(Debug, Clone, Default)]
pub struct Argon2Hasher;

impl Argon2Hasher {
    pub fn new() -> Self {
        Self
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| {
                AppError::internal("Failed to hash password", json!({ "reason": e.to_string() }))
            })
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(hash) else {
            return false;
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

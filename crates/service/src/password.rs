//! Argon2id password hashing.
//!
//! Only the PHC-format hash is stored; it embeds algorithm parameters and a
//! per-password random salt. Nothing in this service verifies passwords.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHasher, SaltString};
use argon2::Argon2;

/// Hash `password` with Argon2id and a fresh salt, in PHC string form.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string())
}

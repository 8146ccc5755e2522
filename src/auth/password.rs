use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::error;

/// Hashes a plaintext password with a fresh random salt. The encoded
/// string carries the algorithm parameters, so verification needs no
/// extra configuration.
pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hashed = Argon2::default().hash_password(plain.as_bytes(), &salt).map_err(|e| {
        error!(error = %e, "password hashing failed");
        anyhow::anyhow!(e.to_string())
    })?;
    Ok(hashed.to_string())
}

/// `Ok(false)` means a well-formed hash that does not match; a hash
/// that cannot even be parsed is an error, since it points at data
/// corruption rather than a wrong password.
pub fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "stored password hash is unparseable");
        anyhow::anyhow!(e.to_string())
    })?;
    Ok(Argon2::default().verify_password(plain.as_bytes(), &parsed).is_ok())
}

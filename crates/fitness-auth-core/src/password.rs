//! bcrypt password hashing
//!
//! bcrypt is CPU bound, so both operations run on the blocking pool.

use crate::AuthError;

/// Work factor used for new hashes
pub const BCRYPT_COST: u32 = 10;

/// Minimum accepted password length, in characters
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Hash a plaintext password
pub async fn hash_password(plain: &str) -> Result<String, AuthError> {
    let plain = plain.to_owned();
    tokio::task::spawn_blocking(move || bcrypt::hash(plain, BCRYPT_COST))
        .await
        .map_err(|e| AuthError::Internal(e.to_string()))?
        .map_err(|e| AuthError::Hashing(e.to_string()))
}

/// Compare a plaintext password against a stored hash
///
/// A stored value that is not a valid bcrypt hash counts as a mismatch.
pub async fn verify_password(plain: &str, hash: &str) -> Result<bool, AuthError> {
    let plain = plain.to_owned();
    let hash = hash.to_owned();
    let outcome = tokio::task::spawn_blocking(move || bcrypt::verify(plain, &hash))
        .await
        .map_err(|e| AuthError::Internal(e.to_string()))?;

    match outcome {
        Ok(valid) => Ok(valid),
        Err(e) => {
            tracing::warn!("Stored password hash unreadable: {}", e);
            Ok(false)
        }
    }
}

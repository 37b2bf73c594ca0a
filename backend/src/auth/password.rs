//! Password hashing using bcrypt
//!
//! Provides secure password hashing and verification.
//!
//! # Performance Considerations
//!
//! bcrypt is intentionally CPU-intensive. In async contexts use the
//! `*_async` variants, which run on the blocking thread pool.

use anyhow::Result;
use bcrypt::DEFAULT_COST;

/// bcrypt only consumes the first 72 bytes of input; anything beyond is
/// ignored. Truncation is applied explicitly on both hash and verify so
/// the behavior is identical regardless of crate internals.
const MAX_PASSWORD_BYTES: usize = 72;

/// Password hashing service
///
/// Uses bcrypt with a per-call random salt: hashing the same password
/// twice yields different digests that both verify.
pub struct PasswordService;

impl PasswordService {
    fn truncate(password: &str) -> &[u8] {
        let bytes = password.as_bytes();
        &bytes[..bytes.len().min(MAX_PASSWORD_BYTES)]
    }

    /// Hash a password using bcrypt (blocking operation)
    pub fn hash(password: &str) -> Result<String> {
        bcrypt::hash(Self::truncate(password), DEFAULT_COST)
            .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))
    }

    /// Hash a password asynchronously (non-blocking)
    ///
    /// Spawns the CPU-intensive work on a blocking thread pool,
    /// preventing it from blocking the async runtime.
    pub async fn hash_async(password: String) -> Result<String> {
        tokio::task::spawn_blocking(move || Self::hash(&password))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }

    /// Verify a password against a digest (blocking operation)
    ///
    /// A malformed digest (e.g. corrupted storage) verifies as `false`,
    /// never as an error. The comparison inside bcrypt is constant-time
    /// with respect to where a mismatch occurs.
    pub fn verify(password: &str, digest: &str) -> bool {
        bcrypt::verify(Self::truncate(password), digest).unwrap_or(false)
    }

    /// Verify a password asynchronously (non-blocking)
    pub async fn verify_async(password: String, digest: String) -> Result<bool> {
        tokio::task::spawn_blocking(move || Self::verify(&password, &digest))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let password = "secure_password_123";
        let hash = PasswordService::hash(password).unwrap();

        assert!(PasswordService::verify(password, &hash));
        assert!(!PasswordService::verify("wrong_password", &hash));
    }

    #[test]
    fn test_different_hashes_for_same_password() {
        let password = "test_password";
        let hash1 = PasswordService::hash(password).unwrap();
        let hash2 = PasswordService::hash(password).unwrap();

        // Hashes should be different due to random salt
        assert_ne!(hash1, hash2);

        // But both should verify correctly
        assert!(PasswordService::verify(password, &hash1));
        assert!(PasswordService::verify(password, &hash2));
    }

    #[test]
    fn test_truncation_at_72_bytes() {
        let long: String = "x".repeat(100);
        let truncated: String = "x".repeat(72);
        let hash = PasswordService::hash(&long).unwrap();

        // Hashing/verifying only the first 72 bytes is equivalent
        assert!(PasswordService::verify(&truncated, &hash));

        // Passwords differing only past byte 72 are equivalent
        let mut other = truncated.clone();
        other.push_str("something-else-entirely");
        assert!(PasswordService::verify(&other, &hash));

        // Differences within the first 72 bytes still matter
        assert!(!PasswordService::verify(&"y".repeat(100), &hash));
    }

    #[test]
    fn test_malformed_digest_verifies_false() {
        assert!(!PasswordService::verify("password", "not-a-bcrypt-digest"));
        assert!(!PasswordService::verify("password", ""));
    }

    #[tokio::test]
    async fn test_async_hash_and_verify() {
        let password = "async_test_password".to_string();
        let hash = PasswordService::hash_async(password.clone()).await.unwrap();

        assert!(PasswordService::verify_async(password.clone(), hash.clone())
            .await
            .unwrap());
        assert!(!PasswordService::verify_async("wrong".to_string(), hash)
            .await
            .unwrap());
    }
}

//! Password hashing and verification utilities
//!
//! New credentials are hashed with Argon2id. Verification is polymorphic
//! over the two credential-storage variants still present in migrated data:
//! PHC-encoded hashes (leading `$`) are verified with Argon2, anything else
//! is compared as legacy plaintext. The plaintext path is a migration
//! compatibility shim; `AuthService` rehashes such rows on first login.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::{debug, warn};

use crate::utils::errors::{AidtrackError, Result};

/// Marker distinguishing a PHC-encoded hash from a legacy plaintext value.
const HASH_MARKER: char = '$';

/// Hash a password with Argon2id and a fresh random salt.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(OsRng);
    let argon2 = Argon2::default();
    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| AidtrackError::PasswordHash(err.to_string()))
}

/// Whether the stored credential is a recognized hash rather than
/// legacy plaintext.
pub fn is_hashed(stored: &str) -> bool {
    stored.starts_with(HASH_MARKER)
}

/// Verify a password against a stored credential of either variant.
///
/// A malformed hash or a failed verification both come back `false`; the
/// caller reports the same generic error either way so usernames cannot be
/// enumerated through error shapes.
pub fn verify_password_compat(password: &str, stored: &str) -> bool {
    if is_hashed(stored) {
        match PasswordHash::new(stored) {
            Ok(parsed) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(err) => {
                warn!(error = %err, "stored credential has an unparseable hash format");
                false
            }
        }
    } else {
        debug!("verifying against a legacy plaintext credential");
        stored == password
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_are_phc_encoded() {
        let hash = hash_password("correct horse").unwrap();
        assert!(is_hashed(&hash));
        assert!(hash.starts_with("$argon2"));
    }

    #[test]
    fn hashed_credential_verifies_round_trip() {
        let hash = hash_password("secret123").unwrap();
        assert!(verify_password_compat("secret123", &hash));
        assert!(!verify_password_compat("secret124", &hash));
    }

    #[test]
    fn legacy_plaintext_credential_verifies_by_equality() {
        assert!(verify_password_compat("letmein", "letmein"));
        assert!(!verify_password_compat("letmein", "letmeout"));
    }

    #[test]
    fn same_plaintext_authenticates_against_both_storage_variants() {
        let hashed = hash_password("rescue-1").unwrap();
        assert!(verify_password_compat("rescue-1", &hashed));
        assert!(verify_password_compat("rescue-1", "rescue-1"));
    }

    #[test]
    fn garbage_hash_marker_fails_closed() {
        assert!(!verify_password_compat("anything", "$not-a-real-hash"));
    }
}

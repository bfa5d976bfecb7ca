//! Salted password hashing and constant-time verification.
//!
//! Stored form is `base64(salt) $ base64(sha256(salt || password))`.
//! Verification recomputes the digest with the stored salt and compares
//! with `constant_time_eq` so timing does not leak where the first
//! mismatching byte is. Clear-text passwords are never persisted.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use rand::RngCore;
use sha2::{Digest, Sha256};

/// Salt length in bytes.
const SALT_LEN: usize = 16;

/// Separator between the salt and digest fields of the stored form.
const SEPARATOR: char = '$';

/// Hash a password with a fresh random salt.
#[must_use]
pub fn hash_password(password: &str) -> String {
    let mut salt = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt);

    let digest = digest_with_salt(&salt, password);
    format!(
        "{}{SEPARATOR}{}",
        BASE64.encode(salt),
        BASE64.encode(digest)
    )
}

/// Verify a password against a stored hash.
///
/// Returns `false` for a malformed stored value rather than erroring:
/// a record that cannot be parsed can never authenticate anyone.
#[must_use]
pub fn verify_password(password: &str, stored: &str) -> bool {
    let Some((salt_b64, digest_b64)) = stored.split_once(SEPARATOR) else {
        return false;
    };
    let (Ok(salt), Ok(expected)) = (BASE64.decode(salt_b64), BASE64.decode(digest_b64)) else {
        return false;
    };

    let actual = digest_with_salt(&salt, password);
    constant_time_eq::constant_time_eq(&actual, &expected)
}

fn digest_with_salt(salt: &[u8], password: &str) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hasher.finalize().to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_the_original_password() {
        let stored = hash_password("s3cret");
        assert!(verify_password("s3cret", &stored));
        assert!(!verify_password("s3cret ", &stored));
        assert!(!verify_password("wrong", &stored));
    }

    #[test]
    fn same_password_hashes_differently() {
        // Salting: equal passwords must not produce equal stored values.
        let a = hash_password("password");
        let b = hash_password("password");
        assert_ne!(a, b);
        assert!(verify_password("password", &a));
        assert!(verify_password("password", &b));
    }

    #[test]
    fn malformed_stored_values_never_verify() {
        assert!(!verify_password("anything", ""));
        assert!(!verify_password("anything", "no-separator"));
        assert!(!verify_password("anything", "!!!$???"));
    }
}

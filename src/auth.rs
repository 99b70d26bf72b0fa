use std::num::NonZeroU32;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use ring::rand::{SecureRandom, SystemRandom};
use ring::{digest, pbkdf2};
use thiserror::Error;

const SALT_LEN: usize = 16;
const DIGEST_LEN: usize = digest::SHA256_OUTPUT_LEN;

const PBKDF2_ITERATIONS: NonZeroU32 = match NonZeroU32::new(100_000) {
    Some(n) => n,
    None => panic!("iteration count must be nonzero"),
};

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("system random number generator failed")]
    Rng,
}

/// Hash a password with PBKDF2-HMAC-SHA256 and a fresh random salt.
///
/// The result is stored as `base64(salt)$base64(digest)`, so records never
/// hold the plaintext account password.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let rng = SystemRandom::new();
    let mut salt = [0u8; SALT_LEN];
    rng.fill(&mut salt).map_err(|_| PasswordError::Rng)?;

    let mut derived = [0u8; DIGEST_LEN];
    pbkdf2::derive(
        pbkdf2::PBKDF2_HMAC_SHA256,
        PBKDF2_ITERATIONS,
        &salt,
        password.as_bytes(),
        &mut derived,
    );

    Ok(format!("{}${}", BASE64.encode(salt), BASE64.encode(derived)))
}

/// Check a candidate password against a stored `salt$digest` value.
///
/// Any malformed stored value fails verification rather than erroring.
/// The digest comparison itself is constant time.
pub fn verify_password(stored: &str, candidate: &str) -> bool {
    let (salt_b64, digest_b64) = match stored.split_once('$') {
        Some(parts) => parts,
        None => return false,
    };

    let salt = match BASE64.decode(salt_b64) {
        Ok(salt) => salt,
        Err(_) => return false,
    };
    let expected = match BASE64.decode(digest_b64) {
        Ok(digest) => digest,
        Err(_) => return false,
    };

    pbkdf2::verify(
        pbkdf2::PBKDF2_HMAC_SHA256,
        PBKDF2_ITERATIONS,
        &salt,
        candidate.as_bytes(),
        &expected,
    )
    .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trip() {
        let stored = hash_password("hunter2").unwrap();
        assert!(verify_password(&stored, "hunter2"));
    }

    #[test]
    fn wrong_password_is_rejected() {
        let stored = hash_password("hunter2").unwrap();
        assert!(!verify_password(&stored, "hunter3"));
        assert!(!verify_password(&stored, ""));
    }

    #[test]
    fn malformed_stored_values_are_rejected() {
        assert!(!verify_password("", "hunter2"));
        assert!(!verify_password("no-separator", "hunter2"));
        assert!(!verify_password("!!!$???", "hunter2"));
    }

    #[test]
    fn salting_makes_hashes_differ() {
        let first = hash_password("hunter2").unwrap();
        let second = hash_password("hunter2").unwrap();
        assert_ne!(first, second);
        assert!(verify_password(&first, "hunter2"));
        assert!(verify_password(&second, "hunter2"));
    }
}

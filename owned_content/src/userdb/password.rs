//! PBKDF2-HMAC-SHA256 password hashing.
//!
//! Hashes are stored as `pbkdf2_sha256$<iterations>$<salt>$<hash>` with the
//! salt and hash base64url encoded, so the iteration count can be raised
//! without invalidating existing accounts.

use std::num::NonZeroU32;
use std::{env, sync::LazyLock};

use ring::pbkdf2;

use crate::userdb::errors::UserError;
use crate::utils::{base64url_decode, base64url_encode, gen_random_bytes};

const ALGORITHM_TAG: &str = "pbkdf2_sha256";
const SALT_LEN: usize = 16;
const HASH_LEN: usize = 32;
const DEFAULT_ITERATIONS: u32 = 100_000;

static PASSWORD_HASH_ITERATIONS: LazyLock<NonZeroU32> = LazyLock::new(|| {
    env::var("PASSWORD_HASH_ITERATIONS")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .and_then(NonZeroU32::new)
        .or(NonZeroU32::new(DEFAULT_ITERATIONS))
        .unwrap_or(NonZeroU32::MIN)
});

pub(crate) fn hash_password(password: &str) -> Result<String, UserError> {
    let salt = gen_random_bytes(SALT_LEN).map_err(|e| UserError::Crypto(e.to_string()))?;
    let iterations = *PASSWORD_HASH_ITERATIONS;

    let mut hash = [0u8; HASH_LEN];
    pbkdf2::derive(
        pbkdf2::PBKDF2_HMAC_SHA256,
        iterations,
        &salt,
        password.as_bytes(),
        &mut hash,
    );

    Ok(format!(
        "{ALGORITHM_TAG}${iterations}${}${}",
        base64url_encode(&salt),
        base64url_encode(&hash)
    ))
}

/// Returns false for a wrong password as well as for a malformed stored hash.
pub(crate) fn verify_password(password: &str, encoded: &str) -> bool {
    let mut parts = encoded.split('$');
    let (Some(ALGORITHM_TAG), Some(iterations), Some(salt), Some(hash), None) = (
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
    ) else {
        tracing::warn!("Stored password hash has an unexpected format");
        return false;
    };

    let Some(iterations) = iterations.parse::<u32>().ok().and_then(NonZeroU32::new) else {
        return false;
    };
    let (Ok(salt), Ok(hash)) = (base64url_decode(salt), base64url_decode(hash)) else {
        return false;
    };

    pbkdf2::verify(
        pbkdf2::PBKDF2_HMAC_SHA256,
        iterations,
        &salt,
        password.as_bytes(),
        &hash,
    )
    .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let encoded = hash_password("correct horse").unwrap();

        assert!(encoded.starts_with("pbkdf2_sha256$"));
        assert!(verify_password("correct horse", &encoded));
        assert!(!verify_password("wrong horse", &encoded));
    }

    #[test]
    fn test_same_password_gets_distinct_salts() {
        let a = hash_password("secret").unwrap();
        let b = hash_password("secret").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_verify_rejects_malformed_hashes() {
        assert!(!verify_password("secret", ""));
        assert!(!verify_password("secret", "md5$1$abc$def"));
        assert!(!verify_password("secret", "pbkdf2_sha256$zero$abc$def"));
        assert!(!verify_password("secret", "pbkdf2_sha256$0$abc$def"));
        assert!(!verify_password("secret", "pbkdf2_sha256$1$abc$def$extra"));
        assert!(!verify_password("secret", "pbkdf2_sha256$1$!!!$def"));
    }

    #[test]
    fn test_verify_honours_stored_iterations() {
        let salt = b"0123456789abcdef";
        let mut hash = [0u8; HASH_LEN];
        pbkdf2::derive(
            pbkdf2::PBKDF2_HMAC_SHA256,
            NonZeroU32::new(3).unwrap(),
            salt,
            b"pw",
            &mut hash,
        );
        let encoded = format!(
            "pbkdf2_sha256$3${}${}",
            base64url_encode(salt),
            base64url_encode(&hash)
        );

        assert!(verify_password("pw", &encoded));
    }
}

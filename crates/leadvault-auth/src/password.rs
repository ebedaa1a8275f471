//! Password hashing scheme.
//!
//! Hashes are salted, iterated SHA-256 rendered in a self-describing encoded
//! form:
//!
//! ```text
//! sha256$<iterations>$<salt-hex>$<digest-hex>
//! ```
//!
//! Each credential gets a fresh random 16-byte salt, and verification reads
//! the iteration count back out of the encoded string, so stored hashes
//! survive a change of the default work factor.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Salt length in bytes.
const SALT_LEN: usize = 16;

/// Digest length in bytes (SHA-256).
const DIGEST_LEN: usize = 32;

/// Encoded-form prefix naming the digest algorithm.
const ALGORITHM: &str = "sha256";

/// Password hashing scheme with a configurable work factor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PasswordScheme {
    iterations: u32,
}

impl PasswordScheme {
    /// Default work factor.
    pub const DEFAULT: Self = Self {
        iterations: 100_000,
    };

    /// Scheme with an explicit iteration count. Must be at least 1.
    pub const fn new(iterations: u32) -> Self {
        assert!(iterations >= 1);
        Self { iterations }
    }

    /// Hash a password with a fresh random salt.
    pub fn hash(&self, password: &str) -> String {
        let salt: [u8; SALT_LEN] = rand::random();
        self.hash_with_salt(password, &salt)
    }

    /// Hash a password with a caller-supplied salt.
    ///
    /// Deterministic for a given (password, salt, iterations) triple.
    pub fn hash_with_salt(&self, password: &str, salt: &[u8; SALT_LEN]) -> String {
        let digest = derive(password, salt, self.iterations);
        format!(
            "{ALGORITHM}${}${}${}",
            self.iterations,
            hex::encode(salt),
            hex::encode(digest)
        )
    }

    /// Verify a password against an encoded hash.
    ///
    /// The salt and iteration count come from the encoding, not from this
    /// scheme. Malformed encodings verify as `false`, never as an error.
    /// Digest comparison is constant-time.
    pub fn verify(&self, password: &str, encoded: &str) -> bool {
        let Some((iterations, salt, expected)) = parse(encoded) else {
            return false;
        };
        let computed = derive(password, &salt, iterations);
        computed.ct_eq(&expected).into()
    }

    /// The configured iteration count.
    pub fn iterations(&self) -> u32 {
        self.iterations
    }
}

impl Default for PasswordScheme {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Iterated SHA-256 over `salt ‖ password`, chained digest-to-digest.
fn derive(password: &str, salt: &[u8; SALT_LEN], iterations: u32) -> [u8; DIGEST_LEN] {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    let mut digest: [u8; DIGEST_LEN] = hasher.finalize().into();
    for _ in 1..iterations {
        digest = Sha256::digest(digest).into();
    }
    digest
}

fn parse(encoded: &str) -> Option<(u32, [u8; SALT_LEN], [u8; DIGEST_LEN])> {
    let mut parts = encoded.split('$');
    if parts.next()? != ALGORITHM {
        return None;
    }
    let iterations: u32 = parts.next()?.parse().ok().filter(|&n| n >= 1)?;
    let salt: [u8; SALT_LEN] = hex::decode(parts.next()?).ok()?.try_into().ok()?;
    let digest: [u8; DIGEST_LEN] = hex::decode(parts.next()?).ok()?.try_into().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((iterations, salt, digest))
}

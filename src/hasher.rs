//! Password hashing built around Argon2id.
//!
//! [`PasswordHasher`] is the seam the rest of the crate hashes through; the
//! Argon2id implementation keeps its parameters in one place so every digest
//! is produced with the same cost.

use argon2::password_hash::SaltString;
use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher as _, PasswordVerifier, Version,
};
use rand::rngs::OsRng;

use crate::error::HashError;
use crate::logging::PolicyLog;

/// Argon2id memory cost in KiB.
const MEMORY_COST_KIB: u32 = 19 * 1024;
/// Argon2id iterations.
const TIME_COST: u32 = 3;
/// Argon2id lanes.
const PARALLELISM: u32 = 1;

/// Turns secret material into a self-describing digest and checks it later.
pub trait PasswordHasher {
    /// Hashes `secret` with a fresh random salt.
    ///
    /// # Errors
    ///
    /// Returns `HashError` on oversized input or an internal failure.
    fn hash(&self, secret: &[u8]) -> Result<String, HashError>;

    /// Returns whether `secret` produced `digest`.
    ///
    /// Malformed digests and mismatches both return `false`.
    fn verify(&self, digest: &str, secret: &[u8]) -> bool;
}

/// Argon2id hasher producing PHC strings.
///
/// # Examples
///
/// ```
/// use passgate::{Argon2Hasher, PasswordHasher};
///
/// let hasher = Argon2Hasher::with_params(1024, 1, 1).unwrap();
/// let digest = hasher.hash(b"correct horse").unwrap();
/// assert!(digest.starts_with("$argon2id$"));
/// assert!(hasher.verify(&digest, b"correct horse"));
/// assert!(!hasher.verify(&digest, b"battery staple"));
/// ```
#[derive(Debug, Clone)]
pub struct Argon2Hasher {
    params: Params,
}

impl Argon2Hasher {
    /// Creates a hasher with the default cost: 19 MiB, 3 iterations, 1 lane.
    ///
    /// # Errors
    ///
    /// Returns `HashError::Params` if the parameters are rejected.
    pub fn new() -> Result<Self, HashError> {
        Self::with_params(MEMORY_COST_KIB, TIME_COST, PARALLELISM)
    }

    /// Creates a hasher with explicit Argon2id costs.
    ///
    /// # Errors
    ///
    /// Returns `HashError::Params` if the parameters are out of range.
    pub fn with_params(
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
    ) -> Result<Self, HashError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| HashError::Params(format!("{e}")))?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, secret: &[u8]) -> Result<String, HashError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2()
            .hash_password(secret, &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| {
                PolicyLog::new("hash").warn(format_args!("argon2 hashing failed: {e}"));
                HashError::Hashing(format!("{e}"))
            })
    }

    fn verify(&self, digest: &str, secret: &[u8]) -> bool {
        let parsed = match PasswordHash::new(digest) {
            Ok(hash) => hash,
            Err(_) => return false,
        };
        self.argon2().verify_password(secret, &parsed).is_ok()
    }
}

use std::fmt;

use zeroize::{Zeroize, Zeroizing};

use crate::error::{Error, HashError};
use crate::hasher::PasswordHasher;
use crate::policy::Policy;

/// A plaintext password with an optional salt and pepper.
///
/// The material fed to the hasher is `plain + salt + pepper`, always in that
/// order, so a digest produced by [`hash`](Self::hash) only
/// [`matches`](Self::matches) a secret built with the same components. A
/// pepper can only be added together with a salt.
///
/// # Security Properties
///
/// - Does NOT implement `Clone`, `Deref`, `AsRef`, or `Borrow`
/// - Debug and Display output is always `[REDACTED]`
/// - All components are zeroed when the secret is dropped
/// - The plaintext is reachable only through [`expose_secret`](Self::expose_secret)
///
/// # Examples
///
/// ```
/// use passgate::Secret;
///
/// let secret = Secret::with_salt("hunter2", "NaCl");
/// assert_eq!(format!("{:?}", secret), "[REDACTED]");
/// assert_eq!(secret.expose_secret(), "hunter2");
/// assert_eq!(&*secret.material(), "hunter2NaCl");
/// ```
// Do NOT derive Clone or Debug: both would bypass redaction.
pub struct Secret {
    plain: String,
    salt: Option<String>,
    pepper: Option<String>,
}

impl Secret {
    /// Wraps a plaintext password with no salt or pepper.
    pub fn new(plain: impl Into<String>) -> Self {
        Self {
            plain: plain.into(),
            salt: None,
            pepper: None,
        }
    }

    /// Wraps a plaintext password with a salt.
    pub fn with_salt(plain: impl Into<String>, salt: impl Into<String>) -> Self {
        Self {
            plain: plain.into(),
            salt: Some(salt.into()),
            pepper: None,
        }
    }

    /// Wraps a plaintext password with a salt and a pepper.
    pub fn with_salt_and_pepper(
        plain: impl Into<String>,
        salt: impl Into<String>,
        pepper: impl Into<String>,
    ) -> Self {
        Self {
            plain: plain.into(),
            salt: Some(salt.into()),
            pepper: Some(pepper.into()),
        }
    }

    /// Explicitly exposes the plaintext password.
    ///
    /// Do not log or display the returned value.
    pub fn expose_secret(&self) -> &str {
        &self.plain
    }

    /// Returns whether a salt is attached.
    pub fn is_salted(&self) -> bool {
        self.salt.is_some()
    }

    /// Returns whether a pepper is attached.
    pub fn is_peppered(&self) -> bool {
        self.pepper.is_some()
    }

    /// The concatenated material handed to the hasher.
    ///
    /// The buffer is zeroed when dropped.
    pub fn material(&self) -> Zeroizing<String> {
        let extra = self.salt.as_deref().map_or(0, str::len)
            + self.pepper.as_deref().map_or(0, str::len);
        let mut material = Zeroizing::new(String::with_capacity(self.plain.len() + extra));
        material.push_str(&self.plain);
        if let Some(salt) = &self.salt {
            material.push_str(salt);
        }
        if let Some(pepper) = &self.pepper {
            material.push_str(pepper);
        }
        material
    }

    /// Validates the plaintext (without salt or pepper) against `policy`, or
    /// the default policy when `None`.
    ///
    /// # Errors
    ///
    /// See [`Policy::validate`].
    pub fn validate(&self, policy: Option<&Policy>) -> Result<(), Error> {
        crate::validate(&self.plain, policy)
    }

    /// Hashes the secret's material.
    ///
    /// # Errors
    ///
    /// Returns `HashError` if the hasher fails.
    pub fn hash<H: PasswordHasher + ?Sized>(&self, hasher: &H) -> Result<String, HashError> {
        hasher.hash(self.material().as_bytes())
    }

    /// Returns whether `digest` was produced from this secret's material.
    ///
    /// A mismatch is `false`, never an error.
    pub fn matches<H: PasswordHasher + ?Sized>(&self, hasher: &H, digest: &str) -> bool {
        hasher.verify(digest, self.material().as_bytes())
    }
}

impl Drop for Secret {
    fn drop(&mut self) {
        self.plain.zeroize();
        self.salt.zeroize();
        self.pepper.zeroize();
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

//! Composable password policies: validation, secure generation, and hashing.
//!
//! This crate provides:
//! - **Rules**: independent checks for length, per-class character minimums,
//!   and whitespace exclusion
//! - **Policies**: an optional composition of rules that is checked for
//!   internal consistency before use
//! - **Generation**: random passwords guaranteed to satisfy a policy, drawn
//!   from a cryptographically secure source
//! - **Secrets**: plaintext with an optional salt and pepper, hashed and
//!   matched through Argon2id
//!
//! # Core Types
//!
//! - [`Policy`]: Composed rule set with [`Policy::is_valid`] and [`Policy::validate`]
//! - [`LengthRule`], [`CharacterRule`], [`NoWhitespaceRule`]: Rule primitives
//! - [`Generator`]: Policy-compliant password synthesis
//! - [`Secret`]: Redacted plaintext plus salt/pepper layering
//! - [`Argon2Hasher`]: Default [`PasswordHasher`]
//!
//! # Examples
//!
//! ```
//! use passgate::{Argon2Hasher, Policy, Secret};
//!
//! // `None` means the default policy: 8-16 chars, one of each class, no spaces
//! let password = passgate::generate(None).expect("OS RNG available");
//! passgate::validate(&password, None).expect("generated passwords comply");
//!
//! let hasher = Argon2Hasher::with_params(1024, 1, 1).unwrap();
//! let secret = Secret::with_salt(password, "per-user-salt");
//! let digest = secret.hash(&hasher).unwrap();
//! assert!(secret.matches(&hasher, &digest));
//!
//! assert!(passgate::validate("", Some(&Policy::unrestricted())).is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod charset;
pub mod config;
mod error;
mod generator;
mod hasher;
mod logging;
mod policy;
pub mod rule;
mod secret;

pub use charset::{ALL, CharacterClass};
pub use error::{
    Conflict, ConflictKind, Error, GenerationError, HashError, Violation, ViolationKind,
};
pub use generator::{Generator, RandomSource, MAX_GENERATED_LENGTH};
pub use hasher::{Argon2Hasher, PasswordHasher};
pub use policy::Policy;
pub use rule::{CharacterRule, LengthRule, NoWhitespaceRule, Rule};
pub use secret::Secret;

/// Validates `password` against `policy`, or the default policy when `None`.
///
/// # Errors
///
/// See [`Policy::validate`].
pub fn validate(password: &str, policy: Option<&Policy>) -> Result<(), Error> {
    match policy {
        Some(policy) => policy.validate(password),
        None => Policy::default().validate(password),
    }
}

/// Generates a password for `policy`, or the default policy when `None`,
/// using the operating system's CSPRNG.
///
/// # Errors
///
/// See [`Generator::generate`].
pub fn generate(policy: Option<&Policy>) -> Result<String, Error> {
    Generator::new().generate(policy)
}

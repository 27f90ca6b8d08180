//! Policy configuration loaded from JSON.
//!
//! A missing rule key means the rule is not enforced:
//!
//! ```json
//! {
//!   "length": { "min": 8, "max": 16 },
//!   "character": { "minUppercase": 1, "minLowercase": 1, "minDigit": 1, "minSymbol": 1 },
//!   "noWhitespace": {}
//! }
//! ```
//!
//! Loaded policies are checked with [`Policy::is_valid`] so an inconsistent
//! file is rejected here rather than at first use.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::error::Conflict;
use crate::policy::Policy;

/// Errors raised while loading a policy configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("config file unreadable: {0}")]
    Io(String),
    /// The document is not a valid policy.
    #[error("config parse failed: {0}")]
    Parse(String),
    /// The policy parsed but its rules conflict.
    #[error("config describes an inconsistent policy: {0}")]
    Conflict(#[from] Conflict),
}

/// Parses a policy from a JSON document and checks it for consistency.
///
/// # Errors
///
/// - [`ConfigError::Parse`] if `json` is not a policy document
/// - [`ConfigError::Conflict`] if the parsed rules fail [`Policy::is_valid`]
pub fn parse_policy(json: &str) -> Result<Policy, ConfigError> {
    let policy: Policy =
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(format!("{e}")))?;
    policy.is_valid()?;
    Ok(policy)
}

/// Reads and parses a JSON policy file.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] if the file cannot be read, otherwise the
/// errors of [`parse_policy`].
pub fn load_policy(path: impl AsRef<Path>) -> Result<Policy, ConfigError> {
    let raw_json = fs::read_to_string(&path).map_err(|e| ConfigError::Io(format!("{e}")))?;
    parse_policy(&raw_json)
}

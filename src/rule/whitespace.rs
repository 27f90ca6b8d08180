use std::fmt;

use serde::{Deserialize, Serialize};

use super::Rule;
use crate::error::{Violation, ViolationKind};

/// Rejects passwords containing a space character.
///
/// The empty string contains no whitespace and passes this rule; emptiness is
/// checked separately by [`Policy::validate`](crate::Policy::validate).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoWhitespaceRule {}

impl NoWhitespaceRule {
    /// Creates the rule.
    pub fn new() -> Self {
        Self {}
    }
}

impl Rule for NoWhitespaceRule {
    fn validate(&self, password: &str) -> Result<(), Violation> {
        if password.contains(' ') {
            return Err(Violation::new(ViolationKind::Whitespace));
        }
        Ok(())
    }
}

impl fmt::Display for NoWhitespaceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("no whitespace")
    }
}

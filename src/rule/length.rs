use std::fmt;

use serde::{Deserialize, Serialize};

use super::Rule;
use crate::error::{Violation, ViolationKind};

/// Bounds on the number of characters in a password.
///
/// Length is counted in `char`s, not bytes, so multi-byte input is measured
/// the way a user would count it.
///
/// # Examples
///
/// ```
/// use passgate::{LengthRule, Rule};
///
/// let rule = LengthRule::new(4, 6);
/// assert!(rule.validate("ab€d").is_ok()); // 4 chars, 6 bytes
/// assert!(rule.validate("abc").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthRule {
    /// Minimum number of characters, inclusive.
    pub min: usize,
    /// Maximum number of characters, inclusive.
    pub max: usize,
}

impl LengthRule {
    /// Creates a length rule with inclusive bounds.
    pub fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }
}

impl Rule for LengthRule {
    fn validate(&self, password: &str) -> Result<(), Violation> {
        let actual = password.chars().count();
        if actual < self.min || actual > self.max {
            return Err(Violation::new(ViolationKind::Length {
                min: self.min,
                max: self.max,
                actual,
            }));
        }
        Ok(())
    }
}

impl fmt::Display for LengthRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "min: {}, max: {}", self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bounds_inclusive() {
        let rule = LengthRule::new(3, 5);
        assert!(rule.validate("abc").is_ok());
        assert!(rule.validate("abcd").is_ok());
        assert!(rule.validate("abcde").is_ok());
    }

    #[test]
    fn rejects_too_short() {
        let rule = LengthRule::new(3, 5);
        let err = rule.validate("ab").unwrap_err();
        assert_eq!(
            err.kind,
            ViolationKind::Length {
                min: 3,
                max: 5,
                actual: 2
            }
        );
    }

    #[test]
    fn rejects_too_long() {
        let rule = LengthRule::new(3, 5);
        let err = rule.validate("abcdef").unwrap_err();
        assert!(matches!(err.kind, ViolationKind::Length { actual: 6, .. }));
    }

    #[test]
    fn counts_chars_not_bytes() {
        let rule = LengthRule::new(1, 3);
        // 3 chars, 9 bytes
        assert!(rule.validate("日本語").is_ok());
        assert!(rule.validate("日本語!").is_err());
    }

    #[test]
    fn displays_bounds() {
        assert_eq!(LengthRule::new(8, 16).to_string(), "min: 8, max: 16");
    }
}

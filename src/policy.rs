use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Conflict, ConflictKind, Error, Violation};
use crate::logging::PolicyLog;
use crate::rule::{CharacterRule, LengthRule, NoWhitespaceRule, Rule};

/// A composed password policy.
///
/// Each rule is optional; `None` means that dimension is not enforced. A
/// policy must be internally consistent (see [`is_valid`](Self::is_valid))
/// before it can validate or generate passwords.
///
/// # Examples
///
/// ```
/// use passgate::{CharacterRule, LengthRule, NoWhitespaceRule, Policy};
///
/// let policy = Policy::new(
///     Some(LengthRule::new(10, 20)),
///     Some(CharacterRule::new(2, 2, 2, 1)),
///     Some(NoWhitespaceRule::new()),
/// )
/// .expect("rules are consistent");
///
/// assert!(policy.validate("AbCd12!xyz").is_ok());
/// assert!(policy.validate("short").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Policy {
    /// Character-count bounds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<LengthRule>,
    /// Per-class minimums.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character: Option<CharacterRule>,
    /// Whitespace exclusion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_whitespace: Option<NoWhitespaceRule>,
}

impl Policy {
    /// Builds a policy and checks it for consistency.
    ///
    /// # Errors
    ///
    /// Returns the first `Conflict` found by [`is_valid`](Self::is_valid).
    pub fn new(
        length: Option<LengthRule>,
        character: Option<CharacterRule>,
        no_whitespace: Option<NoWhitespaceRule>,
    ) -> Result<Self, Conflict> {
        let policy = Self {
            length,
            character,
            no_whitespace,
        };
        policy.is_valid()?;
        Ok(policy)
    }

    /// A policy that enforces nothing beyond non-emptiness.
    pub fn unrestricted() -> Self {
        Self {
            length: None,
            character: None,
            no_whitespace: None,
        }
    }

    /// Checks that the policy's rules can be satisfied together.
    ///
    /// Only combinations of present rules are checked; an absent rule never
    /// conflicts. Checks run in a fixed order and stop at the first conflict:
    ///
    /// 1. length `min` above `max`
    /// 2. character minimums whose sum overflows `usize`
    /// 3. a minimum length with a character rule that mandates nothing
    /// 4. mandated characters that cannot fit under the length `max`
    /// 5. whitespace exclusion with a character rule that mandates nothing
    ///
    /// # Errors
    ///
    /// Returns a `Conflict` naming the inconsistent combination.
    ///
    /// # Examples
    ///
    /// ```
    /// use passgate::{CharacterRule, ConflictKind, LengthRule, Policy};
    ///
    /// let policy = Policy {
    ///     length: Some(LengthRule::new(4, 8)),
    ///     character: Some(CharacterRule::new(3, 3, 3, 0)),
    ///     no_whitespace: None,
    /// };
    /// let conflict = policy.is_valid().unwrap_err();
    /// assert_eq!(
    ///     conflict.kind,
    ///     ConflictKind::MandatedExceedsMaxLength { mandated: 9, max_length: 8 }
    /// );
    /// ```
    pub fn is_valid(&self) -> Result<(), Conflict> {
        if let Some(length) = &self.length {
            if length.min > length.max {
                return Err(Conflict::new(ConflictKind::LengthBoundsInverted {
                    min: length.min,
                    max: length.max,
                }));
            }
        }

        if let Some(character) = &self.character {
            let Some(mandated) = character.sum() else {
                return Err(Conflict::new(ConflictKind::MandatedOverflow));
            };

            if let Some(length) = &self.length {
                if mandated == 0 && length.min > 0 {
                    return Err(Conflict::new(ConflictKind::NoMandatedCharacters {
                        min_length: length.min,
                    }));
                }
                if mandated > length.max {
                    return Err(Conflict::new(ConflictKind::MandatedExceedsMaxLength {
                        mandated,
                        max_length: length.max,
                    }));
                }
            }

            if self.no_whitespace.is_some() && mandated == 0 {
                return Err(Conflict::new(ConflictKind::WhitespaceOnlyPolicy));
            }
        }

        Ok(())
    }

    /// Checks a candidate password against this policy.
    ///
    /// The empty password is rejected before anything else. Then the policy
    /// itself must be consistent, and finally the rules run in order:
    /// whitespace, length, character classes. The first failure is returned.
    ///
    /// Validation is pure; repeated calls return the same result.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyPassword`] for `""`
    /// - [`Error::Conflict`] if the policy is inconsistent
    /// - [`Error::Violation`] for the first rule the password fails
    pub fn validate(&self, password: &str) -> Result<(), Error> {
        if password.is_empty() {
            return Err(Error::EmptyPassword);
        }

        let log = PolicyLog::new("validate");
        if let Err(conflict) = self.is_valid() {
            log.conflict(&conflict);
            return Err(conflict.into());
        }

        if let Err(violation) = self.check_rules(password) {
            log.violation(&violation);
            return Err(violation.into());
        }

        Ok(())
    }

    fn check_rules(&self, password: &str) -> Result<(), Violation> {
        if let Some(rule) = &self.no_whitespace {
            rule.validate(password)?;
        }
        if let Some(rule) = &self.length {
            rule.validate(password)?;
        }
        if let Some(rule) = &self.character {
            rule.validate(password)?;
        }
        Ok(())
    }

    /// Minimum generated length; zero when no length rule is set.
    pub(crate) fn min_length(&self) -> usize {
        self.length.map_or(0, |length| length.min)
    }
}

impl Default for Policy {
    /// Length 8 to 16, at least one of each character class, no whitespace.
    fn default() -> Self {
        Self {
            length: Some(LengthRule::new(8, 16)),
            character: Some(CharacterRule::new(1, 1, 1, 1)),
            no_whitespace: Some(NoWhitespaceRule::new()),
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(length) = &self.length {
            parts.push(format!("length({length})"));
        }
        if let Some(character) = &self.character {
            parts.push(format!("character({character})"));
        }
        if let Some(no_whitespace) = &self.no_whitespace {
            parts.push(no_whitespace.to_string());
        }
        if parts.is_empty() {
            f.write_str("unrestricted")
        } else {
            f.write_str(&parts.join("; "))
        }
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Rule;
use crate::charset::CharacterClass;
use crate::error::{Violation, ViolationKind};

/// Minimum number of characters required from each class.
///
/// Counts are multiset counts: `min_uppercase = 3` needs three uppercase
/// letters, not just one. Checks run uppercase, lowercase, digit, symbol and
/// stop at the first shortfall.
///
/// # Examples
///
/// ```
/// use passgate::{CharacterRule, Rule};
///
/// let rule = CharacterRule::new(2, 0, 0, 0);
/// assert!(rule.validate("AAb1!").is_ok());
///
/// let rule = CharacterRule::new(3, 0, 0, 0);
/// assert!(rule.validate("AAb1!").is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CharacterRule {
    /// Minimum uppercase letters.
    pub min_uppercase: usize,
    /// Minimum lowercase letters.
    pub min_lowercase: usize,
    /// Minimum digits.
    pub min_digit: usize,
    /// Minimum symbols.
    pub min_symbol: usize,
}

impl CharacterRule {
    /// Creates a rule from the four per-class minimums.
    pub fn new(
        min_uppercase: usize,
        min_lowercase: usize,
        min_digit: usize,
        min_symbol: usize,
    ) -> Self {
        Self {
            min_uppercase,
            min_lowercase,
            min_digit,
            min_symbol,
        }
    }

    /// Total number of mandated characters, or `None` if the minimums
    /// overflow `usize`.
    pub fn sum(&self) -> Option<usize> {
        self.min_uppercase
            .checked_add(self.min_lowercase)?
            .checked_add(self.min_digit)?
            .checked_add(self.min_symbol)
    }

    /// Configured minimum for `class`.
    pub fn min_for(&self, class: CharacterClass) -> usize {
        match class {
            CharacterClass::Uppercase => self.min_uppercase,
            CharacterClass::Lowercase => self.min_lowercase,
            CharacterClass::Digit => self.min_digit,
            CharacterClass::Symbol => self.min_symbol,
        }
    }

    /// Classes with a non-zero minimum, in evaluation order.
    pub fn required_classes(&self) -> impl Iterator<Item = (CharacterClass, usize)> + '_ {
        CharacterClass::ORDERED
            .into_iter()
            .map(move |class| (class, self.min_for(class)))
            .filter(|&(_, min)| min > 0)
    }
}

impl Rule for CharacterRule {
    fn validate(&self, password: &str) -> Result<(), Violation> {
        for (class, required) in self.required_classes() {
            let found = password.chars().filter(|&c| class.contains(c)).count();
            if found < required {
                return Err(Violation::new(ViolationKind::Character {
                    class,
                    required,
                    found,
                }));
            }
        }
        Ok(())
    }
}

impl fmt::Display for CharacterRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "min uppercase: {}, min lowercase: {}, min digit: {}, min symbol: {}",
            self.min_uppercase, self.min_lowercase, self.min_digit, self.min_symbol
        )
    }
}

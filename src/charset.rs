use std::fmt;

use serde::{Deserialize, Serialize};

const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const DIGITS: &str = "0123456789";
const SYMBOLS: &str = "!@#$%^&*()-_=+[{]};:'\",<.>/?";

/// Union of every class, in catalog order.
pub const ALL: &str = concat!(
    "ABCDEFGHIJKLMNOPQRSTUVWXYZ",
    "abcdefghijklmnopqrstuvwxyz",
    "0123456789",
    "!@#$%^&*()-_=+[{]};:'\",<.>/?",
);

/// A named, disjoint set of characters a password may draw from.
///
/// # Examples
///
/// ```
/// use passgate::CharacterClass;
///
/// assert_eq!(CharacterClass::of('Q'), Some(CharacterClass::Uppercase));
/// assert_eq!(CharacterClass::of('?'), Some(CharacterClass::Symbol));
/// assert_eq!(CharacterClass::of(' '), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CharacterClass {
    /// `A-Z`
    Uppercase,
    /// `a-z`
    Lowercase,
    /// `0-9`
    Digit,
    /// ASCII punctuation from the symbol catalog.
    Symbol,
}

impl CharacterClass {
    /// Every class in the fixed evaluation order.
    pub const ORDERED: [CharacterClass; 4] = [
        CharacterClass::Uppercase,
        CharacterClass::Lowercase,
        CharacterClass::Digit,
        CharacterClass::Symbol,
    ];

    /// The class's alphabet.
    pub fn chars(self) -> &'static str {
        match self {
            Self::Uppercase => UPPERCASE,
            Self::Lowercase => LOWERCASE,
            Self::Digit => DIGITS,
            Self::Symbol => SYMBOLS,
        }
    }

    /// Returns whether `c` belongs to this class.
    pub fn contains(self, c: char) -> bool {
        self.chars().contains(c)
    }

    /// Classifies a single character, or `None` if it is outside the catalog.
    pub fn of(c: char) -> Option<Self> {
        Self::ORDERED.into_iter().find(|class| class.contains(c))
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uppercase => write!(f, "uppercase"),
            Self::Lowercase => write!(f, "lowercase"),
            Self::Digit => write!(f, "digit"),
            Self::Symbol => write!(f, "symbol"),
        }
    }
}

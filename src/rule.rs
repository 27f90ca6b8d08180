//! Composable password rules.
//!
//! Each rule owns one policy dimension and checks it independently:
//! - `LengthRule`: character count bounds
//! - `CharacterRule`: per-class minimum counts
//! - `NoWhitespaceRule`: rejects spaces
//!
//! Rules are combined by [`Policy`](crate::Policy), which decides the
//! evaluation order.

mod character;
mod length;
mod whitespace;

pub use character::CharacterRule;
pub use length::LengthRule;
pub use whitespace::NoWhitespaceRule;

use crate::error::Violation;

/// A single policy dimension that a password can satisfy or violate.
pub trait Rule {
    /// Checks `password` against this rule.
    ///
    /// # Errors
    ///
    /// Returns the first `Violation` found. Violations are never accumulated.
    fn validate(&self, password: &str) -> Result<(), Violation>;
}

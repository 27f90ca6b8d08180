use thiserror::Error;

use crate::charset::CharacterClass;

/// Errors that can occur while validating, generating, or hashing passwords.
#[derive(Debug, Error)]
pub enum Error {
    /// The password was empty. Checked before any rule runs.
    #[error("password cannot be empty")]
    EmptyPassword,
    /// The policy's own rules contradict each other.
    #[error("policy conflict: {0}")]
    Conflict(#[from] Conflict),
    /// The password failed an active rule.
    #[error("policy violation: {0}")]
    Violation(#[from] Violation),
    /// Generation failed: the random source broke or the length is out of reach.
    #[error(transparent)]
    Generation(#[from] GenerationError),
    /// The hashing primitive failed.
    #[error(transparent)]
    Hash(#[from] HashError),
}

/// A password failed a specific rule.
///
/// Only the first failing rule is ever reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct Violation {
    /// The rule that failed, with its threshold.
    pub kind: ViolationKind,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationKind) -> Self {
        Self { kind }
    }
}

/// The kind of rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViolationKind {
    /// Character count is outside `[min, max]`.
    #[error("password length must be between {min} and {max}, got {actual}")]
    Length {
        /// Configured minimum length.
        min: usize,
        /// Configured maximum length.
        max: usize,
        /// Observed length in characters.
        actual: usize,
    },
    /// Too few characters from a class.
    #[error("password must contain at least {required} {class} characters, found {found}")]
    Character {
        /// The class that fell short.
        class: CharacterClass,
        /// Configured minimum for the class.
        required: usize,
        /// Observed count for the class.
        found: usize,
    },
    /// The password contains a space.
    #[error("password cannot contain whitespace")]
    Whitespace,
}

/// A policy whose rules cannot be satisfied together.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct Conflict {
    /// Which combination of rules is inconsistent.
    pub kind: ConflictKind,
}

impl Conflict {
    /// Creates a new conflict.
    pub fn new(kind: ConflictKind) -> Self {
        Self { kind }
    }
}

/// The kind of policy conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConflictKind {
    /// The length rule's minimum is above its maximum.
    #[error("length rule min {min} violates max {max}")]
    LengthBoundsInverted {
        /// Configured minimum length.
        min: usize,
        /// Configured maximum length.
        max: usize,
    },
    /// A minimum length is required but the character rule mandates nothing.
    #[error(
        "character rule mandates no characters but length rule requires at least {min_length}"
    )]
    NoMandatedCharacters {
        /// Configured minimum length.
        min_length: usize,
    },
    /// The mandated minimums cannot fit under the length ceiling.
    #[error("character rule mandates {mandated} characters, exceeding max length {max_length}")]
    MandatedExceedsMaxLength {
        /// Sum of the character rule's minimums.
        mandated: usize,
        /// Configured maximum length.
        max_length: usize,
    },
    /// The character rule's minimums add up past `usize::MAX`.
    #[error("character rule minimums overflow when summed")]
    MandatedOverflow,
    /// Whitespace is forbidden while no characters are mandated.
    #[error("no-whitespace rule conflicts with a character rule that mandates no characters")]
    WhitespaceOnlyPolicy,
    /// Neither a minimum length nor any character minimum is set, so the only
    /// password the policy yields is the empty one. Raised by generation only.
    #[error("policy sets no minimum length and mandates no characters; nothing to generate")]
    NothingToGenerate,
}

/// Password generation failed. Never retried.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The secure random source failed.
    #[error("random source failure: {0}")]
    Source(String),
    /// The policy asks for more characters than the generator will produce.
    #[error("policy requires {requested} characters, above the generation limit of {limit}")]
    LengthLimit {
        /// Length the policy resolves to.
        requested: usize,
        /// Largest length the generator produces.
        limit: usize,
    },
}

/// The password hashing primitive failed.
#[derive(Debug, Error)]
pub enum HashError {
    /// Hasher parameters were rejected.
    #[error("invalid hasher parameters: {0}")]
    Params(String),
    /// Hashing itself failed.
    #[error("hashing failed: {0}")]
    Hashing(String),
}

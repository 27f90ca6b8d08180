use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

use crate::charset::ALL;
use crate::error::{Conflict, ConflictKind, Error, GenerationError};
use crate::logging::PolicyLog;
use crate::policy::Policy;
use crate::secret::Secret;

/// A cryptographically secure source of uniform integers.
///
/// Any `RngCore + CryptoRng` is a source; failures of the underlying
/// generator surface as [`GenerationError`] instead of panicking.
pub trait RandomSource {
    /// Returns an integer uniformly distributed in `[0, bound)`.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError` if `bound` is zero or the source fails.
    fn below(&mut self, bound: usize) -> Result<usize, GenerationError>;
}

impl<R: RngCore + CryptoRng> RandomSource for R {
    fn below(&mut self, bound: usize) -> Result<usize, GenerationError> {
        if bound == 0 {
            return Err(GenerationError::Source(
                "cannot draw from an empty range".to_string(),
            ));
        }
        let bound = bound as u64;
        // Largest multiple of `bound` representable in a u64; draws at or
        // above it are rejected to keep the result unbiased.
        let zone = u64::MAX - (u64::MAX % bound);
        let mut buf = [0u8; 8];
        loop {
            self.try_fill_bytes(&mut buf)
                .map_err(|e| GenerationError::Source(format!("{e}")))?;
            let value = u64::from_le_bytes(buf);
            if value < zone {
                buf.zeroize();
                return Ok((value % bound) as usize);
            }
        }
    }
}

/// Longest password [`Generator`] will produce.
pub const MAX_GENERATED_LENGTH: usize = 4096;

/// Produces random passwords that satisfy a [`Policy`].
///
/// For each character class with a minimum, exactly that many characters are
/// drawn from the class. The password is then padded up to the policy's
/// minimum length from the union of the classes used (or from every class when
/// none is mandated) and shuffled with Fisher-Yates. Every draw comes from the
/// same secure source; a source failure aborts generation and is never retried.
///
/// # Examples
///
/// ```
/// use passgate::{Generator, Policy};
///
/// let policy = Policy::default();
/// let password = Generator::new().generate(Some(&policy)).expect("OS RNG available");
///
/// assert!(policy.validate(&password).is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct Generator<R = OsRng> {
    rng: R,
}

impl Generator<OsRng> {
    /// Creates a generator backed by the operating system's CSPRNG.
    pub fn new() -> Self {
        Self { rng: OsRng }
    }
}

impl Default for Generator<OsRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RandomSource> Generator<R> {
    /// Creates a generator backed by a custom secure source.
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Generates a password for `policy`, or for [`Policy::default`] when `None`.
    ///
    /// # Errors
    ///
    /// - [`Error::Conflict`] if the policy is inconsistent, or if it sets no
    ///   minimum length and mandates no characters
    ///   ([`ConflictKind::NothingToGenerate`])
    /// - [`Error::Generation`] if the random source fails or the policy needs
    ///   more than [`MAX_GENERATED_LENGTH`] characters
    pub fn generate(&mut self, policy: Option<&Policy>) -> Result<String, Error> {
        let policy = policy.cloned().unwrap_or_default();
        let log = PolicyLog::new("generate");

        if let Err(conflict) = policy.is_valid() {
            log.conflict(&conflict);
            return Err(conflict.into());
        }

        let target = target_length(&policy).inspect_err(|e| log.warn(format_args!("{e}")))?;

        let mut chars = Vec::with_capacity(target);
        let mut pool = String::new();

        if let Some(character) = &policy.character {
            for (class, count) in character.required_classes() {
                pool.push_str(class.chars());
                self.draw(class.chars(), count, &mut chars).inspect_err(|e| {
                    log.warn(format_args!("{e} while drawing {class} characters"))
                })?;
            }
        }

        if pool.is_empty() {
            pool.push_str(ALL);
        }

        let remaining = target.saturating_sub(chars.len());
        self.draw(&pool, remaining, &mut chars)
            .inspect_err(|e| log.warn(format_args!("{e} while padding to minimum length")))?;
        self.shuffle(&mut chars)
            .inspect_err(|e| log.warn(format_args!("{e} while shuffling")))?;

        log.trace(format_args!(
            "generated {} characters from a pool of {}",
            chars.len(),
            pool.len()
        ));

        let password: String = chars.iter().collect();
        chars.zeroize();
        Ok(password)
    }

    /// Generates a password and wraps it in an unsalted [`Secret`].
    ///
    /// # Errors
    ///
    /// Same as [`generate`](Self::generate).
    pub fn generate_secret(&mut self, policy: Option<&Policy>) -> Result<Secret, Error> {
        self.generate(policy).map(Secret::new)
    }

    fn draw(
        &mut self,
        alphabet: &str,
        count: usize,
        out: &mut Vec<char>,
    ) -> Result<(), GenerationError> {
        let alphabet: Vec<char> = alphabet.chars().collect();
        for _ in 0..count {
            let idx = self.rng.below(alphabet.len())?;
            out.push(alphabet[idx]);
        }
        Ok(())
    }

    fn shuffle(&mut self, chars: &mut [char]) -> Result<(), GenerationError> {
        for i in (1..chars.len()).rev() {
            let j = self.rng.below(i + 1)?;
            chars.swap(i, j);
        }
        Ok(())
    }
}

/// Length of the password `policy` yields: the larger of its minimum length
/// and its mandated character count. Expects a consistent policy.
fn target_length(policy: &Policy) -> Result<usize, Error> {
    let mandated = match &policy.character {
        Some(character) => character
            .sum()
            .ok_or_else(|| Conflict::new(ConflictKind::MandatedOverflow))?,
        None => 0,
    };
    let target = policy.min_length().max(mandated);
    if target == 0 {
        return Err(Conflict::new(ConflictKind::NothingToGenerate).into());
    }
    if target > MAX_GENERATED_LENGTH {
        return Err(GenerationError::LengthLimit {
            requested: target,
            limit: MAX_GENERATED_LENGTH,
        }
        .into());
    }
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charset::CharacterClass;
    use crate::error::ConflictKind;
    use crate::rule::{CharacterRule, LengthRule, NoWhitespaceRule};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Serves `budget` good draws, then fails every call.
    struct ExhaustedRng {
        inner: StdRng,
        budget: usize,
    }

    impl RngCore for ExhaustedRng {
        fn next_u32(&mut self) -> u32 {
            self.inner.next_u32()
        }

        fn next_u64(&mut self) -> u64 {
            self.inner.next_u64()
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            self.inner.fill_bytes(dest)
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            if self.budget == 0 {
                return Err(rand::Error::new(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    "entropy exhausted",
                )));
            }
            self.budget -= 1;
            self.inner.try_fill_bytes(dest)
        }
    }

    impl CryptoRng for ExhaustedRng {}

    /// Per-class counts in catalog order.
    fn class_counts(password: &str) -> [usize; 4] {
        let mut counts = [0; 4];
        for c in password.chars() {
            if let Some(class) = CharacterClass::of(c) {
                let idx = CharacterClass::ORDERED
                    .iter()
                    .position(|&k| k == class)
                    .unwrap();
                counts[idx] += 1;
            }
        }
        counts
    }

    fn seeded() -> Generator<StdRng> {
        Generator::with_rng(StdRng::seed_from_u64(7))
    }

    #[test]
    fn default_policy_output_validates() {
        let mut generator = Generator::new();
        let policy = Policy::default();
        for _ in 0..100 {
            let password = generator.generate(None).unwrap();
            assert!(policy.validate(&password).is_ok(), "{password:?}");
        }
    }

    #[test]
    fn honours_each_class_minimum() {
        let policy = Policy::new(
            Some(LengthRule::new(12, 20)),
            Some(CharacterRule::new(3, 2, 4, 1)),
            None,
        )
        .unwrap();
        let password = seeded().generate(Some(&policy)).unwrap();
        let [upper, lower, digit, symbol] = class_counts(&password);
        assert!(upper >= 3 && lower >= 2 && digit >= 4 && symbol >= 1, "{password}");
        assert_eq!(password.chars().count(), 12);
    }

    #[test]
    fn padding_uses_only_mandated_classes() {
        let policy = Policy::new(
            Some(LengthRule::new(30, 40)),
            Some(CharacterRule::new(0, 1, 1, 0)),
            None,
        )
        .unwrap();
        let password = seeded().generate(Some(&policy)).unwrap();
        assert_eq!(password.chars().count(), 30);
        let [upper, _, _, symbol] = class_counts(&password);
        assert_eq!(upper, 0);
        assert_eq!(symbol, 0);
    }

    #[test]
    fn no_character_rule_draws_from_every_class() {
        let policy = Policy::new(Some(LengthRule::new(200, 200)), None, None).unwrap();
        let password = seeded().generate(Some(&policy)).unwrap();
        assert_eq!(password.chars().count(), 200);
        assert!(password.chars().all(|c| ALL.contains(c)));
        // 200 draws over 90 symbols: every class shows up.
        assert!(class_counts(&password).iter().all(|&n| n > 0));
    }

    #[test]
    fn mandated_sum_above_min_length_is_kept() {
        let policy = Policy::new(
            Some(LengthRule::new(2, 8)),
            Some(CharacterRule::new(2, 2, 2, 0)),
            None,
        )
        .unwrap();
        let password = seeded().generate(Some(&policy)).unwrap();
        assert_eq!(password.chars().count(), 6);
        assert!(policy.validate(&password).is_ok());
    }

    #[test]
    fn without_length_rule_only_mandated_characters_are_drawn() {
        let policy = Policy::new(None, Some(CharacterRule::new(1, 1, 1, 1)), None).unwrap();
        let password = seeded().generate(Some(&policy)).unwrap();
        assert_eq!(password.chars().count(), 4);
        assert_eq!(class_counts(&password), [1, 1, 1, 1]);
    }

    #[test]
    fn generated_password_never_contains_space() {
        let policy = Policy::new(
            Some(LengthRule::new(16, 32)),
            Some(CharacterRule::new(1, 1, 1, 1)),
            Some(NoWhitespaceRule::new()),
        )
        .unwrap();
        let mut generator = seeded();
        for _ in 0..50 {
            assert!(!generator.generate(Some(&policy)).unwrap().contains(' '));
        }
    }

    #[test]
    fn inconsistent_policy_is_rejected() {
        let policy = Policy {
            length: Some(LengthRule::new(4, 8)),
            character: Some(CharacterRule::new(3, 3, 3, 0)),
            no_whitespace: None,
        };
        match seeded().generate(Some(&policy)) {
            Err(Error::Conflict(c)) => assert_eq!(
                c.kind,
                ConflictKind::MandatedExceedsMaxLength {
                    mandated: 9,
                    max_length: 8
                }
            ),
            other => panic!("expected conflict, got {other:?}"),
        }
    }

    #[test]
    fn policy_yielding_only_empty_password_is_rejected() {
        let policies = [
            Policy::unrestricted(),
            Policy::new(None, Some(CharacterRule::default()), None).unwrap(),
            Policy::new(
                Some(LengthRule::new(0, 16)),
                Some(CharacterRule::default()),
                None,
            )
            .unwrap(),
        ];
        for policy in &policies {
            match seeded().generate(Some(policy)) {
                Err(Error::Conflict(c)) => assert_eq!(c.kind, ConflictKind::NothingToGenerate),
                other => panic!("expected conflict for {policy}, got {other:?}"),
            }
        }
    }

    #[test]
    fn oversized_length_is_an_error_not_a_panic() {
        let huge = Policy::new(Some(LengthRule::new(usize::MAX / 2, usize::MAX)), None, None)
            .unwrap();
        match seeded().generate(Some(&huge)) {
            Err(Error::Generation(GenerationError::LengthLimit { requested, limit })) => {
                assert_eq!(requested, usize::MAX / 2);
                assert_eq!(limit, MAX_GENERATED_LENGTH);
            }
            other => panic!("expected length limit, got {other:?}"),
        }

        let mandated = Policy::new(None, Some(CharacterRule::new(usize::MAX / 4, 0, 0, 0)), None)
            .unwrap();
        assert!(matches!(
            seeded().generate(Some(&mandated)),
            Err(Error::Generation(GenerationError::LengthLimit { .. }))
        ));

        let at_limit = Policy::new(
            Some(LengthRule::new(MAX_GENERATED_LENGTH, MAX_GENERATED_LENGTH)),
            None,
            None,
        )
        .unwrap();
        let password = seeded().generate(Some(&at_limit)).unwrap();
        assert_eq!(password.chars().count(), MAX_GENERATED_LENGTH);
    }

    #[test]
    fn source_failure_is_fatal() {
        for budget in [0, 3, 10] {
            let rng = ExhaustedRng {
                inner: StdRng::seed_from_u64(1),
                budget,
            };
            let result = Generator::with_rng(rng).generate(None);
            assert!(
                matches!(result, Err(Error::Generation(GenerationError::Source(_)))),
                "budget {budget}"
            );
        }
    }

    #[test]
    fn shuffle_moves_mandated_characters() {
        // Unshuffled output would always start with the uppercase run.
        let policy = Policy::new(
            Some(LengthRule::new(8, 8)),
            Some(CharacterRule::new(4, 4, 0, 0)),
            None,
        )
        .unwrap();
        let mut generator = seeded();
        let moved = (0..50).any(|_| {
            let password = generator.generate(Some(&policy)).unwrap();
            !password.chars().take(4).all(|c| c.is_ascii_uppercase())
        });
        assert!(moved);
    }

    #[test]
    fn below_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(99);
        for bound in [1, 2, 7, 90] {
            for _ in 0..200 {
                assert!(rng.below(bound).unwrap() < bound);
            }
        }
        assert!(rng.below(0).is_err());
    }

    #[test]
    fn generate_secret_wraps_plaintext() {
        let secret = Generator::new().generate_secret(None).unwrap();
        assert!(Policy::default().validate(secret.expose_secret()).is_ok());
    }
}

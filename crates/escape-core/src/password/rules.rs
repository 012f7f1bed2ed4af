//! Password rules and the built-in rule catalogue.

use std::fmt;
use std::sync::Arc;

use super::context::GameContext;
use crate::text::contains_normalized;

/// A pure predicate over a candidate and the session context.
///
/// Implementations must not keep state between calls: the same inputs
/// always give the same verdict.
pub trait RuleValidator: Send + Sync {
    fn validate(&self, candidate: &str, context: &GameContext) -> bool;
}

/// Plain function validator. Function pointers cannot capture state.
pub type ValidatorFn = fn(&str, &GameContext) -> bool;

impl RuleValidator for ValidatorFn {
    fn validate(&self, candidate: &str, context: &GameContext) -> bool {
        self(candidate, context)
    }
}

#[derive(Clone)]
pub struct PasswordRule {
    /// Unique; ascending id is display and evaluation order.
    pub id: u32,
    pub title: String,
    pub description: String,
    validator: Arc<dyn RuleValidator>,
}

impl PasswordRule {
    pub fn new(
        id: u32,
        title: impl Into<String>,
        description: impl Into<String>,
        validator: ValidatorFn,
    ) -> Self {
        Self::with_validator(id, title, description, validator)
    }

    pub fn with_validator(
        id: u32,
        title: impl Into<String>,
        description: impl Into<String>,
        validator: impl RuleValidator + 'static,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            validator: Arc::new(validator),
        }
    }

    pub fn check(&self, candidate: &str, context: &GameContext) -> bool {
        self.validator.validate(candidate, context)
    }
}

impl fmt::Debug for PasswordRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordRule")
            .field("id", &self.id)
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}

pub const MIN_LENGTH: usize = 8;
pub const MAX_LENGTH: usize = 32;
/// Word the player must slip into the password.
pub const KEYWORD: &str = "firewall";

pub fn min_length(candidate: &str, _: &GameContext) -> bool {
    candidate.chars().count() >= MIN_LENGTH
}

pub fn max_length(candidate: &str, _: &GameContext) -> bool {
    candidate.chars().count() <= MAX_LENGTH
}

pub fn has_digit(candidate: &str, _: &GameContext) -> bool {
    candidate.chars().any(|c| c.is_ascii_digit())
}

pub fn has_uppercase(candidate: &str, _: &GameContext) -> bool {
    candidate.chars().any(char::is_uppercase)
}

pub fn has_special(candidate: &str, _: &GameContext) -> bool {
    candidate
        .chars()
        .any(|c| !c.is_alphanumeric() && !c.is_whitespace())
}

/// Sum of every ASCII digit in the candidate.
pub fn digit_sum(candidate: &str) -> u32 {
    candidate.chars().filter_map(|c| c.to_digit(10)).sum()
}

pub fn digits_sum_to_required(candidate: &str, context: &GameContext) -> bool {
    digit_sum(candidate) == context.required_sum()
}

pub fn has_keyword(candidate: &str, _: &GameContext) -> bool {
    contains_normalized(candidate, KEYWORD)
}

/// The rule set used by the game, in display order.
pub fn standard_rules() -> Vec<PasswordRule> {
    vec![
        PasswordRule::new(
            1,
            "Length",
            format!("At least {MIN_LENGTH} characters"),
            min_length,
        ),
        PasswordRule::new(2, "Digit", "Contains a digit", has_digit),
        PasswordRule::new(3, "Upper case", "Contains an upper-case letter", has_uppercase),
        PasswordRule::new(4, "Symbol", "Contains a special character", has_special),
        PasswordRule::new(
            5,
            "Checksum",
            "Its digits add up to the session's required sum",
            digits_sum_to_required,
        ),
        PasswordRule::new(
            6,
            "Keyword",
            format!("Mentions the word \"{KEYWORD}\""),
            has_keyword,
        ),
        PasswordRule::new(
            7,
            "Buffer",
            format!("At most {MAX_LENGTH} characters"),
            max_length,
        ),
    ]
}

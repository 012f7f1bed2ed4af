//! Rule-based password puzzle.
//!
//! A candidate is checked against an ordered list of independent, pure
//! rules. Each rule sees the candidate and the session's [`GameContext`]
//! and nothing else, so re-evaluating on every keystroke is safe.

mod context;
mod puzzle;
pub mod rules;

pub use context::GameContext;
pub use puzzle::{PasswordPuzzle, RuleReport, RuleStatus};
pub use rules::{PasswordRule, RuleValidator};

use std::collections::BTreeMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::context::GameContext;
use super::rules::PasswordRule;
use crate::error::ValidationError;
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleStatus {
    /// Nothing evaluated yet.
    Pending,
    Valid,
    Invalid,
}

impl From<bool> for RuleStatus {
    fn from(passed: bool) -> Self {
        if passed {
            RuleStatus::Valid
        } else {
            RuleStatus::Invalid
        }
    }
}

/// One display line of the rule checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleReport {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub status: RuleStatus,
}

#[derive(Debug, Clone)]
pub struct PasswordPuzzle {
    /// Sorted by id.
    rules: Vec<PasswordRule>,
    statuses: BTreeMap<u32, RuleStatus>,
}

impl PasswordPuzzle {
    /// # Errors
    ///
    /// Returns [`ValidationError::DuplicateRuleId`] when two rules share an id.
    pub fn new(mut rules: Vec<PasswordRule>) -> Result<Self, ValidationError> {
        rules.sort_by_key(|r| r.id);
        if let Some(pair) = rules.windows(2).find(|w| w[0].id == w[1].id) {
            return Err(ValidationError::DuplicateRuleId(pair[0].id));
        }
        let statuses = rules.iter().map(|r| (r.id, RuleStatus::Pending)).collect();
        Ok(Self { rules, statuses })
    }

    pub fn rules(&self) -> &[PasswordRule] {
        &self.rules
    }

    /// Statuses from the last evaluation, or all `Pending` before the first.
    pub fn statuses(&self) -> &BTreeMap<u32, RuleStatus> {
        &self.statuses
    }

    /// Run every rule in id order without touching stored statuses.
    pub fn check(&self, candidate: &str, context: &GameContext) -> BTreeMap<u32, RuleStatus> {
        self.rules
            .iter()
            .map(|rule| (rule.id, RuleStatus::from(rule.check(candidate, context))))
            .collect()
    }

    /// Evaluate `candidate` and remember the result for display.
    pub fn evaluate(&mut self, candidate: &str, context: &GameContext) -> BTreeMap<u32, RuleStatus> {
        let statuses = self.check(candidate, context);
        tracing::trace!(
            valid = statuses.values().filter(|s| **s == RuleStatus::Valid).count(),
            total = statuses.len(),
            "password evaluated"
        );
        self.statuses.clone_from(&statuses);
        statuses
    }

    /// Every rule passed on the last evaluation. An empty rule set is never
    /// solved.
    pub fn is_solved(&self) -> bool {
        !self.statuses.is_empty() && self.statuses.values().all(|s| *s == RuleStatus::Valid)
    }

    pub fn solved_event(&self, context: &GameContext) -> Option<Event> {
        if !self.is_solved() {
            return None;
        }
        tracing::info!(session_id = context.session_id(), "password puzzle solved");
        Some(Event::PasswordSolved {
            session_id: context.session_id().to_string(),
            at: Utc::now(),
        })
    }

    /// Checklist lines for `candidate`, in display order.
    pub fn report(&self, candidate: &str, context: &GameContext) -> Vec<RuleReport> {
        self.rules
            .iter()
            .map(|rule| RuleReport {
                id: rule.id,
                title: rule.title.clone(),
                description: rule.description.clone(),
                status: rule.check(candidate, context).into(),
            })
            .collect()
    }
}

//! SurveyTemplate aggregate - an administrator-authored survey definition.
//!
//! # Ownership
//!
//! A template owns its outcomes. Responses and profiles refer to the
//! template by ID only.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::domain::foundation::{DomainError, OutcomeId, TemplateId, Timestamp, ValidationError};

use super::Outcome;

/// Number of questions generated per attempt, bounded to 3..=15.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct QuestionCount(u8);

impl QuestionCount {
    pub const MIN: u8 = 3;
    pub const MAX: u8 = 15;
    /// Count a fresh draft starts with.
    pub const DEFAULT: QuestionCount = QuestionCount(5);

    pub fn new(value: u8) -> Result<Self, ValidationError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ValidationError::out_of_range(
                "question_count",
                Self::MIN as i64,
                Self::MAX as i64,
                value as i64,
            ));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn as_usize(&self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<u8> for QuestionCount {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<QuestionCount> for u8 {
    fn from(count: QuestionCount) -> Self {
        count.0
    }
}

/// Survey template aggregate.
///
/// # Invariants
///
/// - `topic` is non-blank
/// - `question_count` is within 3..=15
/// - `outcomes` is non-empty and outcome IDs are unique
/// - never mutated after creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyTemplate {
    id: TemplateId,
    topic: String,
    question_count: QuestionCount,
    outcomes: Vec<Outcome>,
    created_at: Timestamp,
}

impl SurveyTemplate {
    /// Creates a validated template.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if the topic is blank, outcomes are empty, or an
    ///   outcome ID repeats
    pub fn new(
        id: TemplateId,
        topic: impl Into<String>,
        question_count: QuestionCount,
        outcomes: Vec<Outcome>,
        created_at: Timestamp,
    ) -> Result<Self, DomainError> {
        let topic = topic.into().trim().to_string();
        if topic.is_empty() {
            return Err(ValidationError::empty_field("topic").into());
        }
        if outcomes.is_empty() {
            return Err(DomainError::validation(
                "outcomes",
                "A template needs at least one outcome",
            ));
        }

        let mut seen = HashSet::new();
        for outcome in &outcomes {
            if !seen.insert(outcome.id()) {
                return Err(DomainError::validation(
                    "outcomes",
                    format!("Duplicate outcome id '{}'", outcome.id()),
                ));
            }
        }

        Ok(Self {
            id,
            topic,
            question_count,
            outcomes,
            created_at,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &TemplateId {
        &self.id
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn question_count(&self) -> QuestionCount {
        self.question_count
    }

    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lookups
    // ─────────────────────────────────────────────────────────────────────────

    /// Finds an outcome by ID.
    pub fn outcome(&self, id: &OutcomeId) -> Option<&Outcome> {
        self.outcomes.iter().find(|o| o.id() == id)
    }

    /// Position of an outcome in authoring order (used for tie-breaks).
    pub fn outcome_position(&self, id: &OutcomeId) -> Option<usize> {
        self.outcomes.iter().position(|o| o.id() == id)
    }

    pub fn has_outcome(&self, id: &OutcomeId) -> bool {
        self.outcome_position(id).is_some()
    }
}

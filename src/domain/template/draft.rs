//! TemplateDraft - the editable form state an administrator fills in
//! before a template is saved.
//!
//! Edits go through typed commands (`OutcomeUpdate`) instead of a generic
//! field setter, so every change is checked at compile time.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, OutcomeId, TemplateId, Timestamp};

use super::{parse_traits, Outcome, QuestionCount, SurveyTemplate};

/// An outcome row in a draft; the name may still be blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeDraft {
    pub id: OutcomeId,
    pub name: String,
    pub traits: Vec<String>,
}

impl OutcomeDraft {
    fn blank(id: OutcomeId) -> Self {
        Self {
            id,
            name: String::new(),
            traits: Vec::new(),
        }
    }
}

/// A single edit applied to one outcome row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum OutcomeUpdate {
    /// Replace the outcome name.
    Rename(String),
    /// Replace the traits list as given.
    SetTraits(Vec<String>),
    /// Replace the traits from comma-separated form input.
    SetTraitsFromInput(String),
}

/// Template under construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateDraft {
    topic: String,
    question_count: QuestionCount,
    outcomes: Vec<OutcomeDraft>,
}

impl Default for TemplateDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateDraft {
    /// Starts a draft with one blank outcome and the default question count.
    pub fn new() -> Self {
        let first = OutcomeId::new("1").map(OutcomeDraft::blank);
        Self {
            topic: String::new(),
            question_count: QuestionCount::DEFAULT,
            outcomes: first.into_iter().collect(),
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn question_count(&self) -> QuestionCount {
        self.question_count
    }

    pub fn outcomes(&self) -> &[OutcomeDraft] {
        &self.outcomes
    }

    pub fn set_topic(&mut self, topic: impl Into<String>) {
        self.topic = topic.into();
    }

    /// Sets the question count.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if outside 3..=15
    pub fn set_question_count(&mut self, count: u8) -> Result<(), DomainError> {
        self.question_count = QuestionCount::new(count)?;
        Ok(())
    }

    /// Appends a blank outcome row and returns its generated ID.
    pub fn add_outcome(&mut self) -> OutcomeId {
        let id = OutcomeId::generate();
        self.outcomes.push(OutcomeDraft::blank(id.clone()));
        id
    }

    /// Removes an outcome row.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no row has this ID
    /// - `PreconditionFailed` if it is the last remaining row
    pub fn remove_outcome(&mut self, id: &OutcomeId) -> Result<(), DomainError> {
        let pos = self.position(id)?;
        if self.outcomes.len() == 1 {
            return Err(DomainError::precondition_failed(
                "A template must keep at least one outcome",
            ));
        }
        self.outcomes.remove(pos);
        Ok(())
    }

    /// Applies a typed edit to one outcome row.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no row has this ID
    pub fn update_outcome(&mut self, id: &OutcomeId, update: OutcomeUpdate) -> Result<(), DomainError> {
        let pos = self.position(id)?;
        let row = &mut self.outcomes[pos];
        match update {
            OutcomeUpdate::Rename(name) => row.name = name,
            OutcomeUpdate::SetTraits(traits) => row.traits = traits,
            OutcomeUpdate::SetTraitsFromInput(input) => row.traits = parse_traits(&input),
        }
        Ok(())
    }

    /// Validates the draft and produces the immutable template.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if the topic or any outcome name is blank
    pub fn build(self, id: TemplateId, created_at: Timestamp) -> Result<SurveyTemplate, DomainError> {
        let outcomes = self
            .outcomes
            .into_iter()
            .map(|row| Outcome::new(row.id, row.name, row.traits))
            .collect::<Result<Vec<_>, _>>()?;

        SurveyTemplate::new(id, self.topic, self.question_count, outcomes, created_at)
    }

    fn position(&self, id: &OutcomeId) -> Result<usize, DomainError> {
        self.outcomes
            .iter()
            .position(|row| &row.id == id)
            .ok_or_else(|| DomainError::not_found("Outcome", id))
    }
}

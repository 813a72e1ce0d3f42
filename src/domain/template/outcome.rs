//! Outcome - one possible classification result of a survey.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{OutcomeId, ValidationError};

/// A possible survey result with its descriptive traits.
///
/// # Invariants
///
/// - `name` is non-blank
/// - immutable once part of a saved template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    id: OutcomeId,
    name: String,
    traits: Vec<String>,
}

impl Outcome {
    /// Creates an outcome, trimming the name.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the name is blank
    pub fn new(
        id: OutcomeId,
        name: impl Into<String>,
        traits: Vec<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::empty_field("outcome.name"));
        }
        Ok(Self { id, name, traits })
    }

    pub fn id(&self) -> &OutcomeId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn traits(&self) -> &[String] {
        &self.traits
    }
}

/// Parses the comma-separated traits input from the authoring form.
///
/// Pieces are trimmed and empty pieces dropped, so `"Brave, Bold,"`
/// yields `["Brave", "Bold"]`.
pub fn parse_traits(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

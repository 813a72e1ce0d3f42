//! Outcome tallying and response statistics.
//!
//! All functions here are pure: they read their inputs and return values,
//! never touching storage.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, TemplateId};
use crate::domain::survey::{Answer, SurveyResponse};
use crate::domain::template::SurveyTemplate;

/// Picks the outcome chosen most often and returns its name.
///
/// Ties go to the outcome listed first in the template.
///
/// # Errors
///
/// - `InvalidInput` if `answers` is empty
/// - `ReferentialIntegrity` if an answer names an outcome the template lacks
pub fn resolve_outcome(template: &SurveyTemplate, answers: &[Answer]) -> Result<String, DomainError> {
    if answers.is_empty() {
        return Err(DomainError::invalid_input(
            "Cannot resolve an outcome without answers",
        ));
    }

    let outcomes = template.outcomes();
    let mut counts = vec![0usize; outcomes.len()];
    for answer in answers {
        let position = template.outcome_position(&answer.outcome_id).ok_or_else(|| {
            DomainError::referential_integrity(format!(
                "Answer to question {} references unknown outcome '{}'",
                answer.question_id, answer.outcome_id
            ))
            .with_detail("template_id", template.id().as_str())
        })?;
        counts[position] += 1;
    }

    // Replace only on a strictly greater count so earlier outcomes win ties.
    let winner = counts
        .iter()
        .enumerate()
        .fold(0, |best, (i, count)| if *count > counts[best] { i } else { best });

    Ok(outcomes[winner].name().to_string())
}

/// Count of responses for one result name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionEntry {
    pub name: String,
    pub count: usize,
}

/// Result counts in first-occurrence order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Distribution {
    entries: Vec<DistributionEntry>,
}

impl Distribution {
    pub fn entries(&self) -> &[DistributionEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Count for a result name, zero if absent.
    pub fn count_of(&self, name: &str) -> usize {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map_or(0, |e| e.count)
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    fn record(&mut self, name: &str) {
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(entry) => entry.count += 1,
            None => self.entries.push(DistributionEntry {
                name: name.to_string(),
                count: 1,
            }),
        }
    }
}

/// Groups the template's responses by result.
pub fn build_distribution<'a, I>(responses: I, template_id: &TemplateId) -> Distribution
where
    I: IntoIterator<Item = &'a SurveyResponse>,
{
    let mut distribution = Distribution::default();
    for response in responses {
        if response.template_id() == template_id {
            distribution.record(response.result());
        }
    }
    distribution
}

/// Mean rating at full precision; exactly `0.0` when there are none.
pub fn average_rating<'a, I>(responses: I) -> f64
where
    I: IntoIterator<Item = &'a SurveyResponse>,
{
    let (sum, count) = responses
        .into_iter()
        .fold((0u64, 0u64), |(sum, count), r| {
            (sum + u64::from(r.rating().value()), count + 1)
        });

    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}

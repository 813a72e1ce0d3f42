//! Questions generated for a single survey attempt.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::domain::foundation::OutcomeId;
use crate::domain::template::SurveyTemplate;

/// Question identifier, unique within one generated set.
pub type QuestionId = u32;

/// Every question offers exactly this many options.
pub const OPTIONS_PER_QUESTION: usize = 4;

/// One selectable answer, mapped to an outcome of the template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub text: String,
    pub outcome_id: OutcomeId,
}

/// A generated prompt with its four outcome-mapped options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    pub options: Vec<QuestionOption>,
}

impl Question {
    /// Returns true if one of the options maps to the outcome.
    pub fn offers(&self, outcome_id: &OutcomeId) -> bool {
        self.options.iter().any(|o| &o.outcome_id == outcome_id)
    }
}

/// Reasons a generated question list is unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuestionSetError {
    #[error("no questions were generated")]
    Empty,

    #[error("expected {expected} questions, got {actual}")]
    TooFew { expected: usize, actual: usize },

    #[error("duplicate question id {0}")]
    DuplicateId(QuestionId),

    #[error("question {0} has empty text")]
    EmptyText(QuestionId),

    #[error("question {id} has {actual} options, expected {expected}", expected = OPTIONS_PER_QUESTION)]
    WrongOptionCount { id: QuestionId, actual: usize },

    #[error("question {0} has an option with empty text")]
    EmptyOptionText(QuestionId),

    #[error("question {id} references unknown outcome '{outcome_id}'")]
    UnknownOutcome { id: QuestionId, outcome_id: OutcomeId },
}

/// A question list checked against its template.
///
/// # Invariants
///
/// - exactly `template.question_count()` questions
/// - unique question ids, non-empty texts
/// - every question has four options, each naming an outcome of the template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSet {
    questions: Vec<Question>,
}

impl QuestionSet {
    /// Validates raw questions against the template.
    ///
    /// Extra questions beyond the template's count are dropped before
    /// validation.
    pub fn validated(
        template: &SurveyTemplate,
        mut questions: Vec<Question>,
    ) -> Result<Self, QuestionSetError> {
        let expected = template.question_count().as_usize();
        if questions.is_empty() {
            return Err(QuestionSetError::Empty);
        }
        if questions.len() < expected {
            return Err(QuestionSetError::TooFew {
                expected,
                actual: questions.len(),
            });
        }
        questions.truncate(expected);

        let mut seen = HashSet::new();
        for question in &questions {
            if !seen.insert(question.id) {
                return Err(QuestionSetError::DuplicateId(question.id));
            }
            if question.text.trim().is_empty() {
                return Err(QuestionSetError::EmptyText(question.id));
            }
            if question.options.len() != OPTIONS_PER_QUESTION {
                return Err(QuestionSetError::WrongOptionCount {
                    id: question.id,
                    actual: question.options.len(),
                });
            }
            for option in &question.options {
                if option.text.trim().is_empty() {
                    return Err(QuestionSetError::EmptyOptionText(question.id));
                }
                if !template.has_outcome(&option.outcome_id) {
                    return Err(QuestionSetError::UnknownOutcome {
                        id: question.id,
                        outcome_id: option.outcome_id.clone(),
                    });
                }
            }
        }

        Ok(Self { questions })
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn accepts_well_formed_set() {
        let set = QuestionSet::validated(&house_template(3), questions(3)).unwrap();
        assert_eq!(set.len(), 3);
        assert!(set.get(0).unwrap().offers(&OutcomeId::new("a").unwrap()));
    }

    #[test]
    fn truncates_extra_questions() {
        let set = QuestionSet::validated(&house_template(3), questions(5)).unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.questions().last().unwrap().id, 3);
    }

    #[test]
    fn rejects_empty_and_short_sets() {
        let template = house_template(5);
        assert_eq!(
            QuestionSet::validated(&template, vec![]).unwrap_err(),
            QuestionSetError::Empty
        );
        assert_eq!(
            QuestionSet::validated(&template, questions(4)).unwrap_err(),
            QuestionSetError::TooFew {
                expected: 5,
                actual: 4
            }
        );
    }

    #[test]
    fn rejects_wrong_option_count() {
        let mut qs = questions(3);
        qs[1].options.pop();
        assert_eq!(
            QuestionSet::validated(&house_template(3), qs).unwrap_err(),
            QuestionSetError::WrongOptionCount { id: 2, actual: 3 }
        );
    }

    #[test]
    fn rejects_unknown_outcome() {
        let mut qs = questions(3);
        qs[2].options[0].outcome_id = OutcomeId::new("zzz").unwrap();
        assert!(matches!(
            QuestionSet::validated(&house_template(3), qs).unwrap_err(),
            QuestionSetError::UnknownOutcome { id: 3, .. }
        ));
    }

    #[test]
    fn rejects_duplicate_ids_and_blank_text() {
        let mut dupes = questions(3);
        dupes[2].id = 1;
        assert_eq!(
            QuestionSet::validated(&house_template(3), dupes).unwrap_err(),
            QuestionSetError::DuplicateId(1)
        );

        let mut blank = questions(3);
        blank[0].text = "  ".into();
        assert_eq!(
            QuestionSet::validated(&house_template(3), blank).unwrap_err(),
            QuestionSetError::EmptyText(1)
        );
    }
}

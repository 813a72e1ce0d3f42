use serde::{Deserialize, Serialize};

use crate::domain::foundation::OutcomeId;

use super::QuestionId;

/// A participant's pick for one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: QuestionId,
    pub outcome_id: OutcomeId,
}

impl Answer {
    pub fn new(question_id: QuestionId, outcome_id: OutcomeId) -> Self {
        Self {
            question_id,
            outcome_id,
        }
    }
}

//! HTTP DTOs for survey endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;
use crate::domain::survey::{Question, QuestionId, SurveyAttempt, SurveyResponse, SurveyStatus};

use crate::adapters::http::profile::ProfileResponse;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Answer to the current question, naming the chosen option's outcome.
#[derive(Debug, Clone, Deserialize)]
pub struct AnswerRequest {
    pub question_id: QuestionId,
    pub outcome_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RatingRequest {
    pub rating: u8,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressResponse {
    pub answered: usize,
    pub total: usize,
}

/// State of an attempt as the participant sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptResponse {
    pub id: String,
    pub template_id: String,
    pub topic: String,
    pub status: SurveyStatus,
    pub progress: ProgressResponse,
    /// The question awaiting an answer, if any.
    pub current_question: Option<Question>,
    pub result: Option<String>,
    pub rating: Option<u8>,
    pub started_at: Timestamp,
}

impl From<&SurveyAttempt> for AttemptResponse {
    fn from(attempt: &SurveyAttempt) -> Self {
        let (answered, total) = attempt.progress();
        Self {
            id: attempt.id().to_string(),
            template_id: attempt.template().id().to_string(),
            topic: attempt.template().topic().to_string(),
            status: attempt.status().clone(),
            progress: ProgressResponse { answered, total },
            current_question: attempt.current_question().cloned(),
            result: attempt.result().map(str::to_string),
            rating: attempt.rating().map(|r| r.value()),
            started_at: *attempt.started_at(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerResponse {
    pub attempt: AttemptResponse,
    /// Present when this answer completed the survey.
    pub profile: Option<ProfileResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmittedResponse {
    pub response_id: String,
    pub template_id: String,
    pub user_name: String,
    pub result: String,
    pub rating: u8,
    pub timestamp: Timestamp,
}

impl From<&SurveyResponse> for SubmittedResponse {
    fn from(response: &SurveyResponse) -> Self {
        Self {
            response_id: response.id().to_string(),
            template_id: response.template_id().to_string(),
            user_name: response.user_name().to_string(),
            result: response.result().to_string(),
            rating: response.rating().value(),
            timestamp: *response.timestamp(),
        }
    }
}

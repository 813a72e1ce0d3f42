//! Question Generator Port - personalized question sets per attempt.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::survey::{QuestionSet, QuestionSetError};
use crate::domain::template::SurveyTemplate;
use crate::domain::user::UserProfile;

use super::AIError;

/// Port for producing the questions of a new attempt.
///
/// Implementations never report an empty list as success: anything short
/// of a valid `QuestionSet` is an error.
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    async fn generate(
        &self,
        template: &SurveyTemplate,
        profile: &UserProfile,
    ) -> Result<QuestionSet, GenerationError>;
}

/// Why question generation failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerationError {
    #[error("AI provider failed: {0}")]
    Provider(#[from] AIError),

    #[error("malformed question payload: {0}")]
    MalformedPayload(String),

    #[error("invalid question set: {0}")]
    InvalidQuestions(#[from] QuestionSetError),
}

impl From<GenerationError> for DomainError {
    fn from(err: GenerationError) -> Self {
        let kind = match &err {
            GenerationError::Provider(_) => "provider",
            GenerationError::MalformedPayload(_) => "malformed_payload",
            GenerationError::InvalidQuestions(_) => "invalid_questions",
        };
        DomainError::new(
            ErrorCode::ExternalServiceError,
            format!("Question generation failed: {}", err),
        )
        .with_detail("failure", kind)
    }
}

//! Survey attempt handlers.
//!
//! An attempt is started against a template, answered question by question,
//! rated, and submitted. Every handler after `StartSurveyHandler` loads the
//! attempt through `load_owned_attempt`, so participants only ever touch
//! their own attempts.

mod answer_question;
mod get_attempt;
mod rate_survey;
mod start_survey;
mod submit_survey;

pub use answer_question::{AnswerQuestionCommand, AnswerQuestionHandler, AnswerQuestionResult};
pub use get_attempt::GetAttemptHandler;
pub use rate_survey::{RateSurveyCommand, RateSurveyHandler};
pub use start_survey::{StartSurveyCommand, StartSurveyHandler};
pub use submit_survey::{SubmitSurveyCommand, SubmitSurveyHandler, SubmitSurveyResult};

use crate::domain::foundation::{AttemptId, CommandMetadata, DomainError};
use crate::domain::survey::SurveyAttempt;
use crate::ports::AttemptRepository;

async fn load_owned_attempt(
    attempts: &dyn AttemptRepository,
    attempt_id: &AttemptId,
    metadata: &CommandMetadata,
) -> Result<SurveyAttempt, DomainError> {
    let attempt = attempts
        .find_by_id(attempt_id)
        .await?
        .ok_or_else(|| DomainError::not_found("Survey attempt", attempt_id))?;

    if !attempt.is_owned_by(metadata.user_id()) {
        return Err(DomainError::forbidden(
            "Survey attempt belongs to another participant",
        ));
    }
    Ok(attempt)
}

//! RateSurveyHandler - sets the 1-5 rating of a completed attempt.

use std::sync::Arc;

use crate::domain::foundation::{AttemptId, CommandMetadata, DomainError, Rating};
use crate::domain::survey::SurveyAttempt;
use crate::ports::AttemptRepository;

use super::load_owned_attempt;

/// Command to rate a survey. The raw value is validated by the handler.
#[derive(Debug, Clone)]
pub struct RateSurveyCommand {
    pub attempt_id: AttemptId,
    pub rating: u8,
}

pub struct RateSurveyHandler {
    attempts: Arc<dyn AttemptRepository>,
}

impl RateSurveyHandler {
    pub fn new(attempts: Arc<dyn AttemptRepository>) -> Self {
        Self { attempts }
    }

    pub async fn handle(
        &self,
        cmd: RateSurveyCommand,
        metadata: CommandMetadata,
    ) -> Result<SurveyAttempt, DomainError> {
        let rating = Rating::new(cmd.rating)?;
        let mut attempt =
            load_owned_attempt(self.attempts.as_ref(), &cmd.attempt_id, &metadata).await?;

        attempt.rate(rating)?;
        let attempt = self.attempts.save(attempt).await?;

        tracing::debug!(attempt_id = %attempt.id(), rating = rating.value(), "Survey rated");
        Ok(attempt)
    }
}

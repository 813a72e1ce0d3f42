//! GetAttemptHandler - Query handler for an attempt owned by the caller.

use std::sync::Arc;

use crate::domain::foundation::{AttemptId, CommandMetadata, DomainError};
use crate::domain::survey::SurveyAttempt;
use crate::ports::AttemptRepository;

use super::load_owned_attempt;

pub struct GetAttemptHandler {
    attempts: Arc<dyn AttemptRepository>,
}

impl GetAttemptHandler {
    pub fn new(attempts: Arc<dyn AttemptRepository>) -> Self {
        Self { attempts }
    }

    pub async fn handle(
        &self,
        attempt_id: &AttemptId,
        metadata: CommandMetadata,
    ) -> Result<SurveyAttempt, DomainError> {
        load_owned_attempt(self.attempts.as_ref(), attempt_id, &metadata).await
    }
}

//! SubmitSurveyHandler - turns a rated attempt into a stored response.

use std::sync::Arc;

use crate::domain::foundation::{AttemptId, CommandMetadata, DomainError};
use crate::domain::survey::{SurveyAttempt, SurveyResponse};
use crate::ports::{AttemptRepository, ProfileRepository, ResponseRepository, TemplateRepository};

use super::load_owned_attempt;

/// Command to submit a rated survey.
#[derive(Debug, Clone)]
pub struct SubmitSurveyCommand {
    pub attempt_id: AttemptId,
}

/// Result of a submission.
#[derive(Debug, Clone)]
pub struct SubmitSurveyResult {
    pub attempt: SurveyAttempt,
    pub response: SurveyResponse,
}

/// Handler for submitting surveys.
///
/// The response carries the participant's current profile name and refers
/// to a template that must still exist.
pub struct SubmitSurveyHandler {
    templates: Arc<dyn TemplateRepository>,
    profiles: Arc<dyn ProfileRepository>,
    responses: Arc<dyn ResponseRepository>,
    attempts: Arc<dyn AttemptRepository>,
}

impl SubmitSurveyHandler {
    pub fn new(
        templates: Arc<dyn TemplateRepository>,
        profiles: Arc<dyn ProfileRepository>,
        responses: Arc<dyn ResponseRepository>,
        attempts: Arc<dyn AttemptRepository>,
    ) -> Self {
        Self {
            templates,
            profiles,
            responses,
            attempts,
        }
    }

    pub async fn handle(
        &self,
        cmd: SubmitSurveyCommand,
        metadata: CommandMetadata,
    ) -> Result<SubmitSurveyResult, DomainError> {
        let mut attempt =
            load_owned_attempt(self.attempts.as_ref(), &cmd.attempt_id, &metadata).await?;

        let template_id = attempt.template().id().clone();
        if self.templates.find_by_id(&template_id).await?.is_none() {
            return Err(DomainError::referential_integrity(format!(
                "Template {} no longer exists",
                template_id
            )));
        }

        let profile = self.profiles.find_or_default(metadata.user_id()).await?;
        let response = attempt.submit(profile.name())?;

        // The response ID is the attempt ID, so a retry after a failed
        // attempt save finds the recorded response instead of adding one.
        // The versioned save then lets exactly one submission through.
        let response = self.responses.append(&response).await?;
        let attempt = self.attempts.save(attempt).await?;

        tracing::info!(
            response_id = %response.id(),
            template_id = %template_id,
            result = response.result(),
            rating = response.rating().value(),
            correlation_id = %metadata.correlation_id(),
            "Survey submitted"
        );
        Ok(SubmitSurveyResult { attempt, response })
    }
}

//! StartSurveyHandler - generates personalized questions and opens an attempt.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, DomainError, TemplateId};
use crate::domain::survey::SurveyAttempt;
use crate::ports::{AttemptRepository, ProfileRepository, QuestionGenerator, TemplateRepository};

/// Command to start a survey.
#[derive(Debug, Clone)]
pub struct StartSurveyCommand {
    pub template_id: TemplateId,
}

/// Handler for starting surveys.
///
/// Questions are tailored to the caller's profile (or the default profile
/// if none has been saved yet). A failed or short generation is an error;
/// no attempt is stored in that case.
pub struct StartSurveyHandler {
    templates: Arc<dyn TemplateRepository>,
    profiles: Arc<dyn ProfileRepository>,
    attempts: Arc<dyn AttemptRepository>,
    generator: Arc<dyn QuestionGenerator>,
}

impl StartSurveyHandler {
    pub fn new(
        templates: Arc<dyn TemplateRepository>,
        profiles: Arc<dyn ProfileRepository>,
        attempts: Arc<dyn AttemptRepository>,
        generator: Arc<dyn QuestionGenerator>,
    ) -> Self {
        Self {
            templates,
            profiles,
            attempts,
            generator,
        }
    }

    pub async fn handle(
        &self,
        cmd: StartSurveyCommand,
        metadata: CommandMetadata,
    ) -> Result<SurveyAttempt, DomainError> {
        let template = self
            .templates
            .find_by_id(&cmd.template_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Template", &cmd.template_id))?;
        let profile = self.profiles.find_or_default(metadata.user_id()).await?;

        let questions = self
            .generator
            .generate(&template, &profile)
            .await
            .map_err(|e| {
                tracing::error!(
                    template_id = %cmd.template_id,
                    error = %e,
                    correlation_id = %metadata.correlation_id(),
                    "Question generation failed"
                );
                DomainError::from(e)
            })?;

        let attempt = SurveyAttempt::start(template, metadata.user_id().clone(), questions);
        let attempt = self.attempts.save(attempt).await?;

        tracing::info!(
            attempt_id = %attempt.id(),
            template_id = %cmd.template_id,
            questions = attempt.questions().len(),
            "Survey started"
        );
        Ok(attempt)
    }
}

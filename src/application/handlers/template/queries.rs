//! Template query handlers: list, get and report.

use std::sync::Arc;

use crate::domain::analysis::TemplateReport;
use crate::domain::foundation::{CommandMetadata, DomainError, TemplateId};
use crate::domain::template::SurveyTemplate;
use crate::ports::{ResponseRepository, TemplateRepository};

/// Lists all templates in creation order.
pub struct ListTemplatesHandler {
    templates: Arc<dyn TemplateRepository>,
}

impl ListTemplatesHandler {
    pub fn new(templates: Arc<dyn TemplateRepository>) -> Self {
        Self { templates }
    }

    pub async fn handle(&self, _metadata: CommandMetadata) -> Result<Vec<SurveyTemplate>, DomainError> {
        self.templates.list().await
    }
}

/// Fetches one template.
pub struct GetTemplateHandler {
    templates: Arc<dyn TemplateRepository>,
}

impl GetTemplateHandler {
    pub fn new(templates: Arc<dyn TemplateRepository>) -> Self {
        Self { templates }
    }

    pub async fn handle(
        &self,
        template_id: &TemplateId,
        _metadata: CommandMetadata,
    ) -> Result<SurveyTemplate, DomainError> {
        self.templates
            .find_by_id(template_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Template", template_id))
    }
}

/// Builds the dashboard report for a template. Administrators only.
pub struct GetTemplateReportHandler {
    templates: Arc<dyn TemplateRepository>,
    responses: Arc<dyn ResponseRepository>,
}

impl GetTemplateReportHandler {
    pub fn new(
        templates: Arc<dyn TemplateRepository>,
        responses: Arc<dyn ResponseRepository>,
    ) -> Self {
        Self {
            templates,
            responses,
        }
    }

    pub async fn handle(
        &self,
        template_id: &TemplateId,
        metadata: CommandMetadata,
    ) -> Result<TemplateReport, DomainError> {
        metadata.session.require_admin()?;

        let template = self
            .templates
            .find_by_id(template_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Template", template_id))?;
        let responses = self.responses.list_by_template(template_id).await?;

        Ok(TemplateReport::build(&template, &responses))
    }
}

//! CreateTemplateHandler - Command handler for authoring survey templates.

use serde::Deserialize;
use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, DomainError, TemplateId, Timestamp};
use crate::domain::template::{OutcomeUpdate, SurveyTemplate, TemplateDraft};
use crate::ports::TemplateRepository;

/// Traits as entered: either a list or the comma-separated form text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TraitsInput {
    List(Vec<String>),
    Text(String),
}

impl Default for TraitsInput {
    fn default() -> Self {
        TraitsInput::List(Vec::new())
    }
}

impl From<TraitsInput> for OutcomeUpdate {
    fn from(input: TraitsInput) -> Self {
        match input {
            TraitsInput::List(traits) => OutcomeUpdate::SetTraits(traits),
            TraitsInput::Text(text) => OutcomeUpdate::SetTraitsFromInput(text),
        }
    }
}

/// One outcome row of a new template.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewOutcome {
    pub name: String,
    #[serde(default)]
    pub traits: TraitsInput,
}

/// Command to create a template.
#[derive(Debug, Clone)]
pub struct CreateTemplateCommand {
    pub topic: String,
    pub question_count: u8,
    pub outcomes: Vec<NewOutcome>,
}

/// Handler for creating templates. Administrators only.
pub struct CreateTemplateHandler {
    templates: Arc<dyn TemplateRepository>,
}

impl CreateTemplateHandler {
    pub fn new(templates: Arc<dyn TemplateRepository>) -> Self {
        Self { templates }
    }

    pub async fn handle(
        &self,
        cmd: CreateTemplateCommand,
        metadata: CommandMetadata,
    ) -> Result<SurveyTemplate, DomainError> {
        // 1. Authorize
        metadata.session.require_admin()?;

        // 2. Fill the draft through typed edits
        let draft = Self::draft_from(cmd)?;

        // 3. Validate and persist
        let template = draft.build(TemplateId::generate(), Timestamp::now())?;
        self.templates.save(&template).await?;

        tracing::info!(
            template_id = %template.id(),
            topic = template.topic(),
            outcomes = template.outcomes().len(),
            correlation_id = %metadata.correlation_id(),
            "Template created"
        );
        Ok(template)
    }

    fn draft_from(cmd: CreateTemplateCommand) -> Result<TemplateDraft, DomainError> {
        let mut draft = TemplateDraft::new();
        draft.set_topic(cmd.topic);
        draft.set_question_count(cmd.question_count)?;

        // With no rows given, the blank starting row stays and fails the
        // name check on build.
        let placeholder = draft.outcomes().first().map(|row| row.id.clone());
        let has_rows = !cmd.outcomes.is_empty();
        for outcome in cmd.outcomes {
            let id = draft.add_outcome();
            draft.update_outcome(&id, OutcomeUpdate::Rename(outcome.name))?;
            draft.update_outcome(&id, outcome.traits.into())?;
        }
        if let Some(id) = placeholder.filter(|_| has_rows) {
            draft.remove_outcome(&id)?;
        }
        Ok(draft)
    }
}

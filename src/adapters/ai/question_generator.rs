//! AI-backed implementation of the QuestionGenerator port.

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

use crate::domain::foundation::OutcomeId;
use crate::domain::survey::{Question, QuestionOption, QuestionSet};
use crate::domain::template::SurveyTemplate;
use crate::domain::user::UserProfile;
use crate::ports::{
    AIProvider, CompletionRequest, GenerationError, QuestionGenerator, RequestMetadata,
};

use super::prompt::{question_prompt, question_schema, SYSTEM_PROMPT};

/// Generates questions by prompting an `AIProvider` for a JSON array.
pub struct AiQuestionGenerator {
    provider: Arc<dyn AIProvider>,
    temperature: Option<f32>,
}

impl AiQuestionGenerator {
    pub fn new(provider: Arc<dyn AIProvider>) -> Self {
        Self {
            provider,
            temperature: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    fn parse_questions(content: &str) -> Result<Vec<Question>, GenerationError> {
        let raw: Vec<WireQuestion> = serde_json::from_str(strip_code_fence(content))
            .map_err(|e| GenerationError::MalformedPayload(e.to_string()))?;

        raw.into_iter().map(WireQuestion::into_question).collect()
    }
}

#[async_trait]
impl QuestionGenerator for AiQuestionGenerator {
    async fn generate(
        &self,
        template: &SurveyTemplate,
        profile: &UserProfile,
    ) -> Result<QuestionSet, GenerationError> {
        let mut request = CompletionRequest::new(
            question_prompt(template, profile),
            RequestMetadata::new(uuid::Uuid::new_v4().to_string(), "question_generation"),
        )
        .with_system_prompt(SYSTEM_PROMPT)
        .with_json_response(Some(question_schema()));
        if let Some(temperature) = self.temperature {
            request = request.with_temperature(temperature);
        }

        let response = self.provider.complete(request).await?;
        let questions = Self::parse_questions(&response.content)?;
        let set = QuestionSet::validated(template, questions)?;

        tracing::info!(
            template_id = %template.id(),
            questions = set.len(),
            model = %response.model,
            tokens = response.usage.total_tokens,
            "Generated survey questions"
        );
        Ok(set)
    }
}

/// Removes a surrounding Markdown code fence, if the model added one.
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = rest.strip_prefix("json").unwrap_or(rest);
    body.strip_suffix("```").unwrap_or(body).trim()
}

#[derive(Debug, Deserialize)]
struct WireQuestion {
    id: u32,
    text: String,
    options: Vec<WireOption>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireOption {
    text: String,
    outcome_id: String,
}

impl WireQuestion {
    fn into_question(self) -> Result<Question, GenerationError> {
        let id = self.id;
        let options = self
            .options
            .into_iter()
            .map(|o| {
                let outcome_id = OutcomeId::new(o.outcome_id).map_err(|_| {
                    GenerationError::MalformedPayload(format!(
                        "question {} has an option without an outcome id",
                        id
                    ))
                })?;
                Ok(QuestionOption {
                    text: o.text,
                    outcome_id,
                })
            })
            .collect::<Result<Vec<_>, GenerationError>>()?;

        Ok(Question {
            id,
            text: self.text,
            options,
        })
    }
}

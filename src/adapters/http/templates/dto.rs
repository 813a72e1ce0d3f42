//! HTTP DTOs for template endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::template::{CreateTemplateCommand, NewOutcome};
use crate::domain::analysis::{DistributionEntry, ParticipantSummary, TemplateReport};
use crate::domain::foundation::Timestamp;
use crate::domain::template::{Outcome, QuestionCount, SurveyTemplate};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to create a template.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTemplateRequest {
    pub topic: String,
    #[serde(default = "default_question_count")]
    pub question_count: u8,
    pub outcomes: Vec<NewOutcome>,
}

fn default_question_count() -> u8 {
    QuestionCount::DEFAULT.value()
}

impl From<CreateTemplateRequest> for CreateTemplateCommand {
    fn from(req: CreateTemplateRequest) -> Self {
        Self {
            topic: req.topic,
            question_count: req.question_count,
            outcomes: req.outcomes,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutcomeResponse {
    pub id: String,
    pub name: String,
    pub traits: Vec<String>,
}

impl From<&Outcome> for OutcomeResponse {
    fn from(outcome: &Outcome) -> Self {
        Self {
            id: outcome.id().to_string(),
            name: outcome.name().to_string(),
            traits: outcome.traits().to_vec(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateResponse {
    pub id: String,
    pub topic: String,
    pub question_count: u8,
    pub outcomes: Vec<OutcomeResponse>,
    pub created_at: Timestamp,
}

impl From<&SurveyTemplate> for TemplateResponse {
    fn from(template: &SurveyTemplate) -> Self {
        Self {
            id: template.id().to_string(),
            topic: template.topic().to_string(),
            question_count: template.question_count().value(),
            outcomes: template.outcomes().iter().map(OutcomeResponse::from).collect(),
            created_at: *template.created_at(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateListResponse {
    pub templates: Vec<TemplateResponse>,
}

/// Dashboard report for one template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateReportResponse {
    pub template_id: String,
    pub topic: String,
    pub participants: usize,
    pub average_rating: f64,
    /// Average formatted to one decimal place.
    pub average_rating_display: String,
    pub unique_results: usize,
    pub distribution: Vec<DistributionEntry>,
    pub recent: Vec<ParticipantSummary>,
}

impl From<TemplateReport> for TemplateReportResponse {
    fn from(report: TemplateReport) -> Self {
        Self {
            average_rating_display: report.average_rating_display(),
            template_id: report.template_id.to_string(),
            topic: report.topic,
            participants: report.participants,
            average_rating: report.average_rating,
            unique_results: report.unique_results,
            distribution: report.distribution.entries().to_vec(),
            recent: report.recent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_defaults_question_count() {
        let json = r#"{"topic":"Pets","outcomes":[{"name":"Cat","traits":"calm, curious"}]}"#;
        let req: CreateTemplateRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.question_count, 5);

        let cmd: CreateTemplateCommand = req.into();
        assert_eq!(cmd.outcomes[0].name, "Cat");
    }
}

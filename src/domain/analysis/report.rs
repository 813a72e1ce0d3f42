//! Dashboard statistics for one template.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Rating, TemplateId, Timestamp};
use crate::domain::survey::SurveyResponse;
use crate::domain::template::SurveyTemplate;

use super::{average_rating, build_distribution, Distribution};

/// One row of the recent participants table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantSummary {
    pub user_name: String,
    pub result: String,
    pub rating: Rating,
    pub timestamp: Timestamp,
}

/// Aggregated view of all responses to a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateReport {
    pub template_id: TemplateId,
    pub topic: String,
    pub participants: usize,
    pub average_rating: f64,
    pub unique_results: usize,
    pub distribution: Distribution,
    /// Newest first.
    pub recent: Vec<ParticipantSummary>,
}

impl TemplateReport {
    /// Builds the report, ignoring responses to other templates.
    pub fn build<'a, I>(template: &SurveyTemplate, responses: I) -> Self
    where
        I: IntoIterator<Item = &'a SurveyResponse>,
    {
        let matching: Vec<&SurveyResponse> = responses
            .into_iter()
            .filter(|r| r.template_id() == template.id())
            .collect();

        let distribution = build_distribution(matching.iter().copied(), template.id());

        let mut recent: Vec<ParticipantSummary> = matching
            .iter()
            .map(|r| ParticipantSummary {
                user_name: r.user_name().to_string(),
                result: r.result().to_string(),
                rating: r.rating(),
                timestamp: *r.timestamp(),
            })
            .collect();
        recent.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        Self {
            template_id: template.id().clone(),
            topic: template.topic().to_string(),
            participants: matching.len(),
            average_rating: average_rating(matching.iter().copied()),
            unique_results: distribution.len(),
            distribution,
            recent,
        }
    }

    /// Average rating rounded to one decimal, e.g. `"4.3"`.
    pub fn average_rating_display(&self) -> String {
        format!("{:.1}", self.average_rating)
    }
}

//! SurveyResponse - the immutable record of a submitted attempt.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Rating, ResponseId, TemplateId, Timestamp, UserId};

/// A completed, rated and submitted survey.
///
/// Refers to the template and the participant by ID only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyResponse {
    id: ResponseId,
    template_id: TemplateId,
    user_id: UserId,
    user_name: String,
    result: String,
    rating: Rating,
    timestamp: Timestamp,
}

impl SurveyResponse {
    /// Records a new response with a generated ID and the current time.
    pub fn new(
        template_id: TemplateId,
        user_id: UserId,
        user_name: impl Into<String>,
        result: impl Into<String>,
        rating: Rating,
    ) -> Self {
        Self::reconstitute(
            ResponseId::generate(),
            template_id,
            user_id,
            user_name,
            result,
            rating,
            Timestamp::now(),
        )
    }

    /// Rebuilds a response from stored fields.
    pub fn reconstitute(
        id: ResponseId,
        template_id: TemplateId,
        user_id: UserId,
        user_name: impl Into<String>,
        result: impl Into<String>,
        rating: Rating,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            id,
            template_id,
            user_id,
            user_name: user_name.into(),
            result: result.into(),
            rating,
            timestamp,
        }
    }

    pub fn id(&self) -> &ResponseId {
        &self.id
    }

    pub fn template_id(&self) -> &TemplateId {
        &self.template_id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn result(&self) -> &str {
        &self.result
    }

    pub fn rating(&self) -> Rating {
        self.rating
    }

    pub fn timestamp(&self) -> &Timestamp {
        &self.timestamp
    }
}

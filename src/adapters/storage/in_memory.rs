//! In-Memory Store Adapter
//!
//! Implements every repository port in memory. Used for tests and for the
//! `memory` storage backend.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{AttemptId, DomainError, TemplateId, UserId};
use crate::domain::survey::{SurveyAttempt, SurveyResponse};
use crate::domain::template::SurveyTemplate;
use crate::domain::user::UserProfile;
use crate::ports::{
    next_attempt_write, next_profile_version, AttemptRepository, AttemptWrite, ProfileRepository,
    ResponseRepository, TemplateRepository,
};

/// In-memory storage for templates, profiles, responses and attempts.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    templates: Arc<RwLock<Vec<SurveyTemplate>>>,
    profiles: Arc<RwLock<HashMap<UserId, UserProfile>>>,
    responses: Arc<RwLock<Vec<SurveyResponse>>>,
    attempts: Arc<RwLock<HashMap<AttemptId, SurveyAttempt>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored responses (useful for tests)
    pub async fn response_count(&self) -> usize {
        self.responses.read().await.len()
    }

    /// Number of attempts in flight (useful for tests)
    pub async fn attempt_count(&self) -> usize {
        self.attempts.read().await.len()
    }
}

#[async_trait]
impl TemplateRepository for InMemoryStore {
    async fn list(&self) -> Result<Vec<SurveyTemplate>, DomainError> {
        Ok(self.templates.read().await.clone())
    }

    async fn find_by_id(&self, id: &TemplateId) -> Result<Option<SurveyTemplate>, DomainError> {
        Ok(self
            .templates
            .read()
            .await
            .iter()
            .find(|t| t.id() == id)
            .cloned())
    }

    async fn save(&self, template: &SurveyTemplate) -> Result<(), DomainError> {
        let mut templates = self.templates.write().await;
        match templates.iter_mut().find(|t| t.id() == template.id()) {
            Some(existing) => *existing = template.clone(),
            None => templates.push(template.clone()),
        }
        Ok(())
    }
}

#[async_trait]
impl ProfileRepository for InMemoryStore {
    async fn find(&self, user_id: &UserId) -> Result<Option<UserProfile>, DomainError> {
        Ok(self.profiles.read().await.get(user_id).cloned())
    }

    async fn save(&self, profile: UserProfile) -> Result<UserProfile, DomainError> {
        let mut profiles = self.profiles.write().await;
        let stored = profiles.get(profile.id()).map(UserProfile::version);
        let version = next_profile_version(stored, &profile)?;

        let saved = profile.with_version(version);
        profiles.insert(saved.id().clone(), saved.clone());
        Ok(saved)
    }
}

#[async_trait]
impl ResponseRepository for InMemoryStore {
    async fn list(&self) -> Result<Vec<SurveyResponse>, DomainError> {
        Ok(self.responses.read().await.clone())
    }

    async fn append(&self, response: &SurveyResponse) -> Result<SurveyResponse, DomainError> {
        let mut responses = self.responses.write().await;
        if let Some(existing) = responses.iter().find(|r| r.id() == response.id()) {
            return Ok(existing.clone());
        }
        responses.push(response.clone());
        Ok(response.clone())
    }
}

#[async_trait]
impl AttemptRepository for InMemoryStore {
    async fn find_by_id(&self, id: &AttemptId) -> Result<Option<SurveyAttempt>, DomainError> {
        Ok(self.attempts.read().await.get(id).cloned())
    }

    async fn save(&self, attempt: SurveyAttempt) -> Result<SurveyAttempt, DomainError> {
        let mut attempts = self.attempts.write().await;
        let stored = attempts.get(attempt.id()).map(SurveyAttempt::version);

        match next_attempt_write(stored, attempt)? {
            AttemptWrite::Store(saved) => {
                attempts.insert(*saved.id(), saved.clone());
                Ok(saved)
            }
            AttemptWrite::Evict(saved) => {
                attempts.remove(saved.id());
                Ok(saved)
            }
        }
    }
}

//! UserProfile aggregate root and its version counter.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::foundation::{DomainError, TemplateId, UserId, ValidationError};

/// Profile version for optimistic concurrency.
///
/// A profile that has never been stored is at version 0; every successful
/// save bumps it by one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileVersion(u64);

impl ProfileVersion {
    /// Version of a profile that has never been saved.
    pub fn unsaved() -> Self {
        Self(0)
    }

    pub fn from_u64(value: u64) -> Self {
        Self(value)
    }

    pub fn increment(&self) -> Self {
        Self(self.0 + 1)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ProfileVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A typed manual edit to a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ProfileUpdate {
    Rename(String),
    SetDemographics(String),
    AddInterest(String),
    RemoveInterest(String),
}

/// Whether completing a survey should also add the result to interests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurveyResultPolicy {
    pub record_as_interest: bool,
}

impl Default for SurveyResultPolicy {
    fn default() -> Self {
        Self {
            record_as_interest: true,
        }
    }
}

/// A participant's identity, interests and past survey results.
///
/// # Invariants
///
/// - `interests` holds no duplicates and keeps insertion order
/// - `history` maps template IDs to the last outcome name reached
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    id: UserId,
    name: String,
    interests: Vec<String>,
    demographics: String,
    history: BTreeMap<TemplateId, String>,
    #[serde(default)]
    version: ProfileVersion,
}

impl Default for UserProfile {
    /// The profile used when nothing has been stored yet.
    fn default() -> Self {
        Self {
            id: UserId::new(Self::DEFAULT_ID).unwrap_or_else(|_| UserId::generate()),
            name: "Alex Johnson".to_string(),
            interests: vec![
                "Technology".to_string(),
                "Fantasy Novels".to_string(),
                "Hiking".to_string(),
            ],
            demographics: "30-year-old software engineer living in Seattle".to_string(),
            history: BTreeMap::new(),
            version: ProfileVersion::unsaved(),
        }
    }
}

impl UserProfile {
    pub const DEFAULT_ID: &'static str = "user-1";

    /// Creates a profile from its parts at the unsaved version.
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        interests: Vec<String>,
        demographics: impl Into<String>,
    ) -> Self {
        let mut profile = Self {
            id,
            name: name.into(),
            interests: Vec::new(),
            demographics: demographics.into(),
            history: BTreeMap::new(),
            version: ProfileVersion::unsaved(),
        };
        for interest in interests {
            profile.push_interest(interest);
        }
        profile
    }

    /// The default profile re-keyed to another participant.
    pub fn default_for(id: UserId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn interests(&self) -> &[String] {
        &self.interests
    }

    pub fn demographics(&self) -> &str {
        &self.demographics
    }

    pub fn history(&self) -> &BTreeMap<TemplateId, String> {
        &self.history
    }

    pub fn history_for(&self, template_id: &TemplateId) -> Option<&str> {
        self.history.get(template_id).map(String::as_str)
    }

    pub fn has_interest(&self, interest: &str) -> bool {
        self.interests.iter().any(|i| i == interest)
    }

    pub fn version(&self) -> ProfileVersion {
        self.version
    }

    /// Returns the profile stamped with a stored version.
    pub fn with_version(mut self, version: ProfileVersion) -> Self {
        self.version = version;
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Updates
    // ─────────────────────────────────────────────────────────────────────────

    /// Applies a manual edit.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` for a blank name or a blank interest
    pub fn apply_update(&mut self, update: ProfileUpdate) -> Result<(), DomainError> {
        match update {
            ProfileUpdate::Rename(name) => {
                let name = name.trim();
                if name.is_empty() {
                    return Err(ValidationError::empty_field("name").into());
                }
                self.name = name.to_string();
            }
            ProfileUpdate::SetDemographics(demographics) => self.demographics = demographics,
            ProfileUpdate::AddInterest(interest) => {
                let interest = interest.trim();
                if interest.is_empty() {
                    return Err(ValidationError::empty_field("interest").into());
                }
                self.push_interest(interest.to_string());
            }
            ProfileUpdate::RemoveInterest(interest) => self.interests.retain(|i| *i != interest),
        }
        Ok(())
    }

    /// Records a finished survey on the profile.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if the template ID is blank
    pub fn record_survey_result(
        mut self,
        template_id: &TemplateId,
        result_name: &str,
        policy: SurveyResultPolicy,
    ) -> Result<Self, DomainError> {
        if template_id.is_blank() {
            return Err(ValidationError::empty_field("template_id").into());
        }
        if policy.record_as_interest {
            self.push_interest(result_name.to_string());
        }
        self.history
            .insert(template_id.clone(), result_name.to_string());
        Ok(self)
    }

    fn push_interest(&mut self, interest: String) {
        if !self.has_interest(&interest) {
            self.interests.push(interest);
        }
    }
}

/// Adds the result to interests (once) and sets the template's history entry.
///
/// # Errors
///
/// - `InvalidInput` if the template ID is blank
pub fn apply_survey_result(
    profile: UserProfile,
    template_id: &TemplateId,
    result_name: &str,
) -> Result<UserProfile, DomainError> {
    profile.record_survey_result(template_id, result_name, SurveyResultPolicy::default())
}

//! HTTP DTOs for profile endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::application::handlers::user::UpdateProfileCommand;
use crate::domain::user::{ProfileUpdate, UserProfile};

/// Request to edit the caller's profile.
///
/// ```json
/// {
///   "expected_version": 3,
///   "updates": [
///     { "type": "rename", "value": "Sam Lee" },
///     { "type": "add_interest", "value": "Chess" }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProfileRequest {
    pub updates: Vec<ProfileUpdate>,
    #[serde(default)]
    pub expected_version: Option<u64>,
}

impl From<UpdateProfileRequest> for UpdateProfileCommand {
    fn from(req: UpdateProfileRequest) -> Self {
        Self {
            updates: req.updates,
            expected_version: req.expected_version,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub id: String,
    pub name: String,
    pub interests: Vec<String>,
    pub demographics: String,
    /// Template ID to the last result obtained for it.
    pub history: BTreeMap<String, String>,
    pub version: u64,
}

impl From<&UserProfile> for ProfileResponse {
    fn from(profile: &UserProfile) -> Self {
        Self {
            id: profile.id().to_string(),
            name: profile.name().to_string(),
            interests: profile.interests().to_vec(),
            demographics: profile.demographics().to_string(),
            history: profile
                .history()
                .iter()
                .map(|(template, result)| (template.to_string(), result.clone()))
                .collect(),
            version: profile.version().as_u64(),
        }
    }
}

//! Feature flags configuration

use serde::Deserialize;

use crate::domain::user::SurveyResultPolicy;

/// Feature flags for enabling/disabling functionality
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureFlags {
    /// Add a completed survey's result to the participant's interests
    #[serde(default = "default_record_results_as_interests")]
    pub record_results_as_interests: bool,
}

impl FeatureFlags {
    pub fn survey_result_policy(&self) -> SurveyResultPolicy {
        SurveyResultPolicy {
            record_as_interest: self.record_results_as_interests,
        }
    }
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            record_results_as_interests: default_record_results_as_interests(),
        }
    }
}

fn default_record_results_as_interests() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_flags_defaults() {
        let flags = FeatureFlags::default();
        assert!(flags.record_results_as_interests);
        assert!(flags.survey_result_policy().record_as_interest);
    }

    #[test]
    fn test_feature_flags_deserialization() {
        let flags: FeatureFlags =
            serde_json::from_str(r#"{"record_results_as_interests": false}"#).unwrap();
        assert!(!flags.survey_result_policy().record_as_interest);

        let flags: FeatureFlags = serde_json::from_str("{}").unwrap();
        assert!(flags.record_results_as_interests);
    }
}

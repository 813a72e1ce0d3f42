//! User module - participant profiles.
//!
//! A profile is created on first use from documented defaults, edited
//! through typed `ProfileUpdate` commands, and updated whenever the
//! participant completes a survey.

mod profile;

pub use profile::{
    apply_survey_result, ProfileUpdate, ProfileVersion, SurveyResultPolicy, UserProfile,
};

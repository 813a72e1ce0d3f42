//! Survey progression states.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{ResponseId, StateMachine};

/// Where an attempt is in its lifecycle, with the data each state carries.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SurveyStatus {
    #[default]
    NotStarted,
    /// `step` is the index of the next unanswered question.
    InProgress { step: usize },
    /// Outcome resolved, awaiting rating and submission.
    Completed { result: String },
    Submitted {
        result: String,
        response_id: ResponseId,
    },
}

impl SurveyStatus {
    pub fn phase(&self) -> SurveyPhase {
        match self {
            SurveyStatus::NotStarted => SurveyPhase::NotStarted,
            SurveyStatus::InProgress { .. } => SurveyPhase::InProgress,
            SurveyStatus::Completed { .. } => SurveyPhase::Completed,
            SurveyStatus::Submitted { .. } => SurveyPhase::Submitted,
        }
    }

    /// The resolved outcome name once completed.
    pub fn result(&self) -> Option<&str> {
        match self {
            SurveyStatus::Completed { result } | SurveyStatus::Submitted { result, .. } => {
                Some(result)
            }
            _ => None,
        }
    }
}

/// Data-free view of `SurveyStatus` used for transition checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurveyPhase {
    NotStarted,
    InProgress,
    Completed,
    Submitted,
}

impl StateMachine for SurveyPhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        use SurveyPhase::*;
        matches!(
            (self, target),
            (NotStarted, InProgress)
                | (InProgress, InProgress)
                | (InProgress, Completed)
                | (Completed, Completed)
                | (Completed, Submitted)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use SurveyPhase::*;
        match self {
            NotStarted => vec![InProgress],
            InProgress => vec![InProgress, Completed],
            Completed => vec![Completed, Submitted],
            Submitted => vec![],
        }
    }
}

impl fmt::Display for SurveyPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SurveyPhase::NotStarted => "NotStarted",
            SurveyPhase::InProgress => "InProgress",
            SurveyPhase::Completed => "Completed",
            SurveyPhase::Submitted => "Submitted",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submitted_is_terminal() {
        assert!(SurveyPhase::Submitted.is_terminal());
        assert!(!SurveyPhase::Completed.is_terminal());
    }

    #[test]
    fn cannot_skip_back_from_completed() {
        assert!(SurveyPhase::Completed
            .transition_to(SurveyPhase::InProgress)
            .is_err());
    }

    #[test]
    fn cannot_submit_before_completion() {
        assert!(!SurveyPhase::InProgress.can_transition_to(&SurveyPhase::Submitted));
        assert!(!SurveyPhase::NotStarted.can_transition_to(&SurveyPhase::Submitted));
    }

    #[test]
    fn status_exposes_result_only_after_completion() {
        assert_eq!(SurveyStatus::InProgress { step: 2 }.result(), None);
        assert_eq!(
            SurveyStatus::Completed {
                result: "Gryffindor".into()
            }
            .result(),
            Some("Gryffindor")
        );
    }

    #[test]
    fn status_serializes_with_state_tag() {
        let json = serde_json::to_value(SurveyStatus::InProgress { step: 1 }).unwrap();
        assert_eq!(json["state"], "in_progress");
        assert_eq!(json["step"], 1);
    }
}

//! State machine trait for lifecycle enums.
//!
//! Provides validated transitions for status enums such as the survey
//! attempt phase. Invalid transitions surface as `PreconditionFailed`.

use super::DomainError;

/// Trait for status enums that represent state machines.
///
/// Implementors define the legal edges; `transition_to` and `is_terminal`
/// come for free.
///
/// # Example
///
/// ```ignore
/// impl StateMachine for SurveyPhase {
///     fn can_transition_to(&self, target: &Self) -> bool {
///         matches!((self, target), (NotStarted, InProgress) | (Completed, Submitted))
///     }
///
///     fn valid_transitions(&self) -> Vec<Self> { /* ... */ }
/// }
///
/// let next = phase.transition_to(SurveyPhase::Submitted)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, DomainError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(DomainError::precondition_failed(format!(
                "Cannot transition from {:?} to {:?}",
                self, target
            ))
            .with_detail("from", format!("{:?}", self))
            .with_detail("to", format!("{:?}", target)))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

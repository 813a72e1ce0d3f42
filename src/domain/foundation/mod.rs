//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, errors, and the session context
//! that form the vocabulary of the survey domain.

mod command;
mod errors;
mod ids;
mod rating;
mod session;
mod state_machine;
mod timestamp;

pub use command::CommandMetadata;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{AttemptId, OutcomeId, ResponseId, TemplateId, UserId};
pub use rating::Rating;
pub use session::{SessionContext, UserRole};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;

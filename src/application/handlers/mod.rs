//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations. Each
//! handler takes a `CommandMetadata` carrying the caller's session.

pub mod survey;
pub mod template;
pub mod user;

#[cfg(test)]
pub(crate) mod test_support;

pub use survey::{
    AnswerQuestionCommand, AnswerQuestionHandler, AnswerQuestionResult, GetAttemptHandler,
    RateSurveyCommand, RateSurveyHandler, StartSurveyCommand, StartSurveyHandler,
    SubmitSurveyCommand, SubmitSurveyHandler, SubmitSurveyResult,
};
pub use template::{
    CreateTemplateCommand, CreateTemplateHandler, GetTemplateHandler, GetTemplateReportHandler,
    ListTemplatesHandler, NewOutcome, TraitsInput,
};
pub use user::{GetProfileHandler, UpdateProfileCommand, UpdateProfileHandler};

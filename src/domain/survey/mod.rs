//! Survey module - generated questions, answers, attempts and responses.
//!
//! # State machine
//!
//! ```text
//! NotStarted ──answer──▶ InProgress(step) ──last answer──▶ Completed(result)
//!                            │    ▲                           │    ▲
//!                            └────┘ answer                    └────┘ rate
//!                                                             │
//!                                                          submit
//!                                                             ▼
//!                                                         Submitted
//! ```

mod answer;
mod attempt;
pub(crate) mod question;
mod response;
mod status;

pub use answer::Answer;
pub use attempt::{AttemptVersion, SurveyAttempt};
pub use question::{
    Question, QuestionId, QuestionOption, QuestionSet, QuestionSetError, OPTIONS_PER_QUESTION,
};
pub use response::SurveyResponse;
pub use status::{SurveyPhase, SurveyStatus};

//! Template module - survey definitions authored by administrators.

mod draft;
mod outcome;
#[allow(clippy::module_inception)]
mod template;

pub use draft::{OutcomeDraft, OutcomeUpdate, TemplateDraft};
pub use outcome::{parse_traits, Outcome};
pub use template::{QuestionCount, SurveyTemplate};

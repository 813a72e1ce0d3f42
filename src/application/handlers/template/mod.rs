//! Template command and query handlers.

mod create_template;
mod queries;

pub use create_template::{CreateTemplateCommand, CreateTemplateHandler, NewOutcome, TraitsInput};
pub use queries::{GetTemplateHandler, GetTemplateReportHandler, ListTemplatesHandler};

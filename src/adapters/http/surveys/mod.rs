//! HTTP adapter for survey endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    AnswerRequest, AnswerResponse, AttemptResponse, ProgressResponse, RatingRequest,
    SubmittedResponse,
};
pub use handlers::SurveyHandlers;
pub use routes::survey_routes;

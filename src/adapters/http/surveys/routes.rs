//! HTTP routes for survey endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};

use super::handlers::{
    answer_question, get_attempt, rate_survey, start_survey, submit_survey, SurveyHandlers,
};

/// Survey routes, relative to `/api`.
pub fn survey_routes(handlers: SurveyHandlers) -> Router {
    Router::new()
        .route("/templates/:id/surveys", post(start_survey))
        .route("/surveys/:id", get(get_attempt))
        .route("/surveys/:id/answers", post(answer_question))
        .route("/surveys/:id/rating", put(rate_survey))
        .route("/surveys/:id/submit", post(submit_survey))
        .with_state(handlers)
}

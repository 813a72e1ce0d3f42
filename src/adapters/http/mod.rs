//! HTTP adapters - REST API implementations.
//!
//! Each area has its own module with DTOs, handlers and routes. `api_router`
//! merges them under `/api` next to an unauthenticated `/health` probe.
//!
//! ```text
//! GET   /health
//! GET   /api/templates                 POST /api/templates
//! GET   /api/templates/:id             GET  /api/templates/:id/report
//! POST  /api/templates/:id/surveys
//! GET   /api/surveys/:id               POST /api/surveys/:id/answers
//! PUT   /api/surveys/:id/rating        POST /api/surveys/:id/submit
//! GET   /api/profile                   PATCH /api/profile
//! ```

pub mod error;
pub mod middleware;
pub mod profile;
pub mod surveys;
pub mod templates;

pub use error::{ApiError, ErrorResponse};
pub use profile::{profile_routes, ProfileHandlers};
pub use surveys::{survey_routes, SurveyHandlers};
pub use templates::{template_routes, TemplateHandlers};

use std::sync::Arc;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use crate::application::handlers::{
    AnswerQuestionHandler, CreateTemplateHandler, GetAttemptHandler, GetProfileHandler,
    GetTemplateHandler, GetTemplateReportHandler, ListTemplatesHandler, RateSurveyHandler,
    StartSurveyHandler, SubmitSurveyHandler, UpdateProfileHandler,
};
use crate::domain::user::SurveyResultPolicy;
use crate::ports::{
    AttemptRepository, ProfileRepository, QuestionGenerator, ResponseRepository,
    TemplateRepository,
};

/// Everything the HTTP layer needs, wired once at startup.
#[derive(Clone)]
pub struct AppState {
    pub templates: TemplateHandlers,
    pub surveys: SurveyHandlers,
    pub profile: ProfileHandlers,
}

impl AppState {
    /// Builds every handler over the given ports.
    pub fn new(
        templates: Arc<dyn TemplateRepository>,
        profiles: Arc<dyn ProfileRepository>,
        responses: Arc<dyn ResponseRepository>,
        attempts: Arc<dyn AttemptRepository>,
        generator: Arc<dyn QuestionGenerator>,
        policy: SurveyResultPolicy,
    ) -> Self {
        let template_handlers = TemplateHandlers::new(
            Arc::new(CreateTemplateHandler::new(templates.clone())),
            Arc::new(ListTemplatesHandler::new(templates.clone())),
            Arc::new(GetTemplateHandler::new(templates.clone())),
            Arc::new(GetTemplateReportHandler::new(
                templates.clone(),
                responses.clone(),
            )),
        );

        let survey_handlers = SurveyHandlers::new(
            Arc::new(StartSurveyHandler::new(
                templates.clone(),
                profiles.clone(),
                attempts.clone(),
                generator,
            )),
            Arc::new(GetAttemptHandler::new(attempts.clone())),
            Arc::new(AnswerQuestionHandler::new(
                attempts.clone(),
                profiles.clone(),
                policy,
            )),
            Arc::new(RateSurveyHandler::new(attempts.clone())),
            Arc::new(SubmitSurveyHandler::new(
                templates,
                profiles.clone(),
                responses,
                attempts,
            )),
        );

        let profile_handlers = ProfileHandlers::new(
            Arc::new(GetProfileHandler::new(profiles.clone())),
            Arc::new(UpdateProfileHandler::new(profiles)),
        );

        Self {
            templates: template_handlers,
            surveys: survey_handlers,
            profile: profile_handlers,
        }
    }
}

/// The full API router, without transport layers.
pub fn api_router(state: AppState) -> Router {
    let api = template_routes(state.templates)
        .merge(survey_routes(state.surveys))
        .merge(profile_routes(state.profile));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
}

/// GET /health - Liveness probe
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

//! HTTP handlers for survey endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::SessionMetadata;
use crate::adapters::http::profile::ProfileResponse;
use crate::application::handlers::survey::{
    AnswerQuestionCommand, AnswerQuestionHandler, GetAttemptHandler, RateSurveyCommand,
    RateSurveyHandler, StartSurveyCommand, StartSurveyHandler, SubmitSurveyCommand,
    SubmitSurveyHandler,
};
use crate::domain::foundation::{AttemptId, DomainError, OutcomeId, TemplateId};

use super::dto::{
    AnswerRequest, AnswerResponse, AttemptResponse, RatingRequest, SubmittedResponse,
};

#[derive(Clone)]
pub struct SurveyHandlers {
    start_handler: Arc<StartSurveyHandler>,
    get_handler: Arc<GetAttemptHandler>,
    answer_handler: Arc<AnswerQuestionHandler>,
    rate_handler: Arc<RateSurveyHandler>,
    submit_handler: Arc<SubmitSurveyHandler>,
}

impl SurveyHandlers {
    pub fn new(
        start_handler: Arc<StartSurveyHandler>,
        get_handler: Arc<GetAttemptHandler>,
        answer_handler: Arc<AnswerQuestionHandler>,
        rate_handler: Arc<RateSurveyHandler>,
        submit_handler: Arc<SubmitSurveyHandler>,
    ) -> Self {
        Self {
            start_handler,
            get_handler,
            answer_handler,
            rate_handler,
            submit_handler,
        }
    }
}

fn parse_attempt_id(raw: &str) -> Result<AttemptId, ApiError> {
    raw.parse().map_err(|_| {
        ApiError::from(DomainError::validation(
            "attempt_id",
            format!("'{}' is not a valid ID", raw),
        ))
    })
}

/// POST /api/templates/:id/surveys - Start a survey
pub async fn start_survey(
    State(handlers): State<SurveyHandlers>,
    SessionMetadata(metadata): SessionMetadata,
    Path(template_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = StartSurveyCommand {
        template_id: template_id.parse::<TemplateId>()?,
    };
    let attempt = handlers.start_handler.handle(cmd, metadata).await?;
    Ok((StatusCode::CREATED, Json(AttemptResponse::from(&attempt))))
}

/// GET /api/surveys/:id - Current state of an attempt
pub async fn get_attempt(
    State(handlers): State<SurveyHandlers>,
    SessionMetadata(metadata): SessionMetadata,
    Path(id): Path<String>,
) -> Result<Json<AttemptResponse>, ApiError> {
    let id = parse_attempt_id(&id)?;
    let attempt = handlers.get_handler.handle(&id, metadata).await?;
    Ok(Json(AttemptResponse::from(&attempt)))
}

/// POST /api/surveys/:id/answers - Answer the current question
pub async fn answer_question(
    State(handlers): State<SurveyHandlers>,
    SessionMetadata(metadata): SessionMetadata,
    Path(id): Path<String>,
    Json(req): Json<AnswerRequest>,
) -> Result<Json<AnswerResponse>, ApiError> {
    let cmd = AnswerQuestionCommand {
        attempt_id: parse_attempt_id(&id)?,
        question_id: req.question_id,
        outcome_id: req.outcome_id.parse::<OutcomeId>()?,
    };
    let result = handlers.answer_handler.handle(cmd, metadata).await?;
    Ok(Json(AnswerResponse {
        attempt: AttemptResponse::from(&result.attempt),
        profile: result.profile.as_ref().map(ProfileResponse::from),
    }))
}

/// PUT /api/surveys/:id/rating - Rate a completed survey
pub async fn rate_survey(
    State(handlers): State<SurveyHandlers>,
    SessionMetadata(metadata): SessionMetadata,
    Path(id): Path<String>,
    Json(req): Json<RatingRequest>,
) -> Result<Json<AttemptResponse>, ApiError> {
    let cmd = RateSurveyCommand {
        attempt_id: parse_attempt_id(&id)?,
        rating: req.rating,
    };
    let attempt = handlers.rate_handler.handle(cmd, metadata).await?;
    Ok(Json(AttemptResponse::from(&attempt)))
}

/// POST /api/surveys/:id/submit - Submit a rated survey
pub async fn submit_survey(
    State(handlers): State<SurveyHandlers>,
    SessionMetadata(metadata): SessionMetadata,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = SubmitSurveyCommand {
        attempt_id: parse_attempt_id(&id)?,
    };
    let result = handlers.submit_handler.handle(cmd, metadata).await?;
    Ok((
        StatusCode::CREATED,
        Json(SubmittedResponse::from(&result.response)),
    ))
}

//! HTTP handlers for template endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::SessionMetadata;
use crate::application::handlers::template::{
    CreateTemplateHandler, GetTemplateHandler, GetTemplateReportHandler, ListTemplatesHandler,
};
use crate::domain::foundation::TemplateId;

use super::dto::{
    CreateTemplateRequest, TemplateListResponse, TemplateReportResponse, TemplateResponse,
};

#[derive(Clone)]
pub struct TemplateHandlers {
    create_handler: Arc<CreateTemplateHandler>,
    list_handler: Arc<ListTemplatesHandler>,
    get_handler: Arc<GetTemplateHandler>,
    report_handler: Arc<GetTemplateReportHandler>,
}

impl TemplateHandlers {
    pub fn new(
        create_handler: Arc<CreateTemplateHandler>,
        list_handler: Arc<ListTemplatesHandler>,
        get_handler: Arc<GetTemplateHandler>,
        report_handler: Arc<GetTemplateReportHandler>,
    ) -> Self {
        Self {
            create_handler,
            list_handler,
            get_handler,
            report_handler,
        }
    }
}

/// POST /api/templates - Create a template (admin)
pub async fn create_template(
    State(handlers): State<TemplateHandlers>,
    SessionMetadata(metadata): SessionMetadata,
    Json(req): Json<CreateTemplateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let template = handlers.create_handler.handle(req.into(), metadata).await?;
    Ok((StatusCode::CREATED, Json(TemplateResponse::from(&template))))
}

/// GET /api/templates - List templates
pub async fn list_templates(
    State(handlers): State<TemplateHandlers>,
    SessionMetadata(metadata): SessionMetadata,
) -> Result<Json<TemplateListResponse>, ApiError> {
    let templates = handlers.list_handler.handle(metadata).await?;
    Ok(Json(TemplateListResponse {
        templates: templates.iter().map(TemplateResponse::from).collect(),
    }))
}

/// GET /api/templates/:id - Get one template
pub async fn get_template(
    State(handlers): State<TemplateHandlers>,
    SessionMetadata(metadata): SessionMetadata,
    Path(id): Path<String>,
) -> Result<Json<TemplateResponse>, ApiError> {
    let id: TemplateId = id.parse()?;
    let template = handlers.get_handler.handle(&id, metadata).await?;
    Ok(Json(TemplateResponse::from(&template)))
}

/// GET /api/templates/:id/report - Dashboard report (admin)
pub async fn get_template_report(
    State(handlers): State<TemplateHandlers>,
    SessionMetadata(metadata): SessionMetadata,
    Path(id): Path<String>,
) -> Result<Json<TemplateReportResponse>, ApiError> {
    let id: TemplateId = id.parse()?;
    let report = handlers.report_handler.handle(&id, metadata).await?;
    Ok(Json(report.into()))
}

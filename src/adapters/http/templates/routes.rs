//! HTTP routes for template endpoints.

use axum::{routing::get, Router};

use super::handlers::{
    create_template, get_template, get_template_report, list_templates, TemplateHandlers,
};

/// Template routes, relative to `/api`.
pub fn template_routes(handlers: TemplateHandlers) -> Router {
    Router::new()
        .route("/templates", get(list_templates).post(create_template))
        .route("/templates/:id", get(get_template))
        .route("/templates/:id/report", get(get_template_report))
        .with_state(handlers)
}

//! HTTP adapter for template endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    CreateTemplateRequest, OutcomeResponse, TemplateListResponse, TemplateReportResponse,
    TemplateResponse,
};
pub use handlers::TemplateHandlers;
pub use routes::template_routes;

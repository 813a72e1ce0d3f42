//! HTTP handlers for profile endpoints.

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::SessionMetadata;
use crate::application::handlers::user::{GetProfileHandler, UpdateProfileHandler};

use super::dto::{ProfileResponse, UpdateProfileRequest};

#[derive(Clone)]
pub struct ProfileHandlers {
    get_handler: Arc<GetProfileHandler>,
    update_handler: Arc<UpdateProfileHandler>,
}

impl ProfileHandlers {
    pub fn new(
        get_handler: Arc<GetProfileHandler>,
        update_handler: Arc<UpdateProfileHandler>,
    ) -> Self {
        Self {
            get_handler,
            update_handler,
        }
    }
}

/// GET /api/profile - The caller's profile
pub async fn get_profile(
    State(handlers): State<ProfileHandlers>,
    SessionMetadata(metadata): SessionMetadata,
) -> Result<Json<ProfileResponse>, ApiError> {
    let profile = handlers.get_handler.handle(metadata).await?;
    Ok(Json(ProfileResponse::from(&profile)))
}

/// PATCH /api/profile - Apply typed edits
pub async fn update_profile(
    State(handlers): State<ProfileHandlers>,
    SessionMetadata(metadata): SessionMetadata,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let profile = handlers.update_handler.handle(req.into(), metadata).await?;
    Ok(Json(ProfileResponse::from(&profile)))
}

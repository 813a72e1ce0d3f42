//! HTTP routes for profile endpoints.

use axum::{routing::get, Router};

use super::handlers::{get_profile, update_profile, ProfileHandlers};

/// Profile routes, relative to `/api`.
pub fn profile_routes(handlers: ProfileHandlers) -> Router {
    Router::new()
        .route("/profile", get(get_profile).patch(update_profile))
        .with_state(handlers)
}

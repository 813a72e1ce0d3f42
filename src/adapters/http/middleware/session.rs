//! Session extractor for axum.
//!
//! Sign-in is a plain role choice, so the session travels in two headers:
//!
//! ```text
//! X-User-Id: user-1
//! X-User-Role: ADMIN | USER      (optional, defaults to USER)
//! ```
//!
//! # Example
//!
//! ```ignore
//! async fn my_handler(RequireSession(session): RequireSession) -> impl IntoResponse {
//!     format!("Hello, {}!", session.user_id)
//! }
//! ```

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::adapters::http::error::ApiError;
use crate::domain::foundation::{
    CommandMetadata, DomainError, ErrorCode, SessionContext, UserId, UserRole,
};

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Extractor that requires a session.
///
/// Rejects with 401 when the user header is missing or blank, and with 400
/// for an unknown role.
#[derive(Debug, Clone)]
pub struct RequireSession(pub SessionContext);

impl RequireSession {
    pub fn into_metadata(self, request_id: Option<String>) -> CommandMetadata {
        let metadata = CommandMetadata::new(self.0);
        match request_id {
            Some(id) => metadata.with_correlation_id(id),
            None => metadata,
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RequireSession
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = header(parts, USER_ID_HEADER)
            .and_then(|raw| UserId::new(raw).ok())
            .ok_or_else(|| {
                DomainError::new(ErrorCode::Unauthorized, "Sign in to continue")
                    .with_detail("header", USER_ID_HEADER)
            })?;

        let role = match header(parts, USER_ROLE_HEADER) {
            Some(raw) => raw.parse::<UserRole>().map_err(DomainError::from)?,
            None => UserRole::User,
        };

        Ok(RequireSession(SessionContext::new(user_id, role)))
    }
}

/// Session plus request correlation, ready to hand to a command handler.
#[derive(Debug, Clone)]
pub struct SessionMetadata(pub CommandMetadata);

#[async_trait]
impl<S> FromRequestParts<S> for SessionMetadata
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = RequireSession::from_request_parts(parts, state).await?;
        let request_id = header(parts, REQUEST_ID_HEADER).map(str::to_string);
        Ok(SessionMetadata(session.into_metadata(request_id)))
    }
}

fn header<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts
        .headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

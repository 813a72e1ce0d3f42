//! HTTP middleware for axum.
//!
//! - `session` - Session extractors read from request headers

pub mod session;

pub use session::{
    RequireSession, SessionMetadata, REQUEST_ID_HEADER, USER_ID_HEADER, USER_ROLE_HEADER,
};

//! Command infrastructure for application handlers.
//!
//! `CommandMetadata` carries the caller's session and request correlation
//! through every handler, instead of each handler reading global state.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{SessionContext, UserId, UserRole};

/// Metadata context for command and query handlers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMetadata {
    /// The caller executing this command.
    pub session: SessionContext,

    /// Links related operations across a single user request.
    #[serde(skip_serializing_if = "Option::is_none")]
    correlation_id: Option<String>,
}

impl CommandMetadata {
    /// Creates new command metadata for a session.
    pub fn new(session: SessionContext) -> Self {
        Self {
            session,
            correlation_id: None,
        }
    }

    /// Builder: Add correlation ID for request tracing.
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    /// Returns the correlation ID, generating a fresh one if absent.
    pub fn correlation_id(&self) -> String {
        self.correlation_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string())
    }

    /// Returns the caller's user ID.
    pub fn user_id(&self) -> &UserId {
        &self.session.user_id
    }

    /// Returns the caller's role.
    pub fn role(&self) -> UserRole {
        self.session.role
    }
}

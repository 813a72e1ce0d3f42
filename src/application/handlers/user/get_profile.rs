//! GetProfileHandler - the caller's profile, or the documented default.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, DomainError};
use crate::domain::user::UserProfile;
use crate::ports::ProfileRepository;

pub struct GetProfileHandler {
    profiles: Arc<dyn ProfileRepository>,
}

impl GetProfileHandler {
    pub fn new(profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { profiles }
    }

    pub async fn handle(&self, metadata: CommandMetadata) -> Result<UserProfile, DomainError> {
        self.profiles.find_or_default(metadata.user_id()).await
    }
}

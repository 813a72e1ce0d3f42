//! UpdateProfileHandler - applies typed edits to the caller's profile.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, DomainError, ErrorCode};
use crate::domain::user::{ProfileUpdate, ProfileVersion, UserProfile};
use crate::ports::ProfileRepository;

/// Command to edit a profile.
///
/// With `expected_version` set, the edit is refused if the profile has
/// moved on since the client read it.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfileCommand {
    pub updates: Vec<ProfileUpdate>,
    pub expected_version: Option<u64>,
}

pub struct UpdateProfileHandler {
    profiles: Arc<dyn ProfileRepository>,
}

impl UpdateProfileHandler {
    pub fn new(profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { profiles }
    }

    pub async fn handle(
        &self,
        cmd: UpdateProfileCommand,
        metadata: CommandMetadata,
    ) -> Result<UserProfile, DomainError> {
        let mut profile = self.profiles.find_or_default(metadata.user_id()).await?;

        if let Some(expected) = cmd.expected_version.map(ProfileVersion::from_u64) {
            if expected != profile.version() {
                return Err(DomainError::new(
                    ErrorCode::ConcurrentModification,
                    format!(
                        "Profile is at version {}, not {}",
                        profile.version(),
                        expected
                    ),
                ));
            }
        }

        // All edits apply or none do.
        for update in cmd.updates {
            profile.apply_update(update)?;
        }

        let saved = self.profiles.save(profile).await?;
        tracing::info!(
            user_id = %saved.id(),
            version = %saved.version(),
            "Profile updated"
        );
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryStore;
    use crate::application::handlers::test_support::participant;

    #[tokio::test]
    async fn applies_updates_in_order() {
        let store = Arc::new(InMemoryStore::new());
        let handler = UpdateProfileHandler::new(store);
        let cmd = UpdateProfileCommand {
            updates: vec![
                ProfileUpdate::Rename("Sam Lee".into()),
                ProfileUpdate::AddInterest("Chess".into()),
                ProfileUpdate::RemoveInterest("Hiking".into()),
            ],
            expected_version: Some(0),
        };

        let profile = handler.handle(cmd, participant()).await.unwrap();

        assert_eq!(profile.name(), "Sam Lee");
        assert_eq!(
            profile.interests(),
            ["Technology", "Fantasy Novels", "Chess"]
        );
        assert_eq!(profile.version().as_u64(), 1);
    }

    #[tokio::test]
    async fn stale_expected_version_is_rejected() {
        let store = Arc::new(InMemoryStore::new());
        let handler = UpdateProfileHandler::new(store);
        handler
            .handle(UpdateProfileCommand::default(), participant())
            .await
            .unwrap();

        let cmd = UpdateProfileCommand {
            updates: vec![ProfileUpdate::Rename("Late".into())],
            expected_version: Some(0),
        };
        let err = handler.handle(cmd, participant()).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::ConcurrentModification);
    }

    #[tokio::test]
    async fn invalid_edit_saves_nothing() {
        let store = Arc::new(InMemoryStore::new());
        let handler = UpdateProfileHandler::new(store.clone());
        let cmd = UpdateProfileCommand {
            updates: vec![
                ProfileUpdate::AddInterest("Chess".into()),
                ProfileUpdate::Rename("   ".into()),
            ],
            expected_version: None,
        };

        let err = handler.handle(cmd, participant()).await.unwrap_err();

        assert_eq!(err.code(), ErrorCode::InvalidInput);
        let user = participant();
        assert!(store.find(user.user_id()).await.unwrap().is_none());
    }
}

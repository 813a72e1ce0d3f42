//! Repository ports for templates, profiles, responses and attempts.
//!
//! Missing data is reported through typed results (`None`, an empty list,
//! or the default profile) rather than errors.

use async_trait::async_trait;

use crate::domain::foundation::{AttemptId, DomainError, ErrorCode, TemplateId, UserId};
use crate::domain::survey::{AttemptVersion, SurveyAttempt, SurveyPhase, SurveyResponse};
use crate::domain::template::SurveyTemplate;
use crate::domain::user::{ProfileVersion, UserProfile};

/// Storage for authored templates.
#[async_trait]
pub trait TemplateRepository: Send + Sync {
    /// All templates in creation order.
    async fn list(&self) -> Result<Vec<SurveyTemplate>, DomainError>;

    async fn find_by_id(&self, id: &TemplateId) -> Result<Option<SurveyTemplate>, DomainError>;

    /// Inserts or replaces a template.
    async fn save(&self, template: &SurveyTemplate) -> Result<(), DomainError>;
}

/// Storage for participant profiles with optimistic versioning.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn find(&self, user_id: &UserId) -> Result<Option<UserProfile>, DomainError>;

    /// Returns the stored profile, or the default profile for this user.
    async fn find_or_default(&self, user_id: &UserId) -> Result<UserProfile, DomainError> {
        Ok(self
            .find(user_id)
            .await?
            .unwrap_or_else(|| UserProfile::default_for(user_id.clone())))
    }

    /// Stores the profile if its version matches the stored one.
    ///
    /// Returns the profile stamped with its new version.
    ///
    /// # Errors
    ///
    /// - `ConcurrentModification` if the stored version moved on
    async fn save(&self, profile: UserProfile) -> Result<UserProfile, DomainError>;
}

/// Append-only storage for submitted responses.
#[async_trait]
pub trait ResponseRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<SurveyResponse>, DomainError>;

    async fn list_by_template(
        &self,
        template_id: &TemplateId,
    ) -> Result<Vec<SurveyResponse>, DomainError> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|r| r.template_id() == template_id)
            .collect())
    }

    /// Records a response once per response ID.
    ///
    /// Returns the stored response: the given one, or the one already
    /// recorded under the same ID.
    async fn append(&self, response: &SurveyResponse) -> Result<SurveyResponse, DomainError>;
}

/// Storage for attempts in flight, with optimistic versioning.
#[async_trait]
pub trait AttemptRepository: Send + Sync {
    async fn find_by_id(&self, id: &AttemptId) -> Result<Option<SurveyAttempt>, DomainError>;

    /// Stores the attempt if its version matches the stored one.
    ///
    /// A submitted attempt is evicted instead of stored; its response is
    /// the lasting record. Returns the attempt stamped with its new version.
    ///
    /// # Errors
    ///
    /// - `ConcurrentModification` if the stored attempt moved on, or was
    ///   already submitted and evicted
    async fn save(&self, attempt: SurveyAttempt) -> Result<SurveyAttempt, DomainError>;
}

/// What a store does with an attempt that passed the version check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptWrite {
    Store(SurveyAttempt),
    Evict(SurveyAttempt),
}

/// Checks an incoming attempt against the stored version and decides
/// whether to keep it.
///
/// `stored` is `None` when the attempt is new or already evicted.
pub fn next_attempt_write(
    stored: Option<AttemptVersion>,
    incoming: SurveyAttempt,
) -> Result<AttemptWrite, DomainError> {
    let current = stored.unwrap_or_else(AttemptVersion::unsaved);
    if current != incoming.version() {
        return Err(DomainError::new(
            ErrorCode::ConcurrentModification,
            format!(
                "Survey attempt {} was modified concurrently (expected version {}, found {})",
                incoming.id(),
                incoming.version(),
                current
            ),
        )
        .with_detail("expected_version", incoming.version().to_string())
        .with_detail("actual_version", current.to_string()));
    }

    let saved = incoming.with_version(current.increment());
    Ok(if saved.phase() == SurveyPhase::Submitted {
        AttemptWrite::Evict(saved)
    } else {
        AttemptWrite::Store(saved)
    })
}

/// Checks an incoming save against the stored version and returns the
/// version to store.
///
/// `stored` is `None` when the profile has never been saved.
pub fn next_profile_version(
    stored: Option<ProfileVersion>,
    incoming: &UserProfile,
) -> Result<ProfileVersion, DomainError> {
    let current = stored.unwrap_or_else(ProfileVersion::unsaved);
    if current != incoming.version() {
        return Err(DomainError::new(
            ErrorCode::ConcurrentModification,
            format!(
                "Profile {} was modified concurrently (expected version {}, found {})",
                incoming.id(),
                incoming.version(),
                current
            ),
        )
        .with_detail("expected_version", incoming.version().to_string())
        .with_detail("actual_version", current.to_string()));
    }
    Ok(current.increment())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{OutcomeId, Rating, UserId};
    use crate::domain::survey::question::test_support::{house_template, questions};
    use crate::domain::survey::{Answer, QuestionSet};

    #[test]
    fn first_save_moves_to_version_one() {
        let next = next_profile_version(None, &UserProfile::default()).unwrap();
        assert_eq!(next.as_u64(), 1);
    }

    #[test]
    fn stale_version_is_concurrent_modification() {
        let stale = UserProfile::default().with_version(ProfileVersion::from_u64(1));
        let err = next_profile_version(Some(ProfileVersion::from_u64(2)), &stale).unwrap_err();
        assert_eq!(err.code(), ErrorCode::ConcurrentModification);
    }

    fn attempt() -> SurveyAttempt {
        let template = house_template(3);
        let set = QuestionSet::validated(&template, questions(3)).unwrap();
        SurveyAttempt::start(template, UserId::new("user-1").unwrap(), set)
    }

    #[test]
    fn new_attempt_is_stored_at_version_one() {
        match next_attempt_write(None, attempt()).unwrap() {
            AttemptWrite::Store(saved) => assert_eq!(saved.version().as_u64(), 1),
            other => panic!("expected Store, got {:?}", other),
        }
    }

    #[test]
    fn stale_attempt_is_concurrent_modification() {
        let stale = attempt().with_version(AttemptVersion::from_u64(1));
        let err = next_attempt_write(Some(AttemptVersion::from_u64(2)), stale).unwrap_err();
        assert_eq!(err.code(), ErrorCode::ConcurrentModification);
    }

    #[test]
    fn evicted_attempt_cannot_be_saved_again() {
        let saved = attempt().with_version(AttemptVersion::from_u64(4));
        let err = next_attempt_write(None, saved).unwrap_err();
        assert_eq!(err.code(), ErrorCode::ConcurrentModification);
    }

    #[test]
    fn submitted_attempt_is_evicted() {
        let mut a = attempt().with_version(AttemptVersion::from_u64(4));
        for id in 1..=3 {
            a.answer(Answer::new(id, OutcomeId::new("a").unwrap())).unwrap();
        }
        a.rate(Rating::new(3).unwrap()).unwrap();
        a.submit("Alex Johnson").unwrap();

        let write = next_attempt_write(Some(AttemptVersion::from_u64(4)), a).unwrap();
        assert!(matches!(write, AttemptWrite::Evict(ref s) if s.version().as_u64() == 5));
    }

    #[test]
    fn unsaved_profile_conflicts_with_stored_one() {
        let err =
            next_profile_version(Some(ProfileVersion::from_u64(1)), &UserProfile::default())
                .unwrap_err();
        assert_eq!(err.code(), ErrorCode::ConcurrentModification);
    }
}

//! AnswerQuestionHandler - records one answer and, on the last one, folds
//! the resolved outcome into the participant's profile.

use std::sync::Arc;

use crate::domain::foundation::{AttemptId, CommandMetadata, DomainError, OutcomeId};
use crate::domain::survey::{Answer, QuestionId, SurveyAttempt, SurveyStatus};
use crate::domain::user::{SurveyResultPolicy, UserProfile};
use crate::ports::{AttemptRepository, ProfileRepository};

use super::load_owned_attempt;

/// Command to answer the current question.
#[derive(Debug, Clone)]
pub struct AnswerQuestionCommand {
    pub attempt_id: AttemptId,
    pub question_id: QuestionId,
    pub outcome_id: OutcomeId,
}

/// Result of answering.
#[derive(Debug, Clone)]
pub struct AnswerQuestionResult {
    pub attempt: SurveyAttempt,
    /// The updated profile when this answer completed the survey.
    pub profile: Option<UserProfile>,
}

/// Handler for answering questions.
pub struct AnswerQuestionHandler {
    attempts: Arc<dyn AttemptRepository>,
    profiles: Arc<dyn ProfileRepository>,
    policy: SurveyResultPolicy,
}

impl AnswerQuestionHandler {
    pub fn new(
        attempts: Arc<dyn AttemptRepository>,
        profiles: Arc<dyn ProfileRepository>,
        policy: SurveyResultPolicy,
    ) -> Self {
        Self {
            attempts,
            profiles,
            policy,
        }
    }

    pub async fn handle(
        &self,
        cmd: AnswerQuestionCommand,
        metadata: CommandMetadata,
    ) -> Result<AnswerQuestionResult, DomainError> {
        let mut attempt =
            load_owned_attempt(self.attempts.as_ref(), &cmd.attempt_id, &metadata).await?;

        let status = attempt
            .answer(Answer::new(cmd.question_id, cmd.outcome_id))?
            .clone();

        // The profile is written before the attempt so a version conflict
        // leaves the attempt on its last question, ready to retry.
        let profile = match status {
            SurveyStatus::Completed { ref result } => {
                let profile = self.profiles.find_or_default(metadata.user_id()).await?;
                let updated =
                    profile.record_survey_result(attempt.template().id(), result, self.policy)?;
                let saved = self.profiles.save(updated).await?;

                tracing::info!(
                    attempt_id = %attempt.id(),
                    result = result.as_str(),
                    profile_version = %saved.version(),
                    "Survey completed"
                );
                Some(saved)
            }
            _ => None,
        };

        let attempt = self.attempts.save(attempt).await?;
        Ok(AnswerQuestionResult { attempt, profile })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryStore;
    use crate::application::handlers::test_support::{
        houses_template, participant, participant_as,
    };
    use crate::domain::foundation::{ErrorCode, UserId};
    use crate::domain::survey::question::test_support::questions;
    use crate::domain::survey::{QuestionSet, SurveyPhase};

    async fn setup(
        policy: SurveyResultPolicy,
    ) -> (Arc<InMemoryStore>, AnswerQuestionHandler, AttemptId) {
        let store = Arc::new(InMemoryStore::new());
        let template = houses_template();
        let set = QuestionSet::validated(&template, questions(3)).unwrap();
        let attempt = SurveyAttempt::start(template, UserId::new("user-1").unwrap(), set);
        AttemptRepository::save(store.as_ref(), attempt.clone()).await.unwrap();

        let handler = AnswerQuestionHandler::new(store.clone(), store.clone(), policy);
        (store, handler, *attempt.id())
    }

    fn cmd(attempt_id: AttemptId, question_id: QuestionId, outcome: &str) -> AnswerQuestionCommand {
        AnswerQuestionCommand {
            attempt_id,
            question_id,
            outcome_id: OutcomeId::new(outcome).unwrap(),
        }
    }

    #[tokio::test]
    async fn intermediate_answers_only_advance_the_attempt() {
        let (store, handler, id) = setup(SurveyResultPolicy::default()).await;

        let result = handler.handle(cmd(id, 1, "a"), participant()).await.unwrap();

        assert_eq!(result.attempt.status(), &SurveyStatus::InProgress { step: 1 });
        assert!(result.profile.is_none());
        assert!(store
            .find(&UserId::new("user-1").unwrap())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn last_answer_completes_and_updates_profile() {
        let (store, handler, id) = setup(SurveyResultPolicy::default()).await;
        handler.handle(cmd(id, 1, "b"), participant()).await.unwrap();
        handler.handle(cmd(id, 2, "a"), participant()).await.unwrap();

        let result = handler.handle(cmd(id, 3, "b"), participant()).await.unwrap();

        assert_eq!(result.attempt.result(), Some("Slytherin"));
        let profile = result.profile.unwrap();
        assert!(profile.has_interest("Slytherin"));
        assert_eq!(profile.history_for(houses_template().id()), Some("Slytherin"));
        assert_eq!(profile.version().as_u64(), 1);

        let stored = AttemptRepository::find_by_id(store.as_ref(), &id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.phase(), SurveyPhase::Completed);
    }

    #[tokio::test]
    async fn policy_can_keep_results_out_of_interests() {
        let (_store, handler, id) = setup(SurveyResultPolicy {
            record_as_interest: false,
        })
        .await;
        handler.handle(cmd(id, 1, "a"), participant()).await.unwrap();
        handler.handle(cmd(id, 2, "a"), participant()).await.unwrap();

        let result = handler.handle(cmd(id, 3, "a"), participant()).await.unwrap();

        let profile = result.profile.unwrap();
        assert!(!profile.has_interest("Gryffindor"));
        assert_eq!(profile.history_for(houses_template().id()), Some("Gryffindor"));
    }

    #[tokio::test]
    async fn completed_attempt_rejects_further_answers() {
        let (_store, handler, id) = setup(SurveyResultPolicy::default()).await;
        for q in 1..=3 {
            handler.handle(cmd(id, q, "a"), participant()).await.unwrap();
        }

        let err = handler.handle(cmd(id, 3, "a"), participant()).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::PreconditionFailed);
    }

    #[tokio::test]
    async fn concurrent_answers_to_one_step_record_one() {
        let (store, handler, id) = setup(SurveyResultPolicy::default()).await;

        let (first, second) = tokio::join!(
            handler.handle(cmd(id, 1, "a"), participant()),
            handler.handle(cmd(id, 1, "b"), participant())
        );

        assert_eq!(first.is_ok() as u8 + second.is_ok() as u8, 1);
        let stored = AttemptRepository::find_by_id(store.as_ref(), &id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.answers().len(), 1);
        assert_eq!(stored.version().as_u64(), 2);
    }

    #[tokio::test]
    async fn wrong_question_is_rejected_and_not_saved() {
        let (store, handler, id) = setup(SurveyResultPolicy::default()).await;

        let err = handler.handle(cmd(id, 2, "a"), participant()).await.unwrap_err();

        assert_eq!(err.code(), ErrorCode::PreconditionFailed);
        let stored = AttemptRepository::find_by_id(store.as_ref(), &id)
            .await
            .unwrap()
            .unwrap();
        assert!(stored.answers().is_empty());
    }

    #[tokio::test]
    async fn other_participants_are_forbidden() {
        let (_store, handler, id) = setup(SurveyResultPolicy::default()).await;
        let err = handler
            .handle(cmd(id, 1, "a"), participant_as("user-2"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[tokio::test]
    async fn unknown_attempt_is_not_found() {
        let (_store, handler, _) = setup(SurveyResultPolicy::default()).await;
        let err = handler
            .handle(cmd(AttemptId::new(), 1, "a"), participant())
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}

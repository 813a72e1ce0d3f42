//! SurveyAttempt aggregate - one participant working through one survey.
//!
//! The attempt snapshots its template and generated questions so later
//! template changes cannot alter a survey in flight. Every mutating method
//! computes the next state first and only then writes it, so a rejected
//! call leaves the attempt untouched.

use serde::{Deserialize, Serialize};

use crate::domain::analysis::resolve_outcome;
use crate::domain::foundation::{
    AttemptId, DomainError, Rating, ResponseId, StateMachine, Timestamp, UserId,
};
use crate::domain::template::SurveyTemplate;

use super::{Answer, Question, QuestionSet, SurveyPhase, SurveyResponse, SurveyStatus};

/// Optimistic concurrency version of a stored attempt.
///
/// Zero means the attempt has never been saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttemptVersion(u64);

impl AttemptVersion {
    pub fn unsaved() -> Self {
        Self(0)
    }

    pub fn from_u64(value: u64) -> Self {
        Self(value)
    }

    pub fn increment(&self) -> Self {
        Self(self.0 + 1)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for AttemptVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single participant's pass through a survey template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyAttempt {
    id: AttemptId,
    template: SurveyTemplate,
    participant: UserId,
    questions: QuestionSet,
    answers: Vec<Answer>,
    status: SurveyStatus,
    rating: Option<Rating>,
    started_at: Timestamp,
    #[serde(default)]
    version: AttemptVersion,
}

impl SurveyAttempt {
    /// Starts an attempt with freshly generated questions.
    pub fn start(template: SurveyTemplate, participant: UserId, questions: QuestionSet) -> Self {
        Self {
            id: AttemptId::new(),
            template,
            participant,
            questions,
            answers: Vec::new(),
            status: SurveyStatus::NotStarted,
            rating: None,
            started_at: Timestamp::now(),
            version: AttemptVersion::unsaved(),
        }
    }

    /// Returns the attempt stamped with the version it was stored under.
    pub fn with_version(mut self, version: AttemptVersion) -> Self {
        self.version = version;
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &AttemptId {
        &self.id
    }

    pub fn template(&self) -> &SurveyTemplate {
        &self.template
    }

    pub fn participant(&self) -> &UserId {
        &self.participant
    }

    pub fn questions(&self) -> &QuestionSet {
        &self.questions
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    pub fn status(&self) -> &SurveyStatus {
        &self.status
    }

    pub fn phase(&self) -> SurveyPhase {
        self.status.phase()
    }

    pub fn rating(&self) -> Option<Rating> {
        self.rating
    }

    pub fn started_at(&self) -> &Timestamp {
        &self.started_at
    }

    pub fn version(&self) -> AttemptVersion {
        self.version
    }

    pub fn result(&self) -> Option<&str> {
        self.status.result()
    }

    /// The question awaiting an answer, if any.
    pub fn current_question(&self) -> Option<&Question> {
        self.current_step().and_then(|step| self.questions.get(step))
    }

    /// Answered and total question counts.
    pub fn progress(&self) -> (usize, usize) {
        (self.answers.len(), self.questions.len())
    }

    /// Returns true if the participant owns this attempt.
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.participant == user_id
    }

    fn current_step(&self) -> Option<usize> {
        match self.status {
            SurveyStatus::NotStarted => Some(0),
            SurveyStatus::InProgress { step } => Some(step),
            _ => None,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Transitions
    // ─────────────────────────────────────────────────────────────────────────

    /// Records the answer to the current question.
    ///
    /// Answering the last question resolves the outcome and completes the
    /// attempt.
    ///
    /// # Errors
    ///
    /// - `PreconditionFailed` if no question is awaiting an answer or the
    ///   answer targets a different question
    /// - `ReferentialIntegrity` if the outcome is not one of the question's
    ///   options
    pub fn answer(&mut self, answer: Answer) -> Result<&SurveyStatus, DomainError> {
        let step = self.current_step().ok_or_else(|| {
            DomainError::precondition_failed(format!(
                "Cannot answer a survey in state {}",
                self.phase()
            ))
        })?;
        let question = self.questions.get(step).ok_or_else(|| {
            DomainError::precondition_failed("All questions have already been answered")
        })?;

        if question.id != answer.question_id {
            return Err(DomainError::precondition_failed(format!(
                "Expected an answer to question {}, got {}",
                question.id, answer.question_id
            ))
            .with_detail("expected_question", question.id.to_string()));
        }
        if !question.offers(&answer.outcome_id) {
            return Err(DomainError::referential_integrity(format!(
                "Question {} has no option for outcome '{}'",
                question.id, answer.outcome_id
            )));
        }

        let mut answers = self.answers.clone();
        answers.push(answer);

        let next_step = step + 1;
        let next = if next_step == self.questions.len() {
            SurveyStatus::Completed {
                result: resolve_outcome(&self.template, &answers)?,
            }
        } else {
            SurveyStatus::InProgress { step: next_step }
        };
        self.phase().transition_to(next.phase())?;

        self.answers = answers;
        self.status = next;
        Ok(&self.status)
    }

    /// Sets or replaces the rating of a completed attempt.
    ///
    /// # Errors
    ///
    /// - `PreconditionFailed` unless the attempt is completed
    pub fn rate(&mut self, rating: Rating) -> Result<(), DomainError> {
        if self.phase() != SurveyPhase::Completed {
            return Err(DomainError::precondition_failed(format!(
                "Only a completed survey can be rated (state {})",
                self.phase()
            )));
        }
        self.rating = Some(rating);
        Ok(())
    }

    /// Produces the response record and closes the attempt.
    ///
    /// The response shares the attempt's ID, so an attempt maps to at most
    /// one stored response however often submission is retried.
    ///
    /// # Errors
    ///
    /// - `PreconditionFailed` unless the attempt is completed and rated
    pub fn submit(&mut self, user_name: impl Into<String>) -> Result<SurveyResponse, DomainError> {
        self.phase().transition_to(SurveyPhase::Submitted)?;
        let rating = self.rating.ok_or_else(|| {
            DomainError::precondition_failed("A rating from 1 to 5 is required before submitting")
        })?;
        let result = self
            .result()
            .ok_or_else(|| DomainError::internal("Completed attempt has no result"))?
            .to_string();

        let response = SurveyResponse::reconstitute(
            ResponseId::from(self.id),
            self.template.id().clone(),
            self.participant.clone(),
            user_name,
            result.clone(),
            rating,
            Timestamp::now(),
        );
        self.status = SurveyStatus::Submitted {
            result,
            response_id: response.id().clone(),
        };
        Ok(response)
    }
}

//! Shared fixtures for handler tests.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::foundation::{CommandMetadata, SessionContext, UserId};
use crate::domain::survey::question::test_support::{house_template, questions};
use crate::domain::survey::QuestionSet;
use crate::domain::template::SurveyTemplate;
use crate::domain::user::UserProfile;
use crate::ports::{AIError, GenerationError, QuestionGenerator};

pub fn admin() -> CommandMetadata {
    CommandMetadata::new(SessionContext::admin(UserId::new("admin-1").unwrap()))
}

pub fn participant() -> CommandMetadata {
    participant_as("user-1")
}

pub fn participant_as(id: &str) -> CommandMetadata {
    CommandMetadata::new(SessionContext::participant(UserId::new(id).unwrap()))
}

/// Two-outcome template asking three questions.
pub fn houses_template() -> SurveyTemplate {
    house_template(3)
}

/// Generator returning fixed questions alternating outcomes a, b, a, b.
#[derive(Default)]
pub struct StubGenerator {
    pub fail: bool,
    calls: AtomicUsize,
}

impl StubGenerator {
    pub fn failing() -> Self {
        Self {
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QuestionGenerator for StubGenerator {
    async fn generate(
        &self,
        template: &SurveyTemplate,
        _profile: &UserProfile,
    ) -> Result<QuestionSet, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(AIError::unavailable("stub").into());
        }
        let count = template.question_count().value() as u32;
        Ok(QuestionSet::validated(template, questions(count))?)
    }
}

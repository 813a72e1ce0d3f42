//! End-to-end survey flow through the application handlers.
//!
//! Wires the real handlers over `InMemoryStore` and an `AiQuestionGenerator`
//! driven by `MockAIProvider`:
//! 1. An admin creates a template
//! 2. A participant starts, answers, rates and submits
//! 3. The profile picks up the result and the report counts it

use serde_json::json;
use std::sync::Arc;

use persona_survey::adapters::ai::{AiQuestionGenerator, MockAIProvider};
use persona_survey::adapters::storage::InMemoryStore;
use persona_survey::application::handlers::{
    AnswerQuestionCommand, AnswerQuestionHandler, CreateTemplateCommand, CreateTemplateHandler,
    GetTemplateReportHandler, NewOutcome, RateSurveyCommand, RateSurveyHandler,
    StartSurveyCommand, StartSurveyHandler, SubmitSurveyCommand, SubmitSurveyHandler,
    TraitsInput,
};
use persona_survey::domain::foundation::{
    CommandMetadata, ErrorCode, OutcomeId, SessionContext, UserId,
};
use persona_survey::domain::survey::SurveyPhase;
use persona_survey::domain::template::SurveyTemplate;
use persona_survey::domain::user::SurveyResultPolicy;
use persona_survey::ports::{AIError, ProfileRepository};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn admin() -> CommandMetadata {
    CommandMetadata::new(SessionContext::admin(UserId::new("admin-1").unwrap()))
        .with_correlation_id("flow-test")
}

fn participant() -> CommandMetadata {
    CommandMetadata::new(SessionContext::participant(UserId::new("user-1").unwrap()))
}

/// Model output for `count` questions; question `n` offers the outcomes in
/// template order, so option index picks the outcome.
fn generated_questions(template: &SurveyTemplate, count: u32) -> String {
    let ids: Vec<&str> = template.outcomes().iter().map(|o| o.id().as_str()).collect();
    let questions: Vec<_> = (1..=count)
        .map(|n| {
            let options: Vec<_> = (0..4)
                .map(|i| {
                    let outcome = ids[i % ids.len()];
                    json!({ "text": format!("Option {} for {}", i, n), "outcomeId": outcome })
                })
                .collect();
            json!({ "id": n, "text": format!("Question {}?", n), "options": options })
        })
        .collect();
    // Wrapped in a fence the way models often return it.
    format!("```json\n{}\n```", serde_json::to_string(&questions).unwrap())
}

async fn create_template(store: &Arc<InMemoryStore>) -> SurveyTemplate {
    CreateTemplateHandler::new(store.clone())
        .handle(
            CreateTemplateCommand {
                topic: "Which pet suits you?".into(),
                question_count: 3,
                outcomes: vec![
                    NewOutcome {
                        name: "Cat".into(),
                        traits: TraitsInput::Text("independent, curious".into()),
                    },
                    NewOutcome {
                        name: "Dog".into(),
                        traits: TraitsInput::List(vec!["loyal".into(), "social".into()]),
                    },
                ],
            },
            admin(),
        )
        .await
        .unwrap()
}

fn start_handler(store: &Arc<InMemoryStore>, provider: MockAIProvider) -> StartSurveyHandler {
    let generator = Arc::new(AiQuestionGenerator::new(Arc::new(provider)));
    StartSurveyHandler::new(store.clone(), store.clone(), store.clone(), generator)
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn participant_completes_survey_and_report_reflects_it() {
    let store = Arc::new(InMemoryStore::new());
    let template = create_template(&store).await;
    let cat = template.outcomes()[0].id().clone();
    let dog = template.outcomes()[1].id().clone();

    // Start
    let provider = MockAIProvider::new().with_response(generated_questions(&template, 3));
    let attempt = start_handler(&store, provider)
        .handle(
            StartSurveyCommand {
                template_id: template.id().clone(),
            },
            participant(),
        )
        .await
        .unwrap();
    assert_eq!(attempt.questions().len(), 3);

    // Answer: dog, cat, dog
    let answers = AnswerQuestionHandler::new(
        store.clone(),
        store.clone(),
        SurveyResultPolicy::default(),
    );
    let mut last = None;
    for (question_id, outcome) in [(1, &dog), (2, &cat), (3, &dog)] {
        last = Some(
            answers
                .handle(
                    AnswerQuestionCommand {
                        attempt_id: *attempt.id(),
                        question_id,
                        outcome_id: outcome.clone(),
                    },
                    participant(),
                )
                .await
                .unwrap(),
        );
    }
    let completed = last.unwrap();
    assert_eq!(completed.attempt.result(), Some("Dog"));
    let profile = completed.profile.unwrap();
    assert!(profile.has_interest("Dog"));
    assert_eq!(profile.history_for(template.id()), Some("Dog"));

    // Rate and submit
    RateSurveyHandler::new(store.clone())
        .handle(
            RateSurveyCommand {
                attempt_id: *attempt.id(),
                rating: 4,
            },
            participant(),
        )
        .await
        .unwrap();
    let submit =
        SubmitSurveyHandler::new(store.clone(), store.clone(), store.clone(), store.clone());
    let submitted = submit
        .handle(
            SubmitSurveyCommand {
                attempt_id: *attempt.id(),
            },
            participant(),
        )
        .await
        .unwrap();
    assert_eq!(submitted.attempt.phase(), SurveyPhase::Submitted);
    assert_eq!(submitted.response.user_name(), "Alex Johnson");

    // Report
    let report = GetTemplateReportHandler::new(store.clone(), store.clone())
        .handle(template.id(), admin())
        .await
        .unwrap();
    assert_eq!(report.participants, 1);
    assert_eq!(report.distribution.count_of("Dog"), 1);
    assert_eq!(report.average_rating_display(), "4.0");
}

#[tokio::test]
async fn extra_questions_are_dropped_and_policy_is_honoured() {
    let store = Arc::new(InMemoryStore::new());
    let template = create_template(&store).await;
    let cat = template.outcomes()[0].id().clone();
    let dog = template.outcomes()[1].id().clone();

    // The model returns one question too many.
    let provider = MockAIProvider::new().with_response(generated_questions(&template, 4));
    let attempt = start_handler(&store, provider)
        .handle(
            StartSurveyCommand {
                template_id: template.id().clone(),
            },
            participant(),
        )
        .await
        .unwrap();
    assert_eq!(attempt.questions().len(), 3);

    let answers = AnswerQuestionHandler::new(
        store.clone(),
        store.clone(),
        SurveyResultPolicy {
            record_as_interest: false,
        },
    );
    let picks: [(u32, &OutcomeId); 3] = [(1, &dog), (2, &cat), (3, &dog)];
    let mut result = None;
    for (question_id, outcome) in picks {
        result = Some(
            answers
                .handle(
                    AnswerQuestionCommand {
                        attempt_id: *attempt.id(),
                        question_id,
                        outcome_id: outcome.clone(),
                    },
                    participant(),
                )
                .await
                .unwrap(),
        );
    }

    let profile = result.unwrap().profile.unwrap();
    assert!(!profile.has_interest("Dog"));
    assert_eq!(
        store
            .find(&UserId::new("user-1").unwrap())
            .await
            .unwrap()
            .unwrap()
            .history_for(template.id()),
        Some("Dog")
    );
}

#[tokio::test]
async fn short_generation_is_an_external_service_error() {
    let store = Arc::new(InMemoryStore::new());
    let template = create_template(&store).await;

    let provider = MockAIProvider::new().with_response(generated_questions(&template, 2));
    let err = start_handler(&store, provider)
        .handle(
            StartSurveyCommand {
                template_id: template.id().clone(),
            },
            participant(),
        )
        .await
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::ExternalServiceError);
}

#[tokio::test]
async fn provider_failure_is_an_external_service_error() {
    let store = Arc::new(InMemoryStore::new());
    let template = create_template(&store).await;

    let provider = MockAIProvider::new().with_error(AIError::AuthenticationFailed);
    let err = start_handler(&store, provider)
        .handle(
            StartSurveyCommand {
                template_id: template.id().clone(),
            },
            participant(),
        )
        .await
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::ExternalServiceError);
}

#[tokio::test]
async fn empty_array_is_never_success() {
    let store = Arc::new(InMemoryStore::new());
    let template = create_template(&store).await;

    let provider = MockAIProvider::new().with_response("[]");
    let err = start_handler(&store, provider)
        .handle(
            StartSurveyCommand {
                template_id: template.id().clone(),
            },
            participant(),
        )
        .await
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::ExternalServiceError);
}

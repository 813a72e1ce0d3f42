//! Prompt and response schema for personalized question generation.

use serde_json::{json, Value};

use crate::domain::survey::OPTIONS_PER_QUESTION;
use crate::domain::template::SurveyTemplate;
use crate::domain::user::UserProfile;

pub const SYSTEM_PROMPT: &str =
    "You design short personality-style surveys. Reply only with the JSON array requested.";

/// Builds the personalization prompt for one template and profile.
pub fn question_prompt(template: &SurveyTemplate, profile: &UserProfile) -> String {
    let outcomes = template
        .outcomes()
        .iter()
        .map(|o| format!("{} (Traits: {})", o.name(), o.traits().join(", ")))
        .collect::<Vec<_>>()
        .join("; ");

    let mapping = template
        .outcomes()
        .iter()
        .map(|o| format!("{}: {}", o.id(), o.name()))
        .collect::<Vec<_>>()
        .join("\n");

    let history = serde_json::to_string(profile.history()).unwrap_or_else(|_| "{}".to_string());

    format!(
        "Create a highly personalized survey based on this template and user profile.\n\
         \n\
         RESEARCH TOPIC: {topic}\n\
         NUMBER OF QUESTIONS: {count}\n\
         POSSIBLE OUTCOMES: {outcomes}\n\
         \n\
         USER PROFILE:\n\
         Name: {name}\n\
         Interests: {interests}\n\
         Demographics: {demographics}\n\
         Past Results: {history}\n\
         \n\
         INSTRUCTION:\n\
         1. Tailor the tone and context of the questions to the user's interests.\n\
         2. Each question must have exactly {options} options.\n\
         3. Each option must map to one of the outcome IDs listed below.\n\
         4. Number the questions with unique integer ids starting at 1.\n\
         5. Keep the survey cohesive and professional yet engaging.\n\
         \n\
         OUTCOME MAPPING IDs:\n\
         {mapping}\n",
        topic = template.topic(),
        count = template.question_count().value(),
        outcomes = outcomes,
        name = profile.name(),
        interests = profile.interests().join(", "),
        demographics = profile.demographics(),
        history = history,
        options = OPTIONS_PER_QUESTION,
        mapping = mapping,
    )
}

/// Gemini response schema for an array of questions.
pub fn question_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "id": { "type": "INTEGER" },
                "text": { "type": "STRING" },
                "options": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "text": { "type": "STRING" },
                            "outcomeId": { "type": "STRING" }
                        },
                        "required": ["text", "outcomeId"]
                    }
                }
            },
            "required": ["id", "text", "options"]
        }
    })
}

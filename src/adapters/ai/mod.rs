//! AI Adapters.
//!
//! ## Available Adapters
//!
//! - `GeminiProvider` - Google Gemini `generateContent` API
//! - `MockAIProvider` - Scripted provider for tests
//! - `AiQuestionGenerator` - QuestionGenerator port backed by any `AIProvider`

mod gemini_provider;
mod mock_provider;
mod prompt;
mod question_generator;

pub use gemini_provider::{
    retry_budget, GeminiConfig, GeminiProvider, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL,
    DEFAULT_RETRY_BASE_DELAY,
};
pub use mock_provider::{MockAIProvider, MockResponse};
pub use prompt::{question_prompt, question_schema};
pub use question_generator::AiQuestionGenerator;

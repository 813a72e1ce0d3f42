//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Gemini provider and the AI-backed question generator
//! - `http` - axum REST API
//! - `storage` - In-memory and YAML file repositories

pub mod ai;
pub mod http;
pub mod storage;

pub use ai::{AiQuestionGenerator, GeminiConfig, GeminiProvider, MockAIProvider};
pub use http::{api_router, AppState};
pub use storage::{FileStore, InMemoryStore};

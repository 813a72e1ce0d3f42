//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## AI Ports
//!
//! - `AIProvider` - Text generation against a model provider
//! - `QuestionGenerator` - Personalized question sets for a survey attempt
//!
//! ## Persistence Ports
//!
//! - `TemplateRepository` - Authored templates
//! - `ProfileRepository` - Participant profiles (optimistic versioning)
//! - `ResponseRepository` - Submitted responses (append-only)
//! - `AttemptRepository` - Attempts in flight

mod ai_provider;
mod question_generator;
mod repositories;
mod storage_error;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, ProviderInfo, RequestMetadata,
    ResponseFormat, TokenUsage,
};
pub use question_generator::{GenerationError, QuestionGenerator};
pub use repositories::{
    next_attempt_write, next_profile_version, AttemptRepository, AttemptWrite, ProfileRepository,
    ResponseRepository, TemplateRepository,
};
pub use storage_error::StorageError;

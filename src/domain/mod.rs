//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, rating, errors, session context)
//! - `template` - Survey templates, outcomes and the authoring draft
//! - `survey` - Generated questions, survey attempts and submitted responses
//! - `user` - Participant profiles
//! - `analysis` - Pure aggregation (outcome resolution, distributions, reports)

pub mod analysis;
pub mod foundation;
pub mod survey;
pub mod template;
pub mod user;

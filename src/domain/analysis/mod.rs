//! Analysis module - pure functions over answers and responses.
//!
//! - `aggregation` - outcome resolution, result distribution, average rating
//! - `report` - per-template dashboard summary

mod aggregation;
mod report;

pub use aggregation::{
    average_rating, build_distribution, resolve_outcome, Distribution, DistributionEntry,
};
pub use report::{ParticipantSummary, TemplateReport};

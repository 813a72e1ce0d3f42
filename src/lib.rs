//! Persona Survey - AI-personalized personality surveys
//!
//! Administrators author survey templates (a topic plus candidate outcomes);
//! participants take surveys whose questions are generated for their
//! profile, receive the outcome their answers point to most often, rate the
//! experience and submit. Administrators review per-template reports.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

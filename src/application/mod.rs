//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Commands (create, answer, rate, submit, update) and queries (list, get,
//! report) are kept in separate handlers.

pub mod handlers;

pub use handlers::*;

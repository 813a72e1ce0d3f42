//! Storage adapters implementing the repository ports.
//!
//! - `InMemoryStore` - process-local, for tests and the `memory` backend
//! - `FileStore` - YAML files under a data directory

mod file_store;
mod in_memory;

pub use file_store::FileStore;
pub use in_memory::InMemoryStore;

//! Batch persistence: one record per batch, keyed by a store-assigned id.

pub mod in_memory;
pub mod postgres;
pub mod r#trait;

pub use in_memory::InMemoryBatchRepository;
pub use postgres::PostgresBatchRepository;
pub use r#trait::{BatchRepository, RepositoryError};

use std::sync::Arc;

use thiserror::Error;

use batchdesk_batches::{Batch, NewBatch};
use batchdesk_core::{BatchId, DomainError, ExpectedVersion};

/// Batch store operation error.
///
/// These are **infrastructure errors** (storage, concurrency) as opposed to
/// business-rule errors; the registry converts them into `DomainError`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// The unique name constraint rejected the write.
    #[error("batch name already taken: {0}")]
    DuplicateName(String),

    /// The stored record is not at the expected version.
    #[error("optimistic concurrency check failed: {0}")]
    Conflict(String),

    /// The record disappeared between load and save.
    #[error("batch {0} no longer exists")]
    Missing(BatchId),

    #[error("storage backend failure: {0}")]
    Backend(String),
}

impl From<RepositoryError> for DomainError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::DuplicateName(name) => DomainError::DuplicateBatchName(name),
            RepositoryError::Conflict(msg) => DomainError::conflict(msg),
            RepositoryError::Missing(id) => DomainError::batch_not_found(format!("id {id}")),
            RepositoryError::Backend(msg) => DomainError::storage(msg),
        }
    }
}

/// Record store for batches.
///
/// Saves are single-record; there are no multi-record transactions.
#[async_trait::async_trait]
pub trait BatchRepository: Send + Sync {
    /// Assign an id and persist. The stored batch starts at version 1.
    async fn insert(&self, batch: NewBatch) -> Result<Batch, RepositoryError>;

    async fn get(&self, id: BatchId) -> Result<Option<Batch>, RepositoryError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Batch>, RepositoryError>;

    async fn exists_by_name(&self, name: &str) -> Result<bool, RepositoryError>;

    /// All batches, ordered by id.
    async fn list(&self) -> Result<Vec<Batch>, RepositoryError>;

    /// Overwrite the stored record and return it with its version bumped.
    async fn update(&self, batch: &Batch, expected: ExpectedVersion) -> Result<Batch, RepositoryError>;

    /// Returns `false` if nothing was deleted.
    async fn delete(&self, id: BatchId) -> Result<bool, RepositoryError>;
}

#[async_trait::async_trait]
impl<S> BatchRepository for Arc<S>
where
    S: BatchRepository + ?Sized,
{
    async fn insert(&self, batch: NewBatch) -> Result<Batch, RepositoryError> {
        (**self).insert(batch).await
    }

    async fn get(&self, id: BatchId) -> Result<Option<Batch>, RepositoryError> {
        (**self).get(id).await
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Batch>, RepositoryError> {
        (**self).find_by_name(name).await
    }

    async fn exists_by_name(&self, name: &str) -> Result<bool, RepositoryError> {
        (**self).exists_by_name(name).await
    }

    async fn list(&self) -> Result<Vec<Batch>, RepositoryError> {
        (**self).list().await
    }

    async fn update(&self, batch: &Batch, expected: ExpectedVersion) -> Result<Batch, RepositoryError> {
        (**self).update(batch, expected).await
    }

    async fn delete(&self, id: BatchId) -> Result<bool, RepositoryError> {
        (**self).delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_failures_keep_their_kind_in_the_domain() {
        assert_eq!(
            DomainError::from(RepositoryError::Conflict("stale".into())),
            DomainError::Conflict("stale".into())
        );
        assert_eq!(
            DomainError::from(RepositoryError::Backend("down".into())),
            DomainError::Storage("down".into())
        );
        assert_eq!(
            DomainError::from(RepositoryError::DuplicateName("B1".into())),
            DomainError::DuplicateBatchName("B1".into())
        );
    }
}

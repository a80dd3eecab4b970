use std::collections::BTreeMap;
use std::sync::RwLock;

use batchdesk_batches::{Batch, NewBatch};
use batchdesk_core::{BatchId, Entity, ExpectedVersion};

use super::r#trait::{BatchRepository, RepositoryError};

#[derive(Debug, Default)]
struct State {
    last_id: i64,
    batches: BTreeMap<BatchId, Batch>,
}

impl State {
    fn name_taken(&self, name: &str, except: Option<BatchId>) -> bool {
        self.batches
            .values()
            .any(|b| b.name() == name && Some(b.batch_id()) != except)
    }
}

/// In-memory batch store.
///
/// Intended for tests/dev. Not optimized for performance.
#[derive(Debug, Default)]
pub struct InMemoryBatchRepository {
    state: RwLock<State>,
}

impl InMemoryBatchRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> RepositoryError {
    RepositoryError::Backend("lock poisoned".to_string())
}

#[async_trait::async_trait]
impl BatchRepository for InMemoryBatchRepository {
    async fn insert(&self, batch: NewBatch) -> Result<Batch, RepositoryError> {
        let mut state = self.state.write().map_err(|_| poisoned())?;

        if state.name_taken(&batch.details.name, None) {
            return Err(RepositoryError::DuplicateName(batch.details.name));
        }

        state.last_id += 1;
        let stored = Batch::from_new(BatchId::new(state.last_id), batch);
        state.batches.insert(stored.batch_id(), stored.clone());
        Ok(stored)
    }

    async fn get(&self, id: BatchId) -> Result<Option<Batch>, RepositoryError> {
        let state = self.state.read().map_err(|_| poisoned())?;
        Ok(state.batches.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Batch>, RepositoryError> {
        let state = self.state.read().map_err(|_| poisoned())?;
        Ok(state.batches.values().find(|b| b.name() == name).cloned())
    }

    async fn exists_by_name(&self, name: &str) -> Result<bool, RepositoryError> {
        let state = self.state.read().map_err(|_| poisoned())?;
        Ok(state.name_taken(name, None))
    }

    async fn list(&self) -> Result<Vec<Batch>, RepositoryError> {
        let state = self.state.read().map_err(|_| poisoned())?;
        Ok(state.batches.values().cloned().collect())
    }

    async fn update(&self, batch: &Batch, expected: ExpectedVersion) -> Result<Batch, RepositoryError> {
        let mut state = self.state.write().map_err(|_| poisoned())?;
        let id = batch.batch_id();

        let current = state
            .batches
            .get(&id)
            .map(|b| b.version())
            .ok_or(RepositoryError::Missing(id))?;

        if !expected.matches(current) {
            return Err(RepositoryError::Conflict(format!(
                "batch {id}: expected {expected:?}, found {current}"
            )));
        }

        if state.name_taken(batch.name(), Some(id)) {
            return Err(RepositoryError::DuplicateName(batch.name().to_string()));
        }

        let mut stored = batch.clone();
        stored.set_version(current + 1);
        state.batches.insert(id, stored.clone());
        Ok(stored)
    }

    async fn delete(&self, id: BatchId) -> Result<bool, RepositoryError> {
        let mut state = self.state.write().map_err(|_| poisoned())?;
        Ok(state.batches.remove(&id).is_some())
    }
}

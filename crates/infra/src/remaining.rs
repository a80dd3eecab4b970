//! Joins the batch roster with the external directory.

use std::collections::HashSet;
use std::sync::Arc;

use batchdesk_core::{BatchId, DomainResult, EmployeeId};

use crate::directory::{EmployeeDirectory, EmployeeRecord};
use crate::registry::{BatchRef, BatchRegistry};
use crate::repository::BatchRepository;

pub struct RemainingEmployeeResolver<R, D> {
    registry: Arc<BatchRegistry<R>>,
    directory: D,
}

impl<R, D> RemainingEmployeeResolver<R, D>
where
    R: BatchRepository,
    D: EmployeeDirectory,
{
    pub fn new(registry: Arc<BatchRegistry<R>>, directory: D) -> Self {
        Self { registry, directory }
    }

    /// Directory records whose id is in `all_known_ids` but not on the batch's roster.
    ///
    /// A batch with nobody assigned leaves every known id remaining. Records
    /// come back in directory order.
    pub async fn remaining(
        &self,
        batch_id: BatchId,
        all_known_ids: &[EmployeeId],
    ) -> DomainResult<Vec<EmployeeRecord>> {
        let assigned: HashSet<EmployeeId> = self
            .registry
            .roster(&BatchRef::Id(batch_id))
            .await?
            .into_iter()
            .collect();

        let wanted: HashSet<EmployeeId> = all_known_ids
            .iter()
            .copied()
            .filter(|id| !assigned.contains(id))
            .collect();

        let records = self.matching_records(&wanted).await;
        tracing::debug!(
            batch_id = %batch_id,
            assigned = assigned.len(),
            remaining = records.len(),
            "resolved remaining employees"
        );
        Ok(records)
    }

    /// Directory records for everyone on the batch's roster.
    pub async fn roster_details(&self, batch_id: BatchId) -> DomainResult<Vec<EmployeeRecord>> {
        let assigned: HashSet<EmployeeId> = self
            .registry
            .roster(&BatchRef::Id(batch_id))
            .await?
            .into_iter()
            .collect();

        if assigned.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.matching_records(&assigned).await)
    }

    async fn matching_records(&self, ids: &HashSet<EmployeeId>) -> Vec<EmployeeRecord> {
        self.directory
            .fetch_all_known_employees()
            .await
            .into_iter()
            .filter(|r| r.employee_id().is_some_and(|id| ids.contains(&id)))
            .collect()
    }
}

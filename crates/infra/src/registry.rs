//! Batch registry: the business operations over the batch store.
//!
//! Every operation is a single read-modify-write against one record. Saves
//! carry the version that was read, so two requests racing on the same
//! batch cannot silently overwrite each other; the loser gets `Conflict`.

use chrono::NaiveDate;

use batchdesk_batches::{Batch, BatchDetails, BatchDraft, BatchSummary, NewBatch, RosterDelta};
use batchdesk_core::{BatchId, DomainError, DomainResult, EmployeeId, Entity, ExpectedVersion};
use batchdesk_import::parse_roster;

use crate::repository::BatchRepository;

/// Addresses a batch by id or by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchRef {
    Id(BatchId),
    Name(String),
}

impl core::fmt::Display for BatchRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BatchRef::Id(id) => write!(f, "id {id}"),
            BatchRef::Name(name) => write!(f, "name '{name}'"),
        }
    }
}

pub struct BatchRegistry<R> {
    repo: R,
}

impl<R> BatchRegistry<R>
where
    R: BatchRepository,
{
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    async fn load(&self, batch: &BatchRef) -> DomainResult<Batch> {
        let found = match batch {
            BatchRef::Id(id) => self.repo.get(*id).await?,
            BatchRef::Name(name) => self.repo.find_by_name(name).await?,
        };
        found.ok_or_else(|| DomainError::batch_not_found(batch))
    }

    async fn save(&self, batch: &Batch) -> DomainResult<Batch> {
        let saved = self
            .repo
            .update(batch, ExpectedVersion::Exact(batch.version()))
            .await?;
        Ok(saved)
    }

    async fn ensure_name_free(&self, name: &str) -> DomainResult<()> {
        if self.repo.exists_by_name(name).await? {
            tracing::debug!(batch_name = %name, "rejected duplicate batch name");
            return Err(DomainError::duplicate_name(name));
        }
        Ok(())
    }

    pub async fn create(&self, details: BatchDetails) -> DomainResult<Batch> {
        self.create_with_roster(details, Vec::new()).await
    }

    /// Create a batch whose roster is the given list (first occurrence wins).
    pub async fn create_with_roster(
        &self,
        details: BatchDetails,
        employee_ids: Vec<EmployeeId>,
    ) -> DomainResult<Batch> {
        details.validate()?;
        self.ensure_name_free(&details.name).await?;

        let batch = self
            .repo
            .insert(NewBatch::with_roster(details, employee_ids))
            .await?;

        tracing::info!(
            batch_id = %batch.batch_id(),
            batch_name = %batch.name(),
            roster_size = batch.roster().len(),
            "batch created"
        );
        Ok(batch)
    }

    /// Parse an uploaded roster, then create the batch described by `metadata`.
    pub async fn create_from_upload(&self, file: &[u8], metadata: &str) -> DomainResult<Batch> {
        let employee_ids = parse_roster(file)?;
        let details = BatchDraft::from_json(metadata)?.into_details()?;
        self.create_with_roster(details, employee_ids).await
    }

    pub async fn get(&self, batch: &BatchRef) -> DomainResult<Batch> {
        self.load(batch).await
    }

    /// Reconcile `candidates` against the roster and persist the new ids.
    ///
    /// Every add path (by id or by name, list or upload) lands here.
    pub async fn add_employees(
        &self,
        batch: &BatchRef,
        candidates: &[EmployeeId],
    ) -> DomainResult<RosterDelta> {
        let mut current = self.load(batch).await?;
        let delta = current.add_employees(candidates)?;
        self.save(&current).await?;

        tracing::info!(
            batch_id = %current.batch_id(),
            added = delta.new_ids.len(),
            already_present = delta.already_present_ids.len(),
            "employees added to batch"
        );
        Ok(delta)
    }

    pub async fn add_employees_from_upload(
        &self,
        batch: &BatchRef,
        file: &[u8],
    ) -> DomainResult<RosterDelta> {
        let candidates = parse_roster(file)?;
        self.add_employees(batch, &candidates).await
    }

    pub async fn remove_employee(&self, batch: &BatchRef, employee_id: EmployeeId) -> DomainResult<Batch> {
        let mut current = self.load(batch).await?;
        current.remove_employee(employee_id)?;
        let saved = self.save(&current).await?;

        tracing::info!(batch_id = %saved.batch_id(), employee_id = %employee_id, "employee removed from batch");
        Ok(saved)
    }

    /// Remove all of `employee_ids` or, if any is missing, none of them.
    pub async fn remove_employees(&self, id: BatchId, employee_ids: &[EmployeeId]) -> DomainResult<Batch> {
        let mut current = self.load(&BatchRef::Id(id)).await?;
        current.remove_employees(employee_ids)?;
        let saved = self.save(&current).await?;

        tracing::info!(batch_id = %id, removed = employee_ids.len(), "employees removed from batch");
        Ok(saved)
    }

    pub async fn rename(&self, id: BatchId, new_name: &str) -> DomainResult<Batch> {
        let mut current = self.load(&BatchRef::Id(id)).await?;
        if current.name() != new_name {
            self.ensure_name_free(new_name).await?;
        }
        current.rename(new_name)?;
        let saved = self.save(&current).await?;

        tracing::info!(batch_id = %id, batch_name = %saved.name(), "batch renamed");
        Ok(saved)
    }

    pub async fn update_end_date(&self, id: BatchId, end_date: NaiveDate) -> DomainResult<Batch> {
        let mut current = self.load(&BatchRef::Id(id)).await?;
        current.set_end_date(end_date);
        let saved = self.save(&current).await?;

        tracing::info!(batch_id = %id, %end_date, "batch end date updated");
        Ok(saved)
    }

    /// Overwrite name, description, dates and size wholesale.
    ///
    /// A changed name must still be unique.
    pub async fn update_details(&self, id: BatchId, details: BatchDetails) -> DomainResult<Batch> {
        let mut current = self.load(&BatchRef::Id(id)).await?;
        if current.name() != details.name {
            self.ensure_name_free(&details.name).await?;
        }
        current.replace_details(details)?;
        let saved = self.save(&current).await?;

        tracing::info!(batch_id = %id, "batch details updated");
        Ok(saved)
    }

    pub async fn delete(&self, batch: &BatchRef) -> DomainResult<()> {
        let current = self.load(batch).await?;
        if !self.repo.delete(current.batch_id()).await? {
            return Err(DomainError::batch_not_found(batch));
        }

        tracing::info!(batch_id = %current.batch_id(), batch_name = %current.name(), "batch deleted");
        Ok(())
    }

    /// All batches; an empty store is `NoBatchesExist`, not an empty list.
    pub async fn list_all(&self) -> DomainResult<Vec<Batch>> {
        let batches = self.repo.list().await?;
        if batches.is_empty() {
            return Err(DomainError::NoBatchesExist);
        }
        Ok(batches)
    }

    pub async fn list_names(&self) -> DomainResult<Vec<String>> {
        Ok(self
            .list_all()
            .await?
            .into_iter()
            .map(|b| b.name().to_string())
            .collect())
    }

    pub async fn list_names_with_ids(&self) -> DomainResult<Vec<BatchSummary>> {
        Ok(self.list_all().await?.iter().map(Batch::summary).collect())
    }

    /// The roster as stored; empty when nobody is assigned.
    pub async fn roster(&self, batch: &BatchRef) -> DomainResult<Vec<EmployeeId>> {
        Ok(self.load(batch).await?.employee_ids().to_vec())
    }

    /// The roster, with an empty one reported as `EmptyRoster`.
    pub async fn get_roster(&self, batch: &BatchRef) -> DomainResult<Vec<EmployeeId>> {
        let roster = self.roster(batch).await?;
        if roster.is_empty() {
            return Err(DomainError::empty_roster(batch));
        }
        Ok(roster)
    }
}

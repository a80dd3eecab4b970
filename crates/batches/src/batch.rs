use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use batchdesk_core::{BatchId, DomainError, DomainResult, EmployeeId, Entity};

use crate::reconcile::RosterDelta;
use crate::roster::Roster;

/// Descriptive attributes of a batch (everything except identity and roster).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchDetails {
    #[serde(rename = "batchName")]
    pub name: String,
    #[serde(rename = "batchDescription", default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Advisory capacity; never enforced against the roster length.
    #[serde(rename = "batchSize", default)]
    pub size: Option<i64>,
}

impl BatchDetails {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            start_date: None,
            end_date: None,
            size: None,
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("batchName cannot be empty"));
        }
        Ok(())
    }
}

/// Batch metadata as it arrives alongside an upload: every field optional.
///
/// Only fields present in the document are carried over; absent ones stay
/// unset on the resulting batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchDraft {
    pub batch_name: Option<String>,
    pub batch_description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub batch_size: Option<i64>,
}

impl BatchDraft {
    /// Parse the JSON metadata document (dates as `yyyy-MM-dd`).
    pub fn from_json(data: &str) -> DomainResult<Self> {
        serde_json::from_str(data)
            .map_err(|e| DomainError::validation(format!("invalid batch metadata: {e}")))
    }

    pub fn into_details(self) -> DomainResult<BatchDetails> {
        let name = self
            .batch_name
            .ok_or_else(|| DomainError::validation("batchName is required"))?;

        let details = BatchDetails {
            name,
            description: self.batch_description,
            start_date: self.start_date,
            end_date: self.end_date,
            size: self.batch_size,
        };
        details.validate()?;
        Ok(details)
    }
}

/// A batch that has not been assigned an identity yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBatch {
    pub details: BatchDetails,
    pub roster: Roster,
}

impl NewBatch {
    pub fn new(details: BatchDetails) -> Self {
        Self {
            details,
            roster: Roster::new(),
        }
    }

    pub fn with_roster(details: BatchDetails, employee_ids: impl IntoIterator<Item = EmployeeId>) -> Self {
        Self {
            details,
            roster: Roster::from_ids(employee_ids),
        }
    }
}

/// `{batchId, batchName}` pair for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub batch_id: BatchId,
    pub batch_name: String,
}

/// Entity: Batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    id: BatchId,
    details: BatchDetails,
    roster: Roster,
    version: u64,
}

impl Batch {
    /// Rehydrate a stored batch.
    pub fn restore(id: BatchId, details: BatchDetails, roster: Roster, version: u64) -> Self {
        Self {
            id,
            details,
            roster,
            version,
        }
    }

    /// Assign identity to a new batch (version 1).
    pub fn from_new(id: BatchId, new: NewBatch) -> Self {
        Self::restore(id, new.details, new.roster, 1)
    }

    pub fn batch_id(&self) -> BatchId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.details.name
    }

    pub fn details(&self) -> &BatchDetails {
        &self.details
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn employee_ids(&self) -> &[EmployeeId] {
        self.roster.ids()
    }

    pub fn summary(&self) -> BatchSummary {
        BatchSummary {
            batch_id: self.id,
            batch_name: self.details.name.clone(),
        }
    }

    /// Record the version assigned by the store on save.
    pub fn set_version(&mut self, version: u64) {
        self.version = version;
    }

    pub fn rename(&mut self, name: impl Into<String>) -> DomainResult<()> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("batchName cannot be empty"));
        }
        self.details.name = name;
        Ok(())
    }

    pub fn set_end_date(&mut self, end_date: NaiveDate) {
        self.details.end_date = Some(end_date);
    }

    /// Overwrite every descriptive field, including clearing absent ones.
    pub fn replace_details(&mut self, details: BatchDetails) -> DomainResult<()> {
        details.validate()?;
        self.details = details;
        Ok(())
    }

    pub fn add_employees(&mut self, candidates: &[EmployeeId]) -> DomainResult<RosterDelta> {
        self.roster.add(candidates)
    }

    pub fn remove_employee(&mut self, id: EmployeeId) -> DomainResult<()> {
        self.roster.remove(id)
    }

    pub fn remove_employees(&mut self, ids: &[EmployeeId]) -> DomainResult<()> {
        self.roster.remove_all(ids)
    }
}

impl Entity for Batch {
    type Id = BatchId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

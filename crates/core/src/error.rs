//! Domain error model.

use thiserror::Error;

use crate::id::EmployeeId;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant is a local, synchronous, non-retryable business-rule
/// violation except `Storage`, which wraps a backend failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The uploaded file had zero bytes.
    #[error("the supplied file was empty (zero bytes long)")]
    EmptyInput,

    /// The uploaded bytes are not a supported spreadsheet.
    #[error("invalid file format: {0}")]
    MalformedInput(String),

    /// Parsing yielded no employee identifiers.
    #[error("no employees found in the uploaded file")]
    NoRecordsFound,

    /// An add-employees call carried no candidates.
    #[error("no employees to add")]
    EmptyCandidateList,

    /// Every candidate is already on the roster.
    #[error("all employees provided are already present in this batch")]
    AllDuplicates,

    /// Another batch already uses this name.
    #[error("batch with name '{0}' already exists")]
    DuplicateBatchName(String),

    /// Lookup by id or name missed.
    #[error("batch not found: {0}")]
    BatchNotFound(String),

    /// Removal target is not on the roster.
    #[error("employee not found in the batch: {0}")]
    EmployeeNotFound(EmployeeId),

    /// The batch exists but has nobody assigned.
    #[error("no employees found in batch {0}")]
    EmptyRoster(String),

    /// Listing found no batches at all.
    #[error("batches are not created yet")]
    NoBatchesExist,

    /// A value failed validation (e.g. missing name, malformed date).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A stale write was rejected (optimistic concurrency).
    #[error("conflict: {0}")]
    Conflict(String),

    /// The persistence backend failed.
    #[error("storage error: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedInput(msg.into())
    }

    pub fn duplicate_name(name: impl Into<String>) -> Self {
        Self::DuplicateBatchName(name.into())
    }

    pub fn batch_not_found(what: impl core::fmt::Display) -> Self {
        Self::BatchNotFound(what.to_string())
    }

    pub fn empty_roster(what: impl core::fmt::Display) -> Self {
        Self::EmptyRoster(what.to_string())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}

//! Batches domain module.
//!
//! This crate contains the business rules for training batches and their
//! rosters, implemented purely as deterministic domain logic (no IO, no HTTP,
//! no storage).

pub mod batch;
pub mod reconcile;
pub mod roster;

pub use batch::{Batch, BatchDetails, BatchDraft, BatchSummary, NewBatch};
pub use reconcile::{RosterDelta, reconcile};
pub use roster::Roster;

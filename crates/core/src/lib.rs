//! `batchdesk-core` — shared building blocks for the batch roster service.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod entity;
pub mod error;
pub mod id;
pub mod version;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{BatchId, EmployeeId};
pub use version::ExpectedVersion;

//! Infrastructure layer: storage, the batch registry, the employee
//! directory client, and configuration.

pub mod config;
pub mod directory;
pub mod registry;
pub mod remaining;
pub mod repository;


pub use config::{AppConfig, ConfigError, DirectoryConfig};
pub use directory::{EmployeeDirectory, EmployeeRecord, HttpEmployeeDirectory, StaticEmployeeDirectory};
pub use registry::{BatchRef, BatchRegistry};
pub use remaining::RemainingEmployeeResolver;
pub use repository::{BatchRepository, InMemoryBatchRepository, PostgresBatchRepository, RepositoryError};

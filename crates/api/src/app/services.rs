//! Service wiring: repository + registry + directory + resolver.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;

use batchdesk_infra::{
    AppConfig, BatchRegistry, BatchRepository, EmployeeDirectory, HttpEmployeeDirectory,
    InMemoryBatchRepository, PostgresBatchRepository, RemainingEmployeeResolver,
};

pub type DynRepository = Arc<dyn BatchRepository>;
pub type DynDirectory = Arc<dyn EmployeeDirectory>;

#[derive(Clone)]
pub struct AppServices {
    pub registry: Arc<BatchRegistry<DynRepository>>,
    pub resolver: Arc<RemainingEmployeeResolver<DynRepository, DynDirectory>>,
}

impl AppServices {
    pub fn new(repository: DynRepository, directory: DynDirectory) -> Self {
        let registry = Arc::new(BatchRegistry::new(repository));
        let resolver = Arc::new(RemainingEmployeeResolver::new(registry.clone(), directory));
        Self { registry, resolver }
    }

    /// In-memory store (dev/test) with the given directory.
    pub fn in_memory(directory: DynDirectory) -> Self {
        Self::new(Arc::new(InMemoryBatchRepository::new()), directory)
    }
}

/// Build services from configuration: Postgres when `DATABASE_URL` is set,
/// in-memory otherwise.
pub async fn build_services(config: &AppConfig) -> anyhow::Result<AppServices> {
    let directory: DynDirectory = Arc::new(HttpEmployeeDirectory::new(&config.directory)?);

    let repository: DynRepository = match &config.database_url {
        Some(url) => {
            let pool = PgPoolOptions::new().max_connections(10).connect(url).await?;
            let repo = PostgresBatchRepository::new(pool);
            repo.ensure_schema().await?;
            tracing::info!("using postgres batch store");
            Arc::new(repo)
        }
        None => {
            tracing::warn!("DATABASE_URL not set; using in-memory batch store");
            Arc::new(InMemoryBatchRepository::new())
        }
    };

    Ok(AppServices::new(repository, directory))
}

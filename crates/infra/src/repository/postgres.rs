//! Postgres-backed batch store.
//!
//! ## Error Mapping
//!
//! | SQLx Error | PostgreSQL Error Code | RepositoryError |
//! |------------|----------------------|-----------------|
//! | Database (unique violation on `batch_name`) | `23505` | `DuplicateName` |
//! | Database (other) | Any other | `Backend` |
//! | PoolClosed / Io / Tls / other | N/A | `Backend` |
//!
//! The roster is a `BIGINT[]` column, so a roster save is a single-row
//! `UPDATE`. Updates carry a `version` guard; a stale write affects zero rows
//! and surfaces as `Conflict`.

use std::sync::Arc;

use chrono::NaiveDate;
use sqlx::{FromRow, PgPool, Row};
use tracing::instrument;

use batchdesk_batches::{Batch, BatchDetails, NewBatch, Roster};
use batchdesk_core::{BatchId, EmployeeId, Entity, ExpectedVersion};

use super::r#trait::{BatchRepository, RepositoryError};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS batches (
    batch_id          BIGSERIAL PRIMARY KEY,
    batch_name        TEXT NOT NULL UNIQUE,
    batch_description TEXT,
    start_date        DATE,
    end_date          DATE,
    batch_size        BIGINT,
    employee_ids      BIGINT[] NOT NULL DEFAULT '{}',
    version           BIGINT NOT NULL DEFAULT 1
)
"#;

const COLUMNS: &str =
    "batch_id, batch_name, batch_description, start_date, end_date, batch_size, employee_ids, version";

#[derive(Debug, Clone)]
pub struct PostgresBatchRepository {
    pool: Arc<PgPool>,
}

impl PostgresBatchRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Create the `batches` table if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), RepositoryError> {
        sqlx::query(SCHEMA)
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", e))?;
        Ok(())
    }

    async fn fetch_one_where(
        &self,
        operation: &str,
        clause: &str,
        bind: BindValue<'_>,
    ) -> Result<Option<Batch>, RepositoryError> {
        let sql = format!("SELECT {COLUMNS} FROM batches WHERE {clause}");
        let query = sqlx::query(&sql);
        let query = match bind {
            BindValue::Id(id) => query.bind(id),
            BindValue::Name(name) => query.bind(name),
        };

        let row = query
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error(operation, e))?;

        row.map(|r| decode(operation, &r)).transpose()
    }
}

enum BindValue<'a> {
    Id(i64),
    Name(&'a str),
}

#[async_trait::async_trait]
impl BatchRepository for PostgresBatchRepository {
    #[instrument(skip(self, batch), fields(batch_name = %batch.details.name), err)]
    async fn insert(&self, batch: NewBatch) -> Result<Batch, RepositoryError> {
        let roster: Vec<i64> = batch.roster.ids().iter().map(|id| id.get()).collect();

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO batches (
                batch_name,
                batch_description,
                start_date,
                end_date,
                batch_size,
                employee_ids
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&batch.details.name)
        .bind(&batch.details.description)
        .bind(batch.details.start_date)
        .bind(batch.details.end_date)
        .bind(batch.details.size)
        .bind(&roster)
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| match map_sqlx_error("insert", e) {
            RepositoryError::DuplicateName(_) => RepositoryError::DuplicateName(batch.details.name.clone()),
            other => other,
        })?;

        decode("insert", &row)
    }

    #[instrument(skip(self), err)]
    async fn get(&self, id: BatchId) -> Result<Option<Batch>, RepositoryError> {
        self.fetch_one_where("get", "batch_id = $1", BindValue::Id(id.get()))
            .await
    }

    #[instrument(skip(self), err)]
    async fn find_by_name(&self, name: &str) -> Result<Option<Batch>, RepositoryError> {
        self.fetch_one_where("find_by_name", "batch_name = $1", BindValue::Name(name))
            .await
    }

    #[instrument(skip(self), err)]
    async fn exists_by_name(&self, name: &str) -> Result<bool, RepositoryError> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM batches WHERE batch_name = $1) AS found")
            .bind(name)
            .fetch_one(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("exists_by_name", e))?;

        row.try_get::<bool, _>("found")
            .map_err(|e| RepositoryError::Backend(format!("failed to read exists flag: {e}")))
    }

    #[instrument(skip(self), err)]
    async fn list(&self) -> Result<Vec<Batch>, RepositoryError> {
        let rows = sqlx::query(&format!("SELECT {COLUMNS} FROM batches ORDER BY batch_id ASC"))
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("list", e))?;

        rows.iter().map(|r| decode("list", r)).collect()
    }

    #[instrument(
        skip(self, batch),
        fields(batch_id = %batch.batch_id(), expected = ?expected),
        err
    )]
    async fn update(&self, batch: &Batch, expected: ExpectedVersion) -> Result<Batch, RepositoryError> {
        let expected_version: Option<i64> = match expected {
            ExpectedVersion::Any => None,
            ExpectedVersion::Exact(v) => Some(v as i64),
        };
        let roster: Vec<i64> = batch.employee_ids().iter().map(|id| id.get()).collect();
        let details = batch.details();

        let row = sqlx::query(&format!(
            r#"
            UPDATE batches SET
                batch_name = $2,
                batch_description = $3,
                start_date = $4,
                end_date = $5,
                batch_size = $6,
                employee_ids = $7,
                version = version + 1
            WHERE batch_id = $1
                AND ($8::bigint IS NULL OR version = $8)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(batch.batch_id().get())
        .bind(&details.name)
        .bind(&details.description)
        .bind(details.start_date)
        .bind(details.end_date)
        .bind(details.size)
        .bind(&roster)
        .bind(expected_version)
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| match map_sqlx_error("update", e) {
            RepositoryError::DuplicateName(_) => RepositoryError::DuplicateName(details.name.clone()),
            other => other,
        })?;

        match row {
            Some(row) => decode("update", &row),
            None => match self.get(batch.batch_id()).await? {
                Some(current) => Err(RepositoryError::Conflict(format!(
                    "batch {}: expected {expected:?}, found {}",
                    batch.batch_id(),
                    current.version()
                ))),
                None => Err(RepositoryError::Missing(batch.batch_id())),
            },
        }
    }

    #[instrument(skip(self), err)]
    async fn delete(&self, id: BatchId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM batches WHERE batch_id = $1")
            .bind(id.get())
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete", e))?;

        Ok(result.rows_affected() > 0)
    }
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> RepositoryError {
    match err {
        sqlx::Error::Database(db_err) => {
            let msg = format!("database error in {}: {}", operation, db_err.message());
            match db_err.code().as_deref() {
                // Unique violation; the only unique column besides the key is batch_name.
                Some("23505") => RepositoryError::DuplicateName(msg),
                _ => RepositoryError::Backend(msg),
            }
        }
        other => RepositoryError::Backend(format!("{operation}: {other}")),
    }
}

#[derive(Debug)]
struct BatchRow {
    batch_id: i64,
    batch_name: String,
    batch_description: Option<String>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    batch_size: Option<i64>,
    employee_ids: Vec<i64>,
    version: i64,
}

impl<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> for BatchRow {
    fn from_row(row: &'r sqlx::postgres::PgRow) -> Result<Self, sqlx::Error> {
        Ok(BatchRow {
            batch_id: row.try_get("batch_id")?,
            batch_name: row.try_get("batch_name")?,
            batch_description: row.try_get("batch_description")?,
            start_date: row.try_get("start_date")?,
            end_date: row.try_get("end_date")?,
            batch_size: row.try_get("batch_size")?,
            employee_ids: row.try_get("employee_ids")?,
            version: row.try_get("version")?,
        })
    }
}

impl From<BatchRow> for Batch {
    fn from(row: BatchRow) -> Self {
        Batch::restore(
            BatchId::new(row.batch_id),
            BatchDetails {
                name: row.batch_name,
                description: row.batch_description,
                start_date: row.start_date,
                end_date: row.end_date,
                size: row.batch_size,
            },
            Roster::from_ids(row.employee_ids.into_iter().map(EmployeeId::new)),
            row.version as u64,
        )
    }
}

fn decode(operation: &str, row: &sqlx::postgres::PgRow) -> Result<Batch, RepositoryError> {
    BatchRow::from_row(row)
        .map(Batch::from)
        .map_err(|e| RepositoryError::Backend(format!("failed to decode batch row in {operation}: {e}")))
}

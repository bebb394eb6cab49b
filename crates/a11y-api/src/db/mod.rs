//! Postgres-backed result store

pub mod schema;

use a11y_core::{CoreError, CoreResult, ResultStore, StoredScanRecord};
use async_trait::async_trait;
use schema::AccessibilityResult;
use sqlx::postgres::{PgPool, PgPoolOptions};

const COLUMNS: &str = "id, timestamp, url, json_response";

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }
}

fn store_error(e: sqlx::Error) -> CoreError {
    CoreError::Store(e.to_string())
}

#[async_trait]
impl ResultStore for PgStore {
    async fn save(&self, url: &str, json_response: &str) -> CoreResult<StoredScanRecord> {
        let row = sqlx::query_as::<_, AccessibilityResult>(&format!(
            "INSERT INTO accessibility_results (url, json_response) VALUES ($1, $2) RETURNING {}",
            COLUMNS
        ))
        .bind(url)
        .bind(json_response)
        .fetch_one(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(row.into())
    }

    async fn latest(&self) -> CoreResult<Option<StoredScanRecord>> {
        let row = sqlx::query_as::<_, AccessibilityResult>(&format!(
            "SELECT {} FROM accessibility_results ORDER BY timestamp DESC, id DESC LIMIT 1",
            COLUMNS
        ))
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(row.map(Into::into))
    }

    async fn recent(&self, limit: usize, offset: usize) -> CoreResult<Vec<StoredScanRecord>> {
        let rows = sqlx::query_as::<_, AccessibilityResult>(&format!(
            "SELECT {} FROM accessibility_results ORDER BY timestamp DESC, id DESC LIMIT $1 OFFSET $2",
            COLUMNS
        ))
        .bind(limit as i64)
        .bind(offset as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count(&self) -> CoreResult<u64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM accessibility_results")
            .fetch_one(&self.pool)
            .await
            .map_err(store_error)?;

        Ok(total.max(0) as u64)
    }
}

//! PostgreSQL-backed record store.
//!
//! Records are persisted as opaque JSONB documents keyed by a store-assigned
//! UUID, so the collection stays schema-less while keys stay well-formed. The
//! visit counter lives in its own single-row table: it can never be removed
//! through the record delete path, and its increment is a single
//! upsert-and-increment statement.

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::error::StoreError;

/// Fixed key of the distinguished visit-counter row.
pub const VISIT_COUNTER_KEY: &str = "site_visits";

/// A persisted record row: the document plus its store-assigned key.
#[derive(Debug, Clone)]
pub struct StoredRow {
    pub pk: Uuid,
    pub doc: JsonValue,
    pub created_at: DateTime<Utc>,
}

pub struct RecordStore {
    pool: PgPool,
    schema: String,
}

impl RecordStore {
    /// Connects and bootstraps the schema. Index creation mirrors the website
    /// lookup patterns: type + recency, and type + email.
    pub async fn connect(database_url: &str, schema: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", schema))
            .execute(&pool)
            .await?;

        sqlx::query(&format!(
            "CREATE TABLE IF NOT EXISTS {}.records (
                pk UUID PRIMARY KEY,
                doc JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL
            )",
            schema
        ))
        .execute(&pool)
        .await?;

        sqlx::query(&format!(
            "CREATE INDEX IF NOT EXISTS records_type_created_at_idx
             ON {}.records ((doc->>'type'), created_at DESC)",
            schema
        ))
        .execute(&pool)
        .await?;

        sqlx::query(&format!(
            "CREATE INDEX IF NOT EXISTS records_type_email_idx
             ON {}.records ((doc->>'type'), (doc->>'email')) WHERE doc ? 'email'",
            schema
        ))
        .execute(&pool)
        .await?;

        sqlx::query(&format!(
            "CREATE TABLE IF NOT EXISTS {}.site_visits (
                id TEXT PRIMARY KEY,
                count BIGINT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL
            )",
            schema
        ))
        .execute(&pool)
        .await?;

        Ok(Self {
            pool,
            schema: schema.to_string(),
        })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Every record, most recent first. An empty table yields an empty vec.
    pub async fn list_all(&self) -> Result<Vec<StoredRow>, StoreError> {
        let rows = sqlx::query(&format!(
            "SELECT pk, doc, created_at FROM {}.records ORDER BY created_at DESC",
            self.schema
        ))
        .fetch_all(&self.pool)
        .await?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(StoredRow {
                pk: row.try_get("pk")?,
                doc: row.try_get("doc")?,
                created_at: row.try_get("created_at")?,
            });
        }
        Ok(out)
    }

    /// Persists a document under a fresh store-assigned key and returns the
    /// stored row as the database sees it.
    pub async fn insert(
        &self,
        doc: &JsonValue,
        created_at: DateTime<Utc>,
    ) -> Result<StoredRow, StoreError> {
        let pk = Uuid::new_v4();
        let row = sqlx::query(&format!(
            "INSERT INTO {}.records (pk, doc, created_at) VALUES ($1, $2, $3)
             RETURNING pk, doc, created_at",
            self.schema
        ))
        .bind(pk)
        .bind(doc)
        .bind(created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(StoredRow {
            pk: row.try_get("pk")?,
            doc: row.try_get("doc")?,
            created_at: row.try_get("created_at")?,
        })
    }

    /// Removes the record with that key. Returns `false` when no such record
    /// exists; malformed keys never reach this method.
    pub async fn delete(&self, pk: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query(&format!("DELETE FROM {}.records WHERE pk = $1", self.schema))
            .bind(pk)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Atomic upsert-and-increment on the counter row, returning the
    /// post-increment value. Concurrent callers both land: the increment is a
    /// single statement, never a read-modify-write pair.
    pub async fn increment_visits(&self) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar(&format!(
            "INSERT INTO {}.site_visits AS sv (id, count, created_at) VALUES ($1, 1, now())
             ON CONFLICT (id) DO UPDATE SET count = sv.count + 1
             RETURNING sv.count",
            self.schema
        ))
        .bind(VISIT_COUNTER_KEY)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    /// Current counter value; 0 when the counter row has not been created yet.
    pub async fn visit_count(&self) -> Result<i64, StoreError> {
        let count: Option<i64> = sqlx::query_scalar(&format!(
            "SELECT count FROM {}.site_visits WHERE id = $1",
            self.schema
        ))
        .bind(VISIT_COUNTER_KEY)
        .fetch_optional(&self.pool)
        .await?;
        Ok(count.unwrap_or(0))
    }

    /// Connectivity probe for the health endpoint.
    pub async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

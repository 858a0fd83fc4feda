//! The record service.
//!
//! This is the long-lived application context handed to every HTTP handler.
//! It owns the lazily-initialized store handle and the thin business layer
//! the API needs: `createdAt` defaulting on create and key parsing on delete.
//! Everything else passes straight through to the store.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value as JsonValue;
use sqlx::PgPool;
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::domain::record::StoredRecord;
use crate::storage::records::{RecordStore, StoreError, StoredRow};

/// Connection settings captured at startup. The connection itself is
/// established on first use, serverless-style.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub database_url: String,
    pub schema: String,
}

pub struct RecordService {
    config: StoreConfig,
    store: OnceCell<RecordStore>,
}

impl RecordService {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            store: OnceCell::new(),
        }
    }

    /// The shared store, connecting on first use.
    ///
    /// Requests racing on a cold service all await the same in-flight
    /// initialization; exactly one connection pool is ever created.
    async fn store(&self) -> Result<&RecordStore, StoreError> {
        self.store
            .get_or_try_init(|| {
                RecordStore::connect(&self.config.database_url, &self.config.schema)
            })
            .await
    }

    /// Underlying pool (connects on first use). For operational checks and
    /// tests.
    pub async fn pool(&self) -> Result<PgPool, StoreError> {
        Ok(self.store().await?.pool().clone())
    }

    pub async fn list_records(&self) -> Result<Vec<StoredRecord>, StoreError> {
        let rows = self.store().await?.list_all().await?;
        Ok(rows.into_iter().map(annotate).collect())
    }

    /// Persists a record and returns it with its store-assigned key.
    ///
    /// `createdAt` is defaulted to the current time when absent; every other
    /// field is opaque and stored as submitted.
    pub async fn create_record(&self, mut doc: JsonValue) -> Result<StoredRecord, StoreError> {
        let obj = doc
            .as_object_mut()
            .ok_or_else(|| StoreError::InvalidInput("record must be a JSON object".to_string()))?;
        let created_at = resolve_created_at(obj);

        let row = self.store().await?.insert(&doc, created_at).await?;
        Ok(annotate(row))
    }

    /// Deletes by store-assigned key. Malformed keys are rejected before the
    /// store is consulted, keeping "invalid id" distinct from "already gone".
    pub async fn delete_record(&self, key: &str) -> Result<(), StoreError> {
        let pk = Uuid::parse_str(key)
            .map_err(|_| StoreError::InvalidInput(format!("malformed record key '{}'", key)))?;
        if self.store().await?.delete(pk).await? {
            Ok(())
        } else {
            Err(StoreError::NotFound)
        }
    }

    /// Post-increment visit count.
    pub async fn increment_visits(&self) -> Result<i64, StoreError> {
        self.store().await?.increment_visits().await
    }

    /// Current visit count; 0 before the first increment.
    pub async fn visit_count(&self) -> Result<i64, StoreError> {
        self.store().await?.visit_count().await
    }

    pub async fn ping(&self) -> Result<(), StoreError> {
        self.store().await?.ping().await
    }
}

fn annotate(mut row: StoredRow) -> StoredRecord {
    // The key annotation must win over any client-supplied field of the same
    // name once the document is flattened onto the wire.
    if let Some(obj) = row.doc.as_object_mut() {
        obj.remove("__backendId");
    }
    StoredRecord {
        backend_id: row.pk.to_string(),
        doc: row.doc,
    }
}

/// Fills in `createdAt` (RFC3339, matching the website clients' format) when
/// absent and resolves the instant used for ordering. A present-but-unparseable
/// value stays in the document untouched; ordering falls back to now.
fn resolve_created_at(obj: &mut serde_json::Map<String, JsonValue>) -> DateTime<Utc> {
    match obj.get("createdAt") {
        None => {
            let now = Utc::now();
            obj.insert(
                "createdAt".to_string(),
                JsonValue::from(now.to_rfc3339_opts(SecondsFormat::Millis, true)),
            );
            now
        }
        Some(value) => value
            .as_str()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(Utc::now),
    }
}

//! HTTP client for the record API.
//!
//! The website pages talk to the record endpoints through a small SDK with
//! list, create and delete calls plus a poll loop. [`RecordClient`] is that
//! SDK's typed counterpart; the poller drives [`list`](RecordClient::list)
//! on its ticks.

use anyhow::anyhow;
use serde_json::Value as JsonValue;

use crate::domain::record::StoredRecord;

/// Client for the record access API, shared by the poller and any consumer
/// that creates or deletes records.
#[derive(Clone)]
pub struct RecordClient {
    http: reqwest::Client,
    base_url: String,
}

impl RecordClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// One list-all fetch. An envelope with `ok:false` yields an empty
    /// snapshot, same as the website pages; transport errors bubble up.
    pub async fn list(&self) -> anyhow::Result<Vec<StoredRecord>> {
        let envelope: JsonValue = self
            .http
            .get(format!("{}/records", self.base_url))
            .send()
            .await?
            .json()
            .await?;

        if !envelope
            .get("ok")
            .and_then(JsonValue::as_bool)
            .unwrap_or(false)
        {
            return Ok(Vec::new());
        }

        let data = envelope
            .get("data")
            .cloned()
            .unwrap_or_else(|| JsonValue::Array(Vec::new()));
        Ok(serde_json::from_value(data)?)
    }

    /// Submits a record and returns it as stored, key included.
    pub async fn create(&self, record: &JsonValue) -> anyhow::Result<StoredRecord> {
        let response = self
            .http
            .post(format!("{}/records", self.base_url))
            .json(record)
            .send()
            .await?;
        let status = response.status();
        let envelope: JsonValue = response.json().await?;
        if !status.is_success() {
            return Err(anyhow!(
                "create rejected ({}): {}",
                status,
                envelope_error(&envelope)
            ));
        }
        let data = envelope
            .get("data")
            .cloned()
            .ok_or_else(|| anyhow!("create response carried no record"))?;
        Ok(serde_json::from_value(data)?)
    }

    /// Deletes by the store-assigned key (as returned in `__backendId`).
    pub async fn delete(&self, backend_id: &str) -> anyhow::Result<()> {
        let response = self
            .http
            .delete(format!("{}/records/{}", self.base_url, backend_id))
            .send()
            .await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let envelope: JsonValue = response.json().await.unwrap_or(JsonValue::Null);
        Err(anyhow!(
            "delete rejected ({}): {}",
            status,
            envelope_error(&envelope)
        ))
    }
}

fn envelope_error(envelope: &JsonValue) -> String {
    envelope
        .get("error")
        .and_then(JsonValue::as_str)
        .unwrap_or("unknown error")
        .to_string()
}

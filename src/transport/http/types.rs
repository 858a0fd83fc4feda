use crate::app::service::RecordService;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<RecordService>,
}

/// Response envelope shared by every endpoint:
/// `{ ok, data?, error?, count? }`.
#[derive(Serialize, Debug, ToSchema)]
pub struct ApiResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub data: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,
}

impl ApiResponse {
    pub fn ok() -> Self {
        Self {
            ok: true,
            data: None,
            error: None,
            count: None,
        }
    }

    pub fn with_data(data: JsonValue) -> Self {
        Self {
            data: Some(data),
            ..Self::ok()
        }
    }

    pub fn with_count(count: i64) -> Self {
        Self {
            count: Some(count),
            ..Self::ok()
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(message.into()),
            count: None,
        }
    }
}

pub fn json_422(err: JsonRejection, expected: &str) -> (StatusCode, Json<ApiResponse>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ApiResponse::err(format!(
            "Invalid JSON body: {} (expected: {})",
            err, expected
        ))),
    )
}

#[cfg(test)]
mod tests {
    use super::ApiResponse;
    use serde_json::json;

    #[test]
    fn envelope_omits_absent_fields() {
        assert_eq!(serde_json::to_value(ApiResponse::ok()).unwrap(), json!({"ok": true}));
        assert_eq!(
            serde_json::to_value(ApiResponse::with_count(7)).unwrap(),
            json!({"ok": true, "count": 7})
        );
        assert_eq!(
            serde_json::to_value(ApiResponse::err("Not found")).unwrap(),
            json!({"ok": false, "error": "Not found"})
        );
    }
}

use crate::transport::http::handlers::common::store_error_response;
use crate::transport::http::types::{json_422, ApiResponse, AppState};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::Value as JsonValue;

#[utoipa::path(
    get,
    path = "/records",
    responses(
        (status = 200, description = "Every stored record, most recent first, each carrying its __backendId", body = ApiResponse),
        (status = 500, description = "Store unavailable", body = ApiResponse)
    )
)]
pub async fn list_records_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.service.list_records().await {
        Ok(records) => (
            StatusCode::OK,
            Json(ApiResponse::with_data(serde_json::json!(records))),
        )
            .into_response(),
        Err(e) => store_error_response(e),
    }
}

#[utoipa::path(
    post,
    path = "/records",
    request_body = serde_json::Value,
    responses(
        (status = 201, description = "Record stored; response includes the store-assigned key", body = ApiResponse),
        (status = 422, description = "Body is not a JSON object", body = ApiResponse),
        (status = 500, description = "Store unavailable", body = ApiResponse)
    )
)]
pub async fn create_record_handler(
    State(state): State<AppState>,
    body: Result<Json<JsonValue>, JsonRejection>,
) -> impl IntoResponse {
    let Json(doc) = match body {
        Ok(v) => v,
        Err(e) => return json_422(e, "a JSON object with a 'type' field").into_response(),
    };
    if !doc.is_object() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiResponse::err("record must be a JSON object")),
        )
            .into_response();
    }

    match state.service.create_record(doc).await {
        Ok(stored) => (
            StatusCode::CREATED,
            Json(ApiResponse::with_data(serde_json::json!(stored))),
        )
            .into_response(),
        Err(e) => store_error_response(e),
    }
}

#[utoipa::path(
    delete,
    path = "/records/{id}",
    params(
        ("id" = String, Path, description = "Store-assigned record key (as returned in __backendId)")
    ),
    responses(
        (status = 200, description = "Record removed", body = ApiResponse),
        (status = 400, description = "Malformed key", body = ApiResponse),
        (status = 404, description = "No record with that key", body = ApiResponse),
        (status = 500, description = "Store unavailable", body = ApiResponse)
    )
)]
pub async fn delete_record_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.service.delete_record(&id).await {
        Ok(()) => (StatusCode::OK, Json(ApiResponse::ok())).into_response(),
        Err(e) => store_error_response(e),
    }
}

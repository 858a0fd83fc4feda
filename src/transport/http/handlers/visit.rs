use crate::transport::http::types::{ApiResponse, AppState};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    post,
    path = "/visit",
    responses(
        (status = 200, description = "Counter incremented; count is the post-increment value", body = ApiResponse),
        (status = 500, description = "Store unavailable", body = ApiResponse)
    )
)]
pub async fn record_visit_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.service.increment_visits().await {
        Ok(count) => (StatusCode::OK, Json(ApiResponse::with_count(count))).into_response(),
        Err(e) => {
            eprintln!("> visit increment error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::err("db_error")),
            )
                .into_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/visit",
    responses(
        (status = 200, description = "Current count; 0 before the first increment", body = ApiResponse),
        (status = 500, description = "Store unavailable", body = ApiResponse)
    )
)]
pub async fn visit_count_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.service.visit_count().await {
        Ok(count) => (StatusCode::OK, Json(ApiResponse::with_count(count))).into_response(),
        Err(e) => {
            eprintln!("> visit fetch error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::err("db_error")),
            )
                .into_response()
        }
    }
}

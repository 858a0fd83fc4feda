use crate::storage::records::StoreError;
use crate::transport::http::types::ApiResponse;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

/// Maps a store failure onto the record endpoints' wire contract.
pub fn store_error_response(err: StoreError) -> Response {
    match err {
        StoreError::InvalidInput(_) => (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::err("Invalid id")),
        )
            .into_response(),
        StoreError::NotFound => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::err("Not found")),
        )
            .into_response(),
        StoreError::Unavailable(err) => {
            eprintln!("> records api: store unavailable: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::err("Internal server error")),
            )
                .into_response()
        }
    }
}

/// 405 carrying an `Allow` header that lists the verbs the path supports.
pub fn method_not_allowed(allow: &'static str) -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, HeaderValue::from_static(allow))],
    )
        .into_response()
}

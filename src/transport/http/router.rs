use crate::transport::http::handlers::common::method_not_allowed;
use crate::transport::http::handlers::{health, records, visit};
use crate::transport::http::types::ApiResponse;
use axum::routing::{delete, get};
use axum::Router;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        records::list_records_handler,
        records::create_record_handler,
        records::delete_record_handler,
        visit::record_visit_handler,
        visit::visit_count_handler
    ),
    components(schemas(ApiResponse))
)]
#[allow(dead_code)]
pub struct ApiDoc;

pub fn create_router(app_state: crate::transport::http::types::AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route(
            "/records",
            get(records::list_records_handler)
                .post(records::create_record_handler)
                .fallback(|| async { method_not_allowed("GET, POST") }),
        )
        .route(
            "/records/:id",
            delete(records::delete_record_handler)
                .fallback(|| async { method_not_allowed("DELETE") }),
        )
        .route(
            "/visit",
            get(visit::visit_count_handler)
                .post(visit::record_visit_handler)
                .fallback(|| async { method_not_allowed("GET, POST") }),
        )
        .with_state(app_state)
}

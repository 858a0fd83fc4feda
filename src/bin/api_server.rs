// src/bin/api_server.rs

use std::sync::Arc;
use site_records::infra::config;
use site_records::transport;
use site_records::{RecordService, StoreConfig};
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    // Missing DATABASE_URL is fatal here, before the listener binds.
    let store_config = StoreConfig {
        database_url: config::database_url(),
        schema: config::database_schema(),
    };
    println!(
        "> Record service configured (schema '{}'); the store connects on first request.",
        store_config.schema
    );

    let service = Arc::new(RecordService::new(store_config));
    let app_state = transport::http::AppState { service };

    println!("> Starting API server...");
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let app = transport::http::create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()))
        .layer(cors);
    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
    println!("> API server listening on http://0.0.0.0:3000");
    println!("> Swagger UI available at http://localhost:3000/swagger-ui");
    println!("> Press Ctrl+C to shut down");

    tokio::select! {
        result = axum::serve(listener, app) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            println!("\n> Shutdown signal received (Ctrl+C).");
        }
    }

    Ok(())
}

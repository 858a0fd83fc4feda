//! Visit counter semantics over the HTTP boundary: lazy creation, sequential
//! increments, and concurrent increments with no lost updates.
//!
//! Requires DATABASE_URL to point at a reachable Postgres; the test keeps its
//! tables in a dedicated schema.

use serde_json::json;
use std::env;
use std::sync::Arc;

use site_records::{transport, RecordService, StoreConfig};

async fn wait_until_ready(addr: &str) {
    for _ in 0..30 {
        match tokio::net::TcpStream::connect(addr).await {
            Ok(_) => break,
            Err(_) => tokio::time::sleep(tokio::time::Duration::from_millis(100)).await,
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_visit_counter() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let store_config = StoreConfig {
        database_url: env::var("DATABASE_URL")
            .expect("DATABASE_URL must be set for integration tests"),
        schema: "visit_counter_test".to_string(),
    };

    let service = Arc::new(RecordService::new(store_config));

    // Start with no counter row at all.
    let pool = service.pool().await?;
    sqlx::query("TRUNCATE TABLE visit_counter_test.site_visits")
        .execute(&pool)
        .await?;

    let state = transport::http::AppState { service };
    let router = transport::http::create_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:3011").await?;
    let server = tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    wait_until_ready("127.0.0.1:3011").await;

    let base = "http://127.0.0.1:3011";
    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()?;

    // Absent counter reads as 0, not an error.
    let initial: serde_json::Value = client
        .get(format!("{}/visit", base))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(initial, json!({"ok": true, "count": 0}));

    // Three sequential increments return 1, 2, 3.
    for expected in 1..=3i64 {
        let bumped: serde_json::Value = client
            .post(format!("{}/visit", base))
            .send()
            .await?
            .json()
            .await?;
        assert_eq!(bumped, json!({"ok": true, "count": expected}));
    }

    // Twenty concurrent increments all land.
    let mut tasks = Vec::new();
    for _ in 0..20 {
        let client = client.clone();
        let url = format!("{}/visit", base);
        tasks.push(tokio::spawn(async move {
            let resp: serde_json::Value = client
                .post(&url)
                .send()
                .await
                .expect("request failed")
                .json()
                .await
                .expect("invalid response body");
            assert_eq!(resp["ok"], json!(true));
        }));
    }
    for task in tasks {
        task.await?;
    }

    let after: serde_json::Value = client
        .get(format!("{}/visit", base))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(after, json!({"ok": true, "count": 23}));

    // Unsupported verbs answer 405 with an Allow header.
    let del = client.delete(format!("{}/visit", base)).send().await?;
    assert_eq!(del.status(), 405);
    let allow = del.headers().get("allow").unwrap().to_str()?;
    assert!(allow.contains("GET") && allow.contains("POST"));

    server.abort();
    let _ = server.await;
    Ok(())
}

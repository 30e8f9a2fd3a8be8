//! HTTP contract tests for the AI suggestion backend.
//!
//! The router is served on an ephemeral port. The upstream completion API
//! is pointed at a closed local port, so the upstream-failure path is
//! exercised without any network access.

use std::sync::Arc;

use ai_chef::config::Config;
use ai_chef::server;

fn closed_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

/// Serve the router on an ephemeral port, returning its base URL.
async fn spawn_server() -> String {
    let mut config = Config::default();
    config.ai.base_url = format!("http://127.0.0.1:{}", closed_port());
    config.ai.timeout_secs = 1;

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = server::app(Arc::new(config));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

#[tokio::test]
async fn test_root_is_alive() {
    let base = spawn_server().await;

    let response = reqwest::get(&base).await.unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "AI Chef backend is running");
}

#[tokio::test]
async fn test_missing_query_is_bad_request() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/ai-chef", base))
        .json(&serde_json::json!({}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Query is required");
}

#[tokio::test]
async fn test_blank_query_is_bad_request() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/ai-chef", base))
        .json(&serde_json::json!({ "query": "   " }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_upstream_failure_is_internal_error() {
    // The key must be present for the request to reach the (closed)
    // upstream port at all.
    std::env::set_var("GROQ_API_KEY", "test-key");

    let base = spawn_server().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/ai-chef", base))
        .json(&serde_json::json!({ "query": "what can I cook with eggs?" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 500);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Failed to fetch AI response");
}

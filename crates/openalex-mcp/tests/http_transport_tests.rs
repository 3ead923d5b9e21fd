//! Tests for the stateless HTTP transport.
//!
//! Serves the router on an ephemeral port and talks to it with reqwest.

use std::net::SocketAddr;
use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::{Value, json};

use openalex_mcp::client::OpenAlexClient;
use openalex_mcp::config::Config;
use openalex_mcp::server::{McpServer, http};

/// Start the router on 127.0.0.1 with an OS-assigned port.
async fn spawn_server() -> SocketAddr {
    let client = OpenAlexClient::new(&Config::for_testing("http://localhost:1")).unwrap();
    let server = McpServer::new(client, "openalex-http-test");
    let router = http::create_router(Arc::new(server));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

#[tokio::test]
async fn test_post_mcp_tools_list() {
    let addr = spawn_server().await;

    let response = reqwest::Client::new()
        .post(format!("http://{addr}/mcp"))
        .header("content-type", "application/json")
        .body(json!({"jsonrpc": "2.0", "id": 1, "method": "tools/list"}).to_string())
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["jsonrpc"], "2.0");
    assert_eq!(body["id"], 1);
    assert_eq!(body["result"]["tools"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_post_mcp_notification_accepted() {
    let addr = spawn_server().await;

    let response = reqwest::Client::new()
        .post(format!("http://{addr}/mcp"))
        .header("content-type", "application/json")
        .body(json!({"jsonrpc": "2.0", "method": "notifications/initialized"}).to_string())
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    assert!(response.bytes().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_post_mcp_parse_error() {
    let addr = spawn_server().await;

    let response = reqwest::Client::new()
        .post(format!("http://{addr}/mcp"))
        .body("{broken")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"]["code"], -32700);
}

#[tokio::test]
async fn test_health_endpoint() {
    let addr = spawn_server().await;

    for route in ["/health", "/"] {
        let response = reqwest::get(format!("http://{addr}{route}")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = response.json().await.unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "openalex-http-test");
        assert_eq!(body["tools"], 3);
    }
}

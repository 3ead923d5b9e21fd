//! Stateless HTTP transport.
//!
//! `POST /mcp` carries one JSON-RPC frame per request; there are no sessions.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::McpServer;
use super::transport;

/// Create the HTTP router for MCP.
pub fn create_router(server: Arc<McpServer>) -> Router {
    Router::new()
        .route("/", get(health_check))
        .route("/health", get(health_check))
        .route("/mcp", post(handle_mcp_post))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(server)
}

async fn health_check(State(server): State<Arc<McpServer>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": server.app_name(),
        "version": env!("CARGO_PKG_VERSION"),
        "tools": server.tools().len()
    }))
}

/// Handle POST requests to /mcp.
async fn handle_mcp_post(State(server): State<Arc<McpServer>>, body: String) -> Response {
    match transport::handle_frame(&server, &body).await {
        Some(response) => Json(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

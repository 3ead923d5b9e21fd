//! MCP server implementation.
//!
//! Provides both stdio (for desktop clients) and HTTP transports over one
//! shared JSON-RPC dispatcher.

pub mod http;
pub mod stdio;
pub mod transport;

use std::net::SocketAddr;
use std::sync::Arc;

use crate::client::OpenAlexClient;
use crate::prompts::{self, McpPrompt};
use crate::resources::{self, McpResourceTemplate, ResourceContents};
use crate::tools::{self, CallToolResult, McpTool, ToolContext};

/// MCP server for OpenAlex.
pub struct McpServer {
    /// Name reported in `serverInfo`.
    app_name: String,

    /// Tool execution context.
    ctx: ToolContext,

    /// Registered tools.
    tools: Vec<Box<dyn McpTool>>,

    /// Registered resource templates.
    resources: Vec<Box<dyn McpResourceTemplate>>,

    /// Registered prompts.
    prompts: Vec<Box<dyn McpPrompt>>,
}

impl McpServer {
    /// Create a new MCP server.
    #[must_use]
    pub fn new(client: OpenAlexClient, app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            ctx: ToolContext::new(Arc::new(client)),
            tools: tools::register_all_tools(),
            resources: resources::register_all_resources(),
            prompts: prompts::register_all_prompts(),
        }
    }

    /// Run the server in stdio mode.
    ///
    /// # Errors
    ///
    /// Returns error on I/O failure.
    pub async fn run_stdio(self) -> anyhow::Result<()> {
        tracing::info!("Starting MCP server in stdio mode");
        self.log_registrations();

        stdio::run_stdio(&self).await
    }

    /// Run the server in HTTP mode.
    ///
    /// # Errors
    ///
    /// Returns error on server failure.
    pub async fn run_http(self, port: u16) -> anyhow::Result<()> {
        tracing::info!("Starting MCP server in HTTP mode on port {}", port);
        self.log_registrations();

        let router = http::create_router(Arc::new(self));
        let addr = SocketAddr::from(([0, 0, 0, 0], port));

        tracing::info!("HTTP server listening on http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;

        tracing::info!("HTTP server shut down");
        Ok(())
    }

    /// Call a tool by name. `None` if no such tool exists.
    pub async fn call_tool(&self, name: &str, arguments: serde_json::Value) -> Option<CallToolResult> {
        let tool = self.get_tool(name)?;
        tracing::info!(tool = %name, "Executing tool");
        Some(tool.call(&self.ctx, arguments).await)
    }

    /// Read a resource by URI. `None` if no template serves it.
    pub async fn read_resource(&self, uri: &str) -> Option<ResourceContents> {
        let resource = self.resources.iter().find(|r| r.matches(uri))?;
        Some(resource.read(&self.ctx, uri).await)
    }

    /// Get tool by name.
    #[must_use]
    pub fn get_tool(&self, name: &str) -> Option<&dyn McpTool> {
        self.tools.iter().find(|t| t.name() == name).map(|t| t.as_ref())
    }

    /// Registered tools.
    #[must_use]
    pub fn tools(&self) -> &[Box<dyn McpTool>] {
        &self.tools
    }

    /// Registered resource templates.
    #[must_use]
    pub fn resources(&self) -> &[Box<dyn McpResourceTemplate>] {
        &self.resources
    }

    /// Registered prompts.
    #[must_use]
    pub fn prompts(&self) -> &[Box<dyn McpPrompt>] {
        &self.prompts
    }

    /// Name reported in `serverInfo`.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Get tool context for execution.
    #[must_use]
    pub const fn context(&self) -> &ToolContext {
        &self.ctx
    }

    fn log_registrations(&self) {
        tracing::info!(
            tools = self.tools.len(),
            resources = self.resources.len(),
            prompts = self.prompts.len(),
            "Registered handlers"
        );
        for tool in &self.tools {
            tracing::debug!("  - {}: {}", tool.name(), tool.description());
        }
    }
}

impl std::fmt::Debug for McpServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("McpServer")
            .field("app_name", &self.app_name)
            .field("tools", &self.tools.len())
            .field("resources", &self.resources.len())
            .field("prompts", &self.prompts.len())
            .finish()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install CTRL+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Received shutdown signal");
}

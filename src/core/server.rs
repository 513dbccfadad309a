//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol on top of the tools domain.
//!
//! ## Tool Architecture
//!
//! Tools are defined in `domains/tools/definitions/` with one file per tool.
//! Each tool defines:
//! - Parameters struct (for rmcp)
//! - `execute()` method (core logic)
//! - `http_handler()` method (called via ToolRegistry for HTTP transport)
//!
//! The ToolRouter is built dynamically in `domains/tools/router.rs`, so
//! adding a tool does not touch this file.

use rmcp::{ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler};
use std::sync::Arc;

use super::config::Config;
use crate::domains::tools::{ToolContext, ToolRegistry, build_tool_router};

#[cfg(feature = "http")]
use crate::domains::tools::ToolError;

/// Instructions sent to clients on initialize.
pub const SERVER_INSTRUCTIONS: &str = "FHIR tools for building and checking test data. \
    Generate fictional Australian identifiers (HPI-I, IHI, HPI-O, Medicare, DVA) and UUIDs, \
    look up codes on a terminology server, and validate resources with the HL7 FHIR validator.";

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Tool metadata and HTTP dispatch.
    registry: Arc<ToolRegistry>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server with live tool dependencies.
    pub fn new(config: Config) -> super::error::Result<Self> {
        config.validate()?;
        let config = Arc::new(config);
        let context = ToolContext::from_config(config.clone())?;
        Ok(Self::with_context(context))
    }

    /// Create a server around an existing tool context.
    pub fn with_context(context: ToolContext) -> Self {
        Self {
            config: context.config.clone(),
            tool_router: build_tool_router::<Self>(&context),
            registry: Arc::new(ToolRegistry::new(context)),
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        ToolRegistry::get_all_tools()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        self.registry.call_tool(name, arguments).await
    }

    /// Names of all registered tools.
    pub fn tool_names(&self) -> Vec<&'static str> {
        self.registry.tool_names()
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::context::testing::test_context;

    #[test]
    fn test_server_identity() {
        let server = McpServer::with_context(test_context());
        assert_eq!(server.name(), "fhir-tools");
        assert_eq!(server.version(), env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_list_tools() {
        let server = McpServer::with_context(test_context());
        let tools = server.list_tools();
        assert_eq!(tools.len(), 8);
        assert_eq!(tools.len(), server.tool_router.list_all().len());
        for tool in &tools {
            assert!(tool["name"].is_string());
            assert!(tool["inputSchema"].is_object());
        }
    }

    #[test]
    fn test_new_from_default_config() {
        let server = McpServer::new(Config::default()).unwrap();
        assert_eq!(server.name(), "fhir-tools");
        assert_eq!(server.tool_names().len(), 8);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = Config::default();
        config.validator.timeout_secs = 0;
        assert!(McpServer::new(config).is_err());
    }

    #[test]
    fn test_get_info_enables_tools_only() {
        let server = McpServer::with_context(test_context());
        let info = server.get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_none());
        assert!(info.capabilities.prompts.is_none());
        assert_eq!(info.instructions.as_deref(), Some(SERVER_INSTRUCTIONS));
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_call_tool_via_registry() {
        let server = McpServer::with_context(test_context());
        let result = server
            .call_tool("generate-dva", serde_json::json!({}))
            .await
            .unwrap();
        assert_eq!(result["content"][0]["text"], "N0000000");
    }
}

//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - A registry of all available tools
//! - HTTP dispatch for tool calls (when http feature is enabled)
//! - Tool metadata for listing

use rmcp::model::Tool;
#[cfg(feature = "http")]
use tracing::warn;

use super::ToolContext;
use super::definitions::{GenerateIdentifierTool, GenerateUuidTool, LookupCodeTool, ValidateTool};
#[cfg(feature = "http")]
use super::ToolError;

/// Tool registry - manages all available tools.
pub struct ToolRegistry {
    #[cfg_attr(not(feature = "http"), allow(dead_code))]
    context: ToolContext,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new(context: ToolContext) -> Self {
        Self { context }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        GenerateIdentifierTool::all()
            .map(|tool| tool.name())
            .chain([
                GenerateUuidTool::NAME,
                ValidateTool::NAME,
                LookupCodeTool::NAME,
            ])
            .collect()
    }

    /// Get all tools as Tool models (metadata).
    ///
    /// This is the single source of truth for tool metadata on both
    /// the HTTP and STDIO/TCP transports.
    pub fn get_all_tools() -> Vec<Tool> {
        GenerateIdentifierTool::all()
            .map(|tool| tool.to_tool())
            .chain([
                GenerateUuidTool::to_tool(),
                ValidateTool::to_tool(),
                LookupCodeTool::to_tool(),
            ])
            .collect()
    }

    /// Dispatch an HTTP tool call to the appropriate handler.
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        if let Some(tool) = GenerateIdentifierTool::from_name(name) {
            return tool.http_handler(arguments, &self.context);
        }

        match name {
            GenerateUuidTool::NAME => GenerateUuidTool::http_handler(arguments),
            ValidateTool::NAME => ValidateTool::http_handler(arguments, &self.context).await,
            LookupCodeTool::NAME => LookupCodeTool::http_handler(arguments, &self.context).await,
            _ => {
                warn!("Unknown tool requested: {}", name);
                Err(ToolError::not_found(name))
            }
        }
    }
}

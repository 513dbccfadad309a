//! UUID generator tool.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use uuid::Uuid;

use crate::domains::tools::definitions::common::{parse_params, success_result};

#[cfg(feature = "http")]
use crate::domains::tools::{ToolError, definitions::common::to_http_response};

/// The UUID tool takes no parameters.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct GenerateUuidParams {}

/// Returns a random UUID v4, e.g. for resource ids and `urn:uuid:` references.
pub struct GenerateUuidTool;

impl GenerateUuidTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "generate-uuid";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Generate a random UUID v4 string. Use this when you need to create unique identifiers.";

    /// Execute the tool logic.
    pub fn execute() -> CallToolResult {
        success_result(Uuid::new_v4().to_string())
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(arguments: serde_json::Value) -> Result<serde_json::Value, ToolError> {
        let _params: GenerateUuidParams = parse_params(arguments.as_object().cloned())?;
        Ok(to_http_response(Self::execute()))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<GenerateUuidParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for STDIO/TCP transport.
    pub fn create_route<S>() -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone();
            async move {
                let _params: GenerateUuidParams = parse_params(args)?;
                Ok::<_, McpError>(Self::execute())
            }
            .boxed()
        })
    }
}

//! Australian healthcare identifier generator tools.
//!
//! One tool per [`IdentifierKind`]: `generate-hpi-i`, `generate-ihi`,
//! `generate-hpi-o`, `generate-medicare` and `generate-dva`. None of them
//! take arguments; each returns a single fictional identifier as text.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::domains::identifiers::{IdentifierKind, RandomDigitSource};
use crate::domains::tools::ToolContext;
use crate::domains::tools::definitions::common::{parse_params, success_result};

#[cfg(feature = "http")]
use crate::domains::tools::{ToolError, definitions::common::to_http_response};

// ============================================================================
// Tool Parameters
// ============================================================================

/// The identifier tools take no parameters.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct GenerateIdentifierParams {}

// ============================================================================
// Tool Definition
// ============================================================================

/// Identifier generator tool for one identifier kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateIdentifierTool {
    kind: IdentifierKind,
}

impl GenerateIdentifierTool {
    pub fn new(kind: IdentifierKind) -> Self {
        Self { kind }
    }

    /// One tool per identifier kind, in registration order.
    pub fn all() -> impl Iterator<Item = Self> {
        IdentifierKind::ALL.into_iter().map(Self::new)
    }

    pub fn kind(&self) -> IdentifierKind {
        self.kind
    }

    /// Tool name as registered in MCP.
    pub fn name(&self) -> &'static str {
        match self.kind {
            IdentifierKind::HpiI => "generate-hpi-i",
            IdentifierKind::Ihi => "generate-ihi",
            IdentifierKind::HpiO => "generate-hpi-o",
            IdentifierKind::Medicare => "generate-medicare",
            IdentifierKind::Dva => "generate-dva",
        }
    }

    /// Look up the tool for a tool name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().find(|tool| tool.name() == name)
    }

    /// Tool description shown to clients.
    pub fn description(&self) -> &'static str {
        match self.kind {
            IdentifierKind::HpiI => "Generate a fictional but valid HPI-I.",
            IdentifierKind::Ihi => {
                "Generate a fictional but valid Individual Healthcare Identifier (IHI)."
            }
            IdentifierKind::HpiO => {
                "Generate a fictional but valid HPI-O (Healthcare Provider Identifier - Organisation)."
            }
            IdentifierKind::Medicare => "Generate a fictional but valid Medicare number.",
            IdentifierKind::Dva => {
                "Generate a fictional but valid DVA (Department of Veterans' Affairs) number."
            }
        }
    }

    /// Execute the tool logic.
    #[instrument(skip_all, fields(kind = %self.kind))]
    pub fn execute(&self, source: &dyn RandomDigitSource) -> CallToolResult {
        let identifier = self.kind.generate(source);
        debug!("Generated {}", identifier.kind());
        success_result(identifier.into_value())
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(
        &self,
        arguments: serde_json::Value,
        context: &ToolContext,
    ) -> Result<serde_json::Value, ToolError> {
        let _params: GenerateIdentifierParams = parse_params(arguments.as_object().cloned())?;
        let result = self.execute(context.digits.as_ref());
        Ok(to_http_response(result))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool(&self) -> Tool {
        Tool {
            name: self.name().into(),
            description: Some(self.description().into()),
            input_schema: cached_schema_for_type::<GenerateIdentifierParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for STDIO/TCP transport.
    pub fn create_route<S>(self, context: &ToolContext) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        let digits: Arc<dyn RandomDigitSource> = context.digits.clone();
        ToolRoute::new_dyn(self.to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone();
            let digits = digits.clone();
            async move {
                let _params: GenerateIdentifierParams = parse_params(args)?;
                Ok::<_, McpError>(self.execute(digits.as_ref()))
            }
            .boxed()
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

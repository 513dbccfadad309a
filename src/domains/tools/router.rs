//! Tool Router - builds the rmcp ToolRouter for STDIO/TCP transport.
//!
//! Each tool knows how to create its own route; this module only
//! collects them.

use rmcp::handler::server::tool::ToolRouter;

use super::ToolContext;
use super::definitions::{GenerateIdentifierTool, GenerateUuidTool, LookupCodeTool, ValidateTool};

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(context: &ToolContext) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    let router = GenerateIdentifierTool::all()
        .fold(ToolRouter::new(), |router, tool| {
            router.with_route(tool.create_route(context))
        });

    router
        .with_route(GenerateUuidTool::create_route())
        .with_route(ValidateTool::create_route(context))
        .with_route(LookupCodeTool::create_route(context))
}

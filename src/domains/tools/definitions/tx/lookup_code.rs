//! Terminology code lookup tool.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::domains::terminology::{TerminologyClient, TerminologyError};
use crate::domains::tools::ToolContext;
use crate::domains::tools::definitions::common::{error_result, parse_params, success_result};

#[cfg(feature = "http")]
use crate::domains::tools::{ToolError, definitions::common::to_http_response};

/// Parameters for the lookup-code tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct LookupCodeParams {
    #[schemars(description = "Text to search for (e.g. \"hypertension\", \"tracheotomy\", \
        \"left quad laceration\")")]
    pub filter: String,

    #[schemars(description = "ValueSet URL to search within. Common values: \
        \"http://snomed.info/sct?fhir_vs\" (all of SNOMED CT, use this if not specified), \
        \"http://loinc.org/vs\" (all of LOINC), \
        \"http://snomed.info/sct?fhir_vs=isa/71388002\" (SNOMED CT procedures, i.e. all codes \
        that are a subtype of Procedure (71388002))")]
    pub url: String,
}

/// Lookup-code tool - finds the best matching coding in a value set.
pub struct LookupCodeTool;

impl LookupCodeTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "lookup-code";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Look up a clinical code based on text description using a \
         FHIR terminology server. Use this when populating coded fields within FHIR resources to \
         ensure that the code is valid and compliant with the value set binding of the element. \
         Returns the most relevant coding from the value set.";

    /// Message returned when the expansion is empty.
    pub const NO_MATCH_MESSAGE: &'static str = "No matching codes found";

    /// Execute the tool logic.
    #[instrument(skip(client))]
    pub async fn execute(params: LookupCodeParams, client: &dyn TerminologyClient) -> CallToolResult {
        info!("Lookup-code tool called");

        match client.lookup_code(&params.url, &params.filter).await {
            Ok(Some(coding)) => match serde_json::to_string_pretty(&coding) {
                Ok(json) => success_result(json),
                Err(e) => error_result(&format!("Error looking up codes: {}", e)),
            },
            Ok(None) => success_result(Self::NO_MATCH_MESSAGE),
            Err(e @ TerminologyError::Status { .. }) => error_result(&e.to_string()),
            Err(e) => error_result(&format!("Error looking up codes: {}", e)),
        }
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        context: &ToolContext,
    ) -> Result<serde_json::Value, ToolError> {
        let params: LookupCodeParams = parse_params(arguments.as_object().cloned())?;
        let result = Self::execute(params, context.terminology.as_ref()).await;
        Ok(to_http_response(result))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<LookupCodeParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for STDIO/TCP transport.
    pub fn create_route<S>(context: &ToolContext) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        let client: Arc<dyn TerminologyClient> = context.terminology.clone();
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone();
            let client = client.clone();
            async move {
                let params: LookupCodeParams = parse_params(args)?;
                Ok::<_, McpError>(Self::execute(params, client.as_ref()).await)
            }
            .boxed()
        })
    }
}

//! FHIR resource validation tool.
//!
//! Runs the official HL7 FHIR validator over a resource and reports its
//! warning and error lines.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::domains::tools::ToolContext;
use crate::domains::tools::definitions::common::{error_result, parse_params, success_result};
use crate::domains::validation::{
    FhirVersion, ResourceValidator, SnomedEdition, ValidationError, ValidationRequest,
};

#[cfg(feature = "http")]
use crate::domains::tools::{ToolError, definitions::common::to_http_response};

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the validate tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidateParams {
    /// FHIR resource in JSON format.
    #[schemars(description = "FHIR resource in JSON format")]
    pub resource: String,

    /// FHIR version to validate against.
    #[serde(default)]
    #[schemars(description = "The version of FHIR to validate against. Supported values are:
        - \"4.0.1\": R4 (use this if version not specified)
        - \"1.0.2\": DSTU2
        - \"1.4.0\": STU3 Ballot 3 (Montreal), sometimes known as DSTU 2.1
        - \"3.0.2\": STU3, also known as R3
        - \"4.1.0\": R4B Ballot 1
        - \"4.3.0\": R4B
        - \"6.0.0\": R6 (current development build)")]
    pub fhir_version: FhirVersion,

    /// SNOMED CT edition to use for validation.
    #[serde(default)]
    #[schemars(description = "SNOMED CT version to use for validation. Defaults to international version if not
        specified. National implementation guides will generally need the SNOMED edition for their
        country. Supported values are:
        - \"intl\": International
        - \"us\": United States
        - \"uk\": United Kingdom
        - \"au\": Australia
        - \"nl\": Netherlands
        - \"ca\": Canada
        - \"se\": Sweden
        - \"dk\": Denmark
        - \"es\": Spain")]
    pub snomed_version: SnomedEdition,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Validate tool - checks a FHIR resource with the HL7 validator.
pub struct ValidateTool;

impl ValidateTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "validate";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Validate a FHIR resource using the official FHIR validator. \
         If the resource contains coded fields, use the lookup-code tool to make sure that valid \
         codes are populated before attempting validation.";

    /// Message returned when the validator reports nothing of interest.
    pub const CLEAN_MESSAGE: &'static str = "Validation completed with no warnings or errors";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(fhir_version = %params.fhir_version, snomed = %params.snomed_version))]
    pub async fn execute(params: ValidateParams, validator: &dyn ResourceValidator) -> CallToolResult {
        info!("Validate tool called ({} bytes)", params.resource.len());

        let request = ValidationRequest {
            resource: params.resource,
            fhir_version: params.fhir_version,
            snomed_edition: params.snomed_version,
        };

        match validator.validate(&request).await {
            Ok(report) if report.is_clean() => success_result(Self::CLEAN_MESSAGE),
            Ok(report) => {
                info!(
                    "Validation reported {} issue(s), errors: {}",
                    report.issues.len(),
                    report.has_errors()
                );
                success_result(report.issues.join("\n"))
            }
            Err(ValidationError::NoOutput) => {
                error_result("Validation failed: No output from validator")
            }
            Err(e) => {
                error!("Validation failed: {}", e);
                error_result(&format!("Error during validation: {}", e))
            }
        }
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        context: &ToolContext,
    ) -> Result<serde_json::Value, ToolError> {
        let params: ValidateParams = parse_params(arguments.as_object().cloned())?;
        let result = Self::execute(params, context.validator.as_ref()).await;
        Ok(to_http_response(result))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<ValidateParams>(),
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
        let validator: Arc<dyn ResourceValidator> = context.validator.clone();
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone();
            let validator = validator.clone();
            async move {
                let params: ValidateParams = parse_params(args)?;
                Ok::<_, McpError>(Self::execute(params, validator.as_ref()).await)
            }
            .boxed()
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

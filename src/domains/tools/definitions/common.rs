//! Common utilities shared across tool definitions.
//!
//! Result builders, argument decoding, and the HTTP response shape.

use rmcp::model::{CallToolResult, Content, JsonObject};
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::domains::tools::ToolError;

/// Create an error result with a formatted message.
pub fn error_result(message: &str) -> CallToolResult {
    warn!("{}", message);
    CallToolResult::error(vec![Content::text(message.to_string())])
}

/// Create a success result with text content.
pub fn success_result(content: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(content.into())])
}

/// Decode tool arguments into a params struct.
///
/// Missing arguments decode as an empty object, so parameterless tools
/// accept both `{}` and no arguments at all.
pub fn parse_params<T: DeserializeOwned>(arguments: Option<JsonObject>) -> Result<T, ToolError> {
    let object = serde_json::Value::Object(arguments.unwrap_or_default());
    serde_json::from_value(object).map_err(|e| ToolError::invalid_arguments(e.to_string()))
}

/// Shape a tool result the way the HTTP transport returns it.
#[cfg(feature = "http")]
pub fn to_http_response(result: CallToolResult) -> serde_json::Value {
    serde_json::json!({
        "content": result.content,
        "isError": result.is_error.unwrap_or(false)
    })
}

/// First text block of a result.
#[cfg(test)]
pub fn result_text(result: &CallToolResult) -> &str {
    match &result.content[0].raw {
        rmcp::model::RawContent::Text(text) => &text.text,
        _ => panic!("Expected text content"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Params {
        name: String,
        #[serde(default)]
        count: u32,
    }

    #[derive(Debug, Deserialize)]
    struct NoParams {}

    #[test]
    fn test_parse_params() {
        let mut args = JsonObject::new();
        args.insert("name".to_string(), serde_json::json!("ihi"));
        let params: Params = parse_params(Some(args)).unwrap();
        assert_eq!(params.name, "ihi");
        assert_eq!(params.count, 0);
    }

    #[test]
    fn test_parse_params_missing_field() {
        let err = parse_params::<Params>(None).unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[test]
    fn test_parse_empty_params() {
        assert!(parse_params::<NoParams>(None).is_ok());
    }

    #[test]
    fn test_result_builders() {
        let ok = success_result("8003610000000006");
        assert_eq!(ok.is_error, Some(false));
        assert_eq!(result_text(&ok), "8003610000000006");

        let err = error_result("No output");
        assert_eq!(err.is_error, Some(true));
    }
}

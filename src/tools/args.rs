use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{McpError, McpResult};
use crate::mcp::types::ToolInputSchema;

/// How `tools/call` arguments are checked against a tool's declared schema.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgumentMode {
    /// Required arguments must be present and be strings
    #[default]
    Strict,
    /// Missing or non-string arguments silently become empty strings
    Lenient,
}

/// Return `field` when it is present and a string, otherwise `""`.
pub fn string_arg(args: &Value, field: &str) -> String {
    args.get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Parse JSON value into a typed parameter struct
pub fn parse_params<T: DeserializeOwned>(params: Value) -> McpResult<T> {
    serde_json::from_value(params)
        .map_err(|e| McpError::InvalidParameter(format!("Invalid parameters: {}", e)))
}

/// Check or normalize raw arguments against `schema` before a tool sees them.
pub fn prepare_arguments(
    mode: ArgumentMode,
    schema: &ToolInputSchema,
    args: Value,
) -> McpResult<Value> {
    match mode {
        ArgumentMode::Strict => {
            let args = match args {
                Value::Null => Value::Object(Map::new()),
                Value::Object(_) => args,
                _ => {
                    return Err(McpError::InvalidParameter(
                        "arguments must be an object".to_string(),
                    ));
                }
            };

            for field in &schema.required {
                match args.get(field) {
                    Some(Value::String(_)) => {}
                    Some(_) => {
                        return Err(McpError::InvalidParameter(format!(
                            "argument '{}' must be a string",
                            field
                        )));
                    }
                    None => {
                        return Err(McpError::InvalidParameter(format!(
                            "missing required argument '{}'",
                            field
                        )));
                    }
                }
            }

            Ok(args)
        }
        ArgumentMode::Lenient => Ok(Value::Object(
            schema
                .properties
                .keys()
                .map(|field| (field.clone(), Value::String(string_arg(&args, field))))
                .collect(),
        )),
    }
}

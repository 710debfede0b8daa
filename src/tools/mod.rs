pub mod args;
pub mod conversations;
pub mod messages;
pub mod reactions;
pub mod users;

use crate::error::McpResult;
use crate::mcp::types::{Property, ToolInputSchema};
use async_trait::async_trait;
use serde_json::Value;

pub use args::{ArgumentMode, parse_params, prepare_arguments, string_arg};

pub(crate) const CHANNEL_ID: &str = "Channel ID";
pub(crate) const MESSAGE_TIMESTAMP: &str = "Message timestamp";
pub(crate) const MESSAGE_TEXT: &str = "Message text";

#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn input_schema(&self) -> ToolInputSchema;
    async fn execute(&self, params: Value) -> McpResult<Value>;
}

fn create_string_prop(description: &str) -> Property {
    Property {
        property_type: "string".to_string(),
        description: Some(description.to_string()),
    }
}

/// Object schema whose properties are all required strings.
pub(crate) fn required_strings(fields: &[(&str, &str)]) -> ToolInputSchema {
    ToolInputSchema {
        schema_type: "object".to_string(),
        properties: fields
            .iter()
            .map(|(name, description)| (name.to_string(), create_string_prop(description)))
            .collect(),
        required: fields.iter().map(|(name, _)| name.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_required_strings_schema_shape() {
        let schema = required_strings(&[("channel", CHANNEL_ID), ("text", MESSAGE_TEXT)]);

        assert_eq!(
            serde_json::to_value(&schema).unwrap(),
            json!({
                "type": "object",
                "properties": {
                    "channel": {"type": "string", "description": "Channel ID"},
                    "text": {"type": "string", "description": "Message text"},
                },
                "required": ["channel", "text"],
            })
        );
    }

    #[test]
    fn test_empty_schema() {
        let schema = required_strings(&[]);
        assert!(schema.properties.is_empty());
        assert!(schema.required.is_empty());
    }
}

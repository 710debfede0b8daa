use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use super::{CHANNEL_ID, MESSAGE_TIMESTAMP, Tool, parse_params, required_strings};
use crate::error::McpResult;
use crate::mcp::types::ToolInputSchema;
use crate::slack::{AddReactionRequest, SlackApi};

pub struct AddReactionTool {
    slack: Arc<dyn SlackApi>,
}

impl AddReactionTool {
    pub fn new(slack: Arc<dyn SlackApi>) -> Self {
        Self { slack }
    }
}

#[derive(Debug, Deserialize)]
struct AddReactionParams {
    channel: String,
    timestamp: String,
    reaction: String,
}

#[async_trait]
impl Tool for AddReactionTool {
    fn name(&self) -> &'static str {
        "add_reaction"
    }

    fn description(&self) -> &'static str {
        "Add a reaction to a message."
    }

    fn input_schema(&self) -> ToolInputSchema {
        required_strings(&[
            ("channel", CHANNEL_ID),
            ("timestamp", MESSAGE_TIMESTAMP),
            ("reaction", "Reaction name"),
        ])
    }

    async fn execute(&self, params: Value) -> McpResult<Value> {
        let params: AddReactionParams = parse_params(params)?;
        debug!(channel = %params.channel, reaction = %params.reaction, "Adding reaction");

        self.slack
            .add_reaction(AddReactionRequest {
                channel: params.channel,
                timestamp: params.timestamp,
                name: params.reaction,
            })
            .await?;

        Ok(Value::String("success".to_string()))
    }
}

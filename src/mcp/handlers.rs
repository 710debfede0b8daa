use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

use crate::error::{McpError, McpResult};
use crate::slack::SlackApi;
use crate::tools::{
    ArgumentMode, Tool, conversations, messages, prepare_arguments, reactions, users,
};

use super::types::{CallToolResult, Tool as McpTool, ToolContent};

/// Tool registry: name -> declared schema -> handler.
pub struct RequestHandler {
    tools: BTreeMap<&'static str, Box<dyn Tool>>,
    argument_mode: ArgumentMode,
}

macro_rules! register_tool {
    ($tools:expr, $tool:expr) => {
        let tool = $tool;
        $tools.insert(tool.name(), Box::new(tool));
    };
}

impl RequestHandler {
    pub fn new(slack: Arc<dyn SlackApi>, argument_mode: ArgumentMode) -> Self {
        let mut tools: BTreeMap<&'static str, Box<dyn Tool>> = BTreeMap::new();

        register_tool!(tools, reactions::AddReactionTool::new(slack.clone()));

        register_tool!(
            tools,
            conversations::GetChannelHistoryTool::new(slack.clone())
        );
        register_tool!(tools, conversations::GetThreadRepliesTool::new(slack.clone()));
        register_tool!(tools, conversations::ListChannelsTool::new(slack.clone()));

        register_tool!(tools, users::GetUserProfileTool::new(slack.clone()));
        register_tool!(tools, users::GetUsersTool::new(slack.clone()));

        register_tool!(tools, messages::PostMessageTool::new(slack.clone()));
        register_tool!(tools, messages::ReplyToThreadTool::new(slack));

        Self {
            tools,
            argument_mode,
        }
    }

    pub fn list_tools(&self) -> Vec<McpTool> {
        self.tools
            .values()
            .map(|tool| McpTool {
                name: tool.name().to_string(),
                description: tool.description().to_string(),
                input_schema: tool.input_schema(),
            })
            .collect()
    }

    pub async fn call_tool(&self, name: &str, arguments: Value) -> McpResult<CallToolResult> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| McpError::NotFound(format!("Tool not found: {}", name)))?;

        let arguments = prepare_arguments(self.argument_mode, &tool.input_schema(), arguments)?;
        debug!(tool = name, "Executing tool");

        let result = tool.execute(arguments).await?;

        // Strings go out verbatim, everything else as compact JSON
        let text = match result {
            Value::String(text) => text,
            other => serde_json::to_string(&other)?,
        };

        Ok(CallToolResult {
            content: vec![ToolContent::Text { text }],
        })
    }
}

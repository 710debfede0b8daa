use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use super::{CHANNEL_ID, MESSAGE_TIMESTAMP, Tool, parse_params, required_strings};
use crate::error::McpResult;
use crate::mcp::types::ToolInputSchema;
use crate::slack::{ConversationHistoryRequest, ConversationRepliesRequest, SlackApi};

pub struct GetChannelHistoryTool {
    slack: Arc<dyn SlackApi>,
}

pub struct GetThreadRepliesTool {
    slack: Arc<dyn SlackApi>,
}

pub struct ListChannelsTool {
    slack: Arc<dyn SlackApi>,
}

impl GetChannelHistoryTool {
    pub fn new(slack: Arc<dyn SlackApi>) -> Self {
        Self { slack }
    }
}

impl GetThreadRepliesTool {
    pub fn new(slack: Arc<dyn SlackApi>) -> Self {
        Self { slack }
    }
}

impl ListChannelsTool {
    pub fn new(slack: Arc<dyn SlackApi>) -> Self {
        Self { slack }
    }
}

#[derive(Debug, Deserialize)]
struct ChannelHistoryParams {
    channel: String,
}

#[derive(Debug, Deserialize)]
struct ThreadRepliesParams {
    channel: String,
    timestamp: String,
}

#[async_trait]
impl Tool for GetChannelHistoryTool {
    fn name(&self) -> &'static str {
        "get_channel_history"
    }

    fn description(&self) -> &'static str {
        "Get channel history."
    }

    fn input_schema(&self) -> ToolInputSchema {
        required_strings(&[("channel", CHANNEL_ID)])
    }

    async fn execute(&self, params: Value) -> McpResult<Value> {
        let params: ChannelHistoryParams = parse_params(params)?;
        debug!(channel = %params.channel, "Fetching channel history");

        let history = self
            .slack
            .conversation_history(ConversationHistoryRequest {
                channel: params.channel,
            })
            .await?;

        Ok(serde_json::to_value(history)?)
    }
}

#[async_trait]
impl Tool for GetThreadRepliesTool {
    fn name(&self) -> &'static str {
        "get_thread_replies"
    }

    fn description(&self) -> &'static str {
        "Get thread replies."
    }

    fn input_schema(&self) -> ToolInputSchema {
        required_strings(&[("channel", CHANNEL_ID), ("timestamp", MESSAGE_TIMESTAMP)])
    }

    async fn execute(&self, params: Value) -> McpResult<Value> {
        let params: ThreadRepliesParams = parse_params(params)?;
        debug!(channel = %params.channel, ts = %params.timestamp, "Fetching thread replies");

        let messages = self
            .slack
            .conversation_replies(ConversationRepliesRequest {
                channel: params.channel,
                ts: params.timestamp,
            })
            .await?;

        Ok(serde_json::to_value(messages)?)
    }
}

#[async_trait]
impl Tool for ListChannelsTool {
    fn name(&self) -> &'static str {
        "list_channels"
    }

    fn description(&self) -> &'static str {
        "List all channels."
    }

    fn input_schema(&self) -> ToolInputSchema {
        required_strings(&[])
    }

    async fn execute(&self, _params: Value) -> McpResult<Value> {
        let channels = self.slack.conversations().await?;
        debug!(count = channels.len(), "Listed channels");

        Ok(serde_json::to_value(channels)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::McpError;
    use crate::slack::{ConversationHistory, MockSlackApi, SlackChannel, SlackError, SlackMessage};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn message(ts: &str, text: &str) -> SlackMessage {
        serde_json::from_value(json!({
            "type": "message",
            "ts": ts,
            "user": "U1",
            "text": text,
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_channel_history_passes_through() {
        let history = ConversationHistory {
            messages: Some(vec![message("2.0", "second"), message("1.0", "first")]),
            has_more: Some(true),
            extra: serde_json::from_value(json!({
                "ok": true,
                "pin_count": 0,
                "response_metadata": {"next_cursor": "bmV4dA=="},
            }))
            .unwrap(),
        };
        let expected = serde_json::to_value(&history).unwrap();

        let mut slack = MockSlackApi::new();
        slack
            .expect_conversation_history()
            .withf(|request| request.channel == "C1")
            .times(1)
            .returning(move |_| Ok(history.clone()));

        let tool = GetChannelHistoryTool::new(Arc::new(slack));
        let result = tool.execute(json!({"channel": "C1"})).await.unwrap();

        assert_eq!(result, expected);
        assert_eq!(result["messages"][1]["text"], "first");
        assert_eq!(result["response_metadata"]["next_cursor"], "bmV4dA==");
    }

    #[tokio::test]
    async fn test_thread_replies_passes_through() {
        let replies = vec![message("1.0", "parent"), message("1.5", "reply")];
        let expected = serde_json::to_value(&replies).unwrap();

        let mut slack = MockSlackApi::new();
        slack
            .expect_conversation_replies()
            .withf(|request| request.channel == "C1" && request.ts == "1.0")
            .times(1)
            .returning(move |_| Ok(replies.clone()));

        let tool = GetThreadRepliesTool::new(Arc::new(slack));
        let result = tool
            .execute(json!({"channel": "C1", "timestamp": "1.0"}))
            .await
            .unwrap();

        assert_eq!(result, expected);
    }

    #[tokio::test]
    async fn test_list_channels_passes_through() {
        let channels: Vec<SlackChannel> = serde_json::from_value(json!([
            {"id": "C1", "name": "general", "is_general": true},
            {"id": "C2", "name": "random", "num_members": 12},
        ]))
        .unwrap();
        let expected = serde_json::to_value(&channels).unwrap();

        let mut slack = MockSlackApi::new();
        slack
            .expect_conversations()
            .times(1)
            .returning(move || Ok(channels.clone()));

        let tool = ListChannelsTool::new(Arc::new(slack));
        let result = tool.execute(json!({})).await.unwrap();

        assert_eq!(result, expected);
        assert_eq!(result[1]["num_members"], 12);
    }

    #[tokio::test]
    async fn test_history_error_propagates() {
        let mut slack = MockSlackApi::new();
        slack.expect_conversation_history().returning(|_| {
            Err(SlackError::Api {
                method: "conversations.history".to_string(),
                code: "channel_not_found".to_string(),
            })
        });

        let tool = GetChannelHistoryTool::new(Arc::new(slack));
        let err = tool.execute(json!({"channel": "C404"})).await.unwrap_err();

        assert!(matches!(err, McpError::Slack(_)));
        assert!(err.to_string().contains("channel_not_found"));
    }

    #[tokio::test]
    async fn test_list_channels_error_propagates() {
        let mut slack = MockSlackApi::new();
        slack.expect_conversations().returning(|| {
            Err(SlackError::Status {
                method: "conversations.list".to_string(),
                status: 429,
            })
        });

        let tool = ListChannelsTool::new(Arc::new(slack));
        let err = tool.execute(Value::Null).await.unwrap_err();

        assert!(matches!(
            err,
            McpError::Slack(SlackError::Status { status: 429, .. })
        ));
    }
}

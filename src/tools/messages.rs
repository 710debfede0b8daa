use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::debug;

use super::{CHANNEL_ID, MESSAGE_TEXT, MESSAGE_TIMESTAMP, Tool, parse_params, required_strings};
use crate::error::McpResult;
use crate::mcp::types::ToolInputSchema;
use crate::slack::{PostMessageRequest, PostedMessage, SlackApi};

pub struct PostMessageTool {
    slack: Arc<dyn SlackApi>,
}

pub struct ReplyToThreadTool {
    slack: Arc<dyn SlackApi>,
}

impl PostMessageTool {
    pub fn new(slack: Arc<dyn SlackApi>) -> Self {
        Self { slack }
    }
}

impl ReplyToThreadTool {
    pub fn new(slack: Arc<dyn SlackApi>) -> Self {
        Self { slack }
    }
}

#[derive(Debug, Deserialize)]
struct PostMessageParams {
    channel: String,
    text: String,
}

#[derive(Debug, Deserialize)]
struct ReplyToThreadParams {
    channel: String,
    timestamp: String,
    text: String,
}

fn posted(message: PostedMessage) -> Value {
    json!({
        "channel": message.channel,
        "timestamp": message.ts,
    })
}

#[async_trait]
impl Tool for PostMessageTool {
    fn name(&self) -> &'static str {
        "post_message"
    }

    fn description(&self) -> &'static str {
        "Post a message to a channel."
    }

    fn input_schema(&self) -> ToolInputSchema {
        required_strings(&[("channel", CHANNEL_ID), ("text", MESSAGE_TEXT)])
    }

    async fn execute(&self, params: Value) -> McpResult<Value> {
        let params: PostMessageParams = parse_params(params)?;
        debug!(channel = %params.channel, "Posting message");

        let message = self
            .slack
            .post_message(PostMessageRequest {
                channel: params.channel,
                text: params.text,
                thread_ts: None,
            })
            .await?;

        Ok(posted(message))
    }
}

#[async_trait]
impl Tool for ReplyToThreadTool {
    fn name(&self) -> &'static str {
        "reply_to_thread"
    }

    fn description(&self) -> &'static str {
        "Reply to a thread."
    }

    fn input_schema(&self) -> ToolInputSchema {
        required_strings(&[
            ("channel", CHANNEL_ID),
            ("timestamp", MESSAGE_TIMESTAMP),
            ("text", MESSAGE_TEXT),
        ])
    }

    async fn execute(&self, params: Value) -> McpResult<Value> {
        let params: ReplyToThreadParams = parse_params(params)?;
        debug!(channel = %params.channel, thread_ts = %params.timestamp, "Replying to thread");

        let message = self
            .slack
            .post_message(PostMessageRequest {
                channel: params.channel,
                text: params.text,
                thread_ts: Some(params.timestamp),
            })
            .await?;

        Ok(posted(message))
    }
}

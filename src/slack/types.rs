use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// Request payloads. Field names are the Slack Web API form parameters.

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddReactionRequest {
    pub channel: String,
    pub timestamp: String,
    /// Reaction (emoji) name without colons
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversationHistoryRequest {
    pub channel: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversationRepliesRequest {
    pub channel: String,
    pub ts: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserProfileRequest {
    pub user: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostMessageRequest {
    pub channel: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_ts: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CursorRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

// Entities relayed back to the caller. Only identifying fields are typed;
// everything else Slack sends rides along in `extra` so nothing is dropped or
// invented on the way through.

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlackUserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub real_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlackUser {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<SlackUserProfile>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlackChannel {
    pub id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlackMessage {
    pub ts: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_ts: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ResponseMetadata {
    #[serde(default)]
    pub next_cursor: String,
}

impl ResponseMetadata {
    pub fn next_cursor(&self) -> Option<&str> {
        Some(self.next_cursor.as_str()).filter(|c| !c.is_empty())
    }
}

/// `conversations.history` response body. The whole envelope is relayed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationHistory {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<SlackMessage>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_more: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostedMessage {
    pub channel: String,
    pub ts: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RepliesResponse {
    #[serde(default)]
    pub messages: Vec<SlackMessage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProfileResponse {
    #[serde(default)]
    pub profile: SlackUserProfile,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UsersListResponse {
    #[serde(default)]
    pub members: Vec<SlackUser>,
    #[serde(default)]
    pub response_metadata: ResponseMetadata,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChannelsListResponse {
    #[serde(default)]
    pub channels: Vec<SlackChannel>,
}

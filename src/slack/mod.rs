pub mod client;
pub mod types;

use async_trait::async_trait;
use thiserror::Error;

pub use client::SlackClient;
pub use types::*;

#[derive(Error, Debug)]
pub enum SlackError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{method} returned HTTP {status}")]
    Status { method: String, status: u16 },

    #[error("{method} failed: {code}")]
    Api { method: String, code: String },

    #[error("Failed to encode request: {0}")]
    Encode(#[from] serde_urlencoded::ser::Error),

    #[error("Failed to decode {method} response: {source}")]
    Decode {
        method: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type SlackResult<T> = std::result::Result<T, SlackError>;

/// The Slack operations the tools are allowed to perform.
///
/// Every tool goes through this trait rather than a concrete client, one
/// method per Web API call.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SlackApi: Send + Sync {
    /// `reactions.add`
    async fn add_reaction(&self, request: AddReactionRequest) -> SlackResult<()>;

    /// `conversations.history`, first page only
    async fn conversation_history(
        &self,
        request: ConversationHistoryRequest,
    ) -> SlackResult<ConversationHistory>;

    /// `conversations.replies`, first page only
    async fn conversation_replies(
        &self,
        request: ConversationRepliesRequest,
    ) -> SlackResult<Vec<SlackMessage>>;

    /// `users.profile.get`
    async fn user_profile(&self, request: UserProfileRequest) -> SlackResult<SlackUserProfile>;

    /// `users.list`, every page
    async fn users(&self) -> SlackResult<Vec<SlackUser>>;

    /// `conversations.list`, first page only
    async fn conversations(&self) -> SlackResult<Vec<SlackChannel>>;

    /// `chat.postMessage`
    async fn post_message(&self, request: PostMessageRequest) -> SlackResult<PostedMessage>;
}

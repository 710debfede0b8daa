use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use super::types::*;
use super::{SlackApi, SlackError, SlackResult};
use crate::config::{ConnectionConfig, SlackConfig};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Slack Web API client authenticated with a single bot token.
pub struct SlackClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl SlackClient {
    pub fn new(slack: &SlackConfig, connection: &ConnectionConfig) -> SlackResult<Self> {
        let mut builder = reqwest::Client::builder()
            .pool_max_idle_per_host(connection.max_idle_per_host)
            .pool_idle_timeout(Duration::from_secs(connection.pool_idle_timeout_seconds));

        if let Some(seconds) = connection.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }

        Ok(Self {
            http: builder.build()?,
            base_url: slack.api_base_url.trim_end_matches('/').to_string(),
            token: slack.bot_token.clone(),
        })
    }

    /// POST a form-encoded Web API call and decode the body once Slack says `ok`.
    async fn call<P, T>(&self, method: &str, params: &P) -> SlackResult<T>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_urlencoded::to_string(params)?;
        debug!(method, "Calling Slack API");

        let response = self
            .http
            .post(format!("{}/{}", self.base_url, method))
            .bearer_auth(&self.token)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(method, status = status.as_u16(), "Slack API returned HTTP error");
            return Err(SlackError::Status {
                method: method.to_string(),
                status: status.as_u16(),
            });
        }

        let envelope: Value = response.json().await?;
        if !envelope.get("ok").and_then(Value::as_bool).unwrap_or(false) {
            let code = envelope
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("unknown_error")
                .to_string();
            warn!(method, code = %code, "Slack API call failed");
            return Err(SlackError::Api {
                method: method.to_string(),
                code,
            });
        }

        serde_json::from_value(envelope).map_err(|source| SlackError::Decode {
            method: method.to_string(),
            source,
        })
    }
}

#[async_trait]
impl SlackApi for SlackClient {
    async fn add_reaction(&self, request: AddReactionRequest) -> SlackResult<()> {
        let _: IgnoredAny = self.call("reactions.add", &request).await?;
        Ok(())
    }

    async fn conversation_history(
        &self,
        request: ConversationHistoryRequest,
    ) -> SlackResult<ConversationHistory> {
        self.call("conversations.history", &request).await
    }

    async fn conversation_replies(
        &self,
        request: ConversationRepliesRequest,
    ) -> SlackResult<Vec<SlackMessage>> {
        let response: RepliesResponse = self.call("conversations.replies", &request).await?;
        Ok(response.messages)
    }

    async fn user_profile(&self, request: UserProfileRequest) -> SlackResult<SlackUserProfile> {
        let response: ProfileResponse = self.call("users.profile.get", &request).await?;
        Ok(response.profile)
    }

    async fn users(&self) -> SlackResult<Vec<SlackUser>> {
        let mut users = Vec::new();
        let mut request = CursorRequest::default();

        loop {
            let page: UsersListResponse = self.call("users.list", &request).await?;
            users.extend(page.members);

            match page.response_metadata.next_cursor() {
                Some(cursor) if request.cursor.as_deref() == Some(cursor) => {
                    warn!(cursor, "users.list repeated its cursor, stopping");
                    break;
                }
                Some(cursor) => request.cursor = Some(cursor.to_string()),
                None => break,
            }
        }

        debug!(count = users.len(), "Fetched workspace users");
        Ok(users)
    }

    async fn conversations(&self) -> SlackResult<Vec<SlackChannel>> {
        let response: ChannelsListResponse = self
            .call("conversations.list", &CursorRequest::default())
            .await?;
        Ok(response.channels)
    }

    async fn post_message(&self, request: PostMessageRequest) -> SlackResult<PostedMessage> {
        self.call("chat.postMessage", &request).await
    }
}

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use super::{Tool, parse_params, required_strings};
use crate::error::McpResult;
use crate::mcp::types::ToolInputSchema;
use crate::slack::{SlackApi, UserProfileRequest};

pub struct GetUserProfileTool {
    slack: Arc<dyn SlackApi>,
}

pub struct GetUsersTool {
    slack: Arc<dyn SlackApi>,
}

impl GetUserProfileTool {
    pub fn new(slack: Arc<dyn SlackApi>) -> Self {
        Self { slack }
    }
}

impl GetUsersTool {
    pub fn new(slack: Arc<dyn SlackApi>) -> Self {
        Self { slack }
    }
}

#[derive(Debug, Deserialize)]
struct UserProfileParams {
    user_id: String,
}

#[async_trait]
impl Tool for GetUserProfileTool {
    fn name(&self) -> &'static str {
        "get_user_profile"
    }

    fn description(&self) -> &'static str {
        "Get user profile."
    }

    fn input_schema(&self) -> ToolInputSchema {
        required_strings(&[("user_id", "User ID")])
    }

    async fn execute(&self, params: Value) -> McpResult<Value> {
        let params: UserProfileParams = parse_params(params)?;

        let profile = self
            .slack
            .user_profile(UserProfileRequest {
                user: params.user_id.clone(),
            })
            .await?;
        debug!(
            user_id = %params.user_id,
            real_name = profile.real_name.as_deref().unwrap_or_default(),
            "Fetched user profile"
        );

        Ok(serde_json::to_value(profile)?)
    }
}

#[async_trait]
impl Tool for GetUsersTool {
    fn name(&self) -> &'static str {
        "get_users"
    }

    fn description(&self) -> &'static str {
        "Get all users."
    }

    fn input_schema(&self) -> ToolInputSchema {
        required_strings(&[])
    }

    async fn execute(&self, _params: Value) -> McpResult<Value> {
        let users = self.slack.users().await?;
        debug!(count = users.len(), "Fetched users");

        Ok(serde_json::to_value(users)?)
    }
}

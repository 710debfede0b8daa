use thiserror::Error;

use crate::slack::SlackError;

#[derive(Error, Debug)]
pub enum McpError {
    #[error("Slack API error: {0}")]
    Slack(#[from] SlackError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl McpError {
    /// Errors caused by the caller's request rather than by the server or Slack.
    pub fn is_client_error(&self) -> bool {
        matches!(self, McpError::InvalidParameter(_) | McpError::NotFound(_))
    }
}

pub type McpResult<T> = std::result::Result<T, McpError>;

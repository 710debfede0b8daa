use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::tools::ArgumentMode;

pub const TOKEN_ENV_VAR: &str = "SLACK_BOT_TOKEN";

// Default configuration constants
const DEFAULT_API_BASE_URL: &str = "https://slack.com/api";
const DEFAULT_MAX_IDLE_PER_HOST: usize = 10;
const DEFAULT_POOL_IDLE_TIMEOUT_SECONDS: u64 = 90;
const DEFAULT_ARGUMENT_MODE: &str = "strict";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{var} environment variable not set", var = TOKEN_ENV_VAR)]
    MissingToken,

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] config::ConfigError),
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub slack: SlackConfig,
    pub connection: ConnectionConfig,
    pub tools: ToolsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SlackConfig {
    pub bot_token: String,
    pub api_base_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConnectionConfig {
    /// Unset means requests may block as long as the transport allows
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
    pub max_idle_per_host: usize,
    pub pool_idle_timeout_seconds: u64,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: None,
            max_idle_per_host: DEFAULT_MAX_IDLE_PER_HOST,
            pool_idle_timeout_seconds: DEFAULT_POOL_IDLE_TIMEOUT_SECONDS,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ToolsConfig {
    pub argument_mode: ArgumentMode,
}

impl Config {
    /// Layer defaults, an optional config file, `SLACK_MCP_*` variables and
    /// finally the bot token from `SLACK_BOT_TOKEN`.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut settings = config::Config::builder()
            .set_default("slack.api_base_url", DEFAULT_API_BASE_URL)?
            .set_default(
                "connection.max_idle_per_host",
                DEFAULT_MAX_IDLE_PER_HOST as u64,
            )?
            .set_default(
                "connection.pool_idle_timeout_seconds",
                DEFAULT_POOL_IDLE_TIMEOUT_SECONDS,
            )?
            .set_default("tools.argument_mode", DEFAULT_ARGUMENT_MODE)?;

        // Load from config file if provided
        if let Some(path) = config_path
            && path.exists()
        {
            settings = settings.add_source(config::File::from(path));
        }

        settings = settings.add_source(
            config::Environment::with_prefix("SLACK_MCP")
                .prefix_separator("_")
                .separator("__"),
        );

        // An empty token counts as missing
        let token = std::env::var(TOKEN_ENV_VAR)
            .ok()
            .filter(|token| !token.is_empty())
            .ok_or(ConfigError::MissingToken)?;
        settings = settings.set_override("slack.bot_token", token)?;

        Ok(settings.build()?.try_deserialize()?)
    }
}

pub mod config;
pub mod error;
pub mod logging;
pub mod mcp;
pub mod slack;
pub mod tools;

pub use config::Config;
pub use error::{McpError, McpResult};

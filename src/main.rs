use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};

use slack_mcp::config::Config;
use slack_mcp::logging::{self, DEFAULT_LOG_FILE};
use slack_mcp::mcp::{McpServer, RequestHandler};
use slack_mcp::slack::{SlackApi, SlackClient};

#[derive(Parser, Debug)]
#[command(name = "slack-mcp", version, about = "MCP server exposing Slack tools over stdio")]
struct Cli {
    /// Optional configuration file (TOML, YAML or JSON)
    #[arg(short, long, env = "SLACK_MCP_CONFIG")]
    config: Option<PathBuf>,

    /// File that diagnostic logs are appended to
    #[arg(long, env = "SLACK_MCP_LOG_FILE", default_value = DEFAULT_LOG_FILE)]
    log_file: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_file = match logging::open_log_file(&cli.log_file) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Fatal: could not open log file: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = logging::init(log_file) {
        eprintln!("Fatal: could not initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            error!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error: {:#}", e);
            error!("Server error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> anyhow::Result<()> {
    let slack: Arc<dyn SlackApi> = Arc::new(SlackClient::new(&config.slack, &config.connection)?);
    let server = McpServer::new(RequestHandler::new(slack, config.tools.argument_mode));

    info!(
        version = env!("CARGO_PKG_VERSION"),
        argument_mode = ?config.tools.argument_mode,
        "Serving Slack tools on stdio"
    );

    tokio::select! {
        result = server.run() => result?,
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted, shutting down");
        }
    }

    Ok(())
}

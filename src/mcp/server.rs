use anyhow::Result;
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use super::handlers::RequestHandler;
use super::types::*;

pub const SERVER_NAME: &str = "slack-mcp";

pub struct McpServer {
    handler: RequestHandler,
    initialized: RwLock<bool>,
}

impl McpServer {
    pub fn new(handler: RequestHandler) -> Self {
        Self {
            handler,
            initialized: RwLock::new(false),
        }
    }

    /// Serve requests on stdin/stdout until stdin closes.
    pub async fn run(&self) -> Result<()> {
        self.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
    }

    /// Serve newline-delimited JSON-RPC from `reader`, one request at a time.
    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut buffer = Vec::new();

        loop {
            buffer.clear();

            match reader.read_until(b'\n', &mut buffer).await {
                Ok(0) => {
                    info!("Input closed, shutting down");
                    break;
                }
                Ok(_) => {
                    let response = match std::str::from_utf8(&buffer) {
                        Ok(line) => {
                            let trimmed = line.trim();
                            if trimmed.is_empty() {
                                continue;
                            }

                            match self.process_request(trimmed).await {
                                Ok(response) => response,
                                Err(e) => {
                                    error!("Error processing request: {}", e);
                                    Some(JsonRpcResponse::error(
                                        None,
                                        JsonRpcError::internal_error(e.to_string()),
                                    ))
                                }
                            }
                        }
                        Err(e) => {
                            warn!("Request is not valid UTF-8: {}", e);
                            Some(JsonRpcResponse::error(None, JsonRpcError::parse_error()))
                        }
                    };

                    // Notifications get no response
                    if let Some(response) = response {
                        let response_str = serde_json::to_string(&response)?;
                        writer.write_all(response_str.as_bytes()).await?;
                        writer.write_all(b"\n").await?;
                        writer.flush().await?;
                    }
                }
                Err(e) => {
                    error!("Error reading input: {}", e);
                    return Err(e.into());
                }
            }
        }

        Ok(())
    }

    async fn process_request(&self, input: &str) -> Result<Option<JsonRpcResponse>> {
        let request: JsonRpcRequest = match serde_json::from_str(input) {
            Ok(req) => req,
            Err(e) => {
                warn!("Failed to parse request: {}", e);
                return Ok(Some(JsonRpcResponse::error(
                    None,
                    JsonRpcError::parse_error(),
                )));
            }
        };

        if request.jsonrpc != "2.0" {
            return Ok(Some(JsonRpcResponse::error(
                request.id.clone(),
                JsonRpcError::invalid_request(),
            )));
        }

        debug!(method = %request.method, "Received request");

        // Notifications still run for their side effects but are never answered
        let is_notification = request.id.is_none();

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(request).await.map(Some),
            "initialized" | "notifications/initialized" => {
                self.handle_initialized(request).await.map(Some)
            }
            "ping" => Ok(Some(JsonRpcResponse::success(request.id, serde_json::json!({})))),
            "tools/list" => self.handle_list_tools(request).await.map(Some),
            "tools/call" => self.handle_call_tool(request).await.map(Some),
            "prompts/list" => Ok(Some(Self::empty_list(request, "prompts"))),
            "resources/list" => Ok(Some(Self::empty_list(request, "resources"))),
            _ if is_notification => {
                debug!(method = %request.method, "Ignoring notification");
                Ok(None)
            }
            _ => {
                warn!("Unknown method: {}", request.method);
                Ok(Some(JsonRpcResponse::error(
                    request.id,
                    JsonRpcError::method_not_found(&request.method),
                )))
            }
        };

        if is_notification {
            if let Err(e) = response {
                warn!("Error handling notification: {}", e);
            }
            return Ok(None);
        }

        response
    }

    async fn handle_initialize(&self, request: JsonRpcRequest) -> Result<JsonRpcResponse> {
        let params = match request.params.map(serde_json::from_value::<InitializeRequest>) {
            Some(Ok(p)) => p,
            Some(Err(e)) => {
                return Ok(JsonRpcResponse::error(
                    request.id,
                    JsonRpcError::invalid_params(format!("Invalid params: {}", e)),
                ));
            }
            None => {
                return Ok(JsonRpcResponse::error(
                    request.id,
                    JsonRpcError::invalid_params("Missing params".to_string()),
                ));
            }
        };

        // Support both protocol versions
        let protocol_version = if params.protocol_version.starts_with("2025") {
            PROTOCOL_VERSION_2025.to_string()
        } else {
            PROTOCOL_VERSION.to_string()
        };

        if let Some(client) = &params.client_info {
            info!(client = %client.name, version = %client.version, "Client connected");
        }

        let result = InitializeResult {
            protocol_version,
            capabilities: ServerCapabilities {
                tools: ToolsCapability::default(),
            },
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        Ok(JsonRpcResponse::success(
            request.id,
            serde_json::to_value(result)?,
        ))
    }

    async fn handle_initialized(&self, request: JsonRpcRequest) -> Result<JsonRpcResponse> {
        *self.initialized.write().await = true;

        Ok(JsonRpcResponse::success(request.id, Value::Null))
    }

    async fn handle_list_tools(&self, request: JsonRpcRequest) -> Result<JsonRpcResponse> {
        if !*self.initialized.read().await {
            return Ok(Self::not_initialized(request));
        }

        let result = ListToolsResult {
            tools: self.handler.list_tools(),
        };

        Ok(JsonRpcResponse::success(
            request.id,
            serde_json::to_value(result)?,
        ))
    }

    async fn handle_call_tool(&self, request: JsonRpcRequest) -> Result<JsonRpcResponse> {
        if !*self.initialized.read().await {
            return Ok(Self::not_initialized(request));
        }

        let params = match request.params.map(serde_json::from_value::<CallToolRequest>) {
            Some(Ok(p)) => p,
            Some(Err(e)) => {
                return Ok(JsonRpcResponse::error(
                    request.id,
                    JsonRpcError::invalid_params(format!("Invalid params: {}", e)),
                ));
            }
            None => {
                return Ok(JsonRpcResponse::error(
                    request.id,
                    JsonRpcError::invalid_params("Missing params".to_string()),
                ));
            }
        };

        match self.handler.call_tool(&params.name, params.arguments).await {
            Ok(result) => Ok(JsonRpcResponse::success(
                request.id,
                serde_json::to_value(result)?,
            )),
            Err(e) if e.is_client_error() => {
                warn!(tool = %params.name, "Rejected tool call: {}", e);
                Ok(JsonRpcResponse::error(
                    request.id,
                    JsonRpcError::invalid_params(e.to_string()),
                ))
            }
            Err(e) => {
                error!(tool = %params.name, "Tool execution failed: {}", e);
                Ok(JsonRpcResponse::error(
                    request.id,
                    JsonRpcError::internal_error(e.to_string()),
                ))
            }
        }
    }

    fn not_initialized(request: JsonRpcRequest) -> JsonRpcResponse {
        JsonRpcResponse::error(
            request.id,
            JsonRpcError::internal_error("Server not initialized".to_string()),
        )
    }

    // No prompts or resources are offered
    fn empty_list(request: JsonRpcRequest, key: &str) -> JsonRpcResponse {
        JsonRpcResponse::success(request.id, serde_json::json!({ key: [] }))
    }
}

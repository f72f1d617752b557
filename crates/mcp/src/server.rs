// MCP server: JSON-RPC 2.0 over stdio, one message per line

use crate::protocol::*;
use crate::tools::ToolRegistry;
use anyhow::{Context, Result};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::bytes::BytesMut;
use tokio_util::codec::{Decoder, FramedRead, FramedWrite, LinesCodec, LinesCodecError};

/// Longest accepted input line; longer lines are discarded and answered with a parse error
pub const MAX_MESSAGE_BYTES: usize = 16 * 1024 * 1024;

/// One input line, or the reason it could not be read as text
#[derive(Debug)]
enum Frame {
    Line(String),
    Malformed(LinesCodecError),
}

/// Line decoder that yields undecodable or over-long lines as frames.
///
/// `FramedRead` stops after a decoder error, so only reader failures are errors.
struct MessageCodec {
    lines: LinesCodec,
}

impl MessageCodec {
    fn new(max_length: usize) -> Self {
        Self {
            lines: LinesCodec::new_with_max_length(max_length),
        }
    }

    fn frame(result: Result<Option<String>, LinesCodecError>) -> Result<Option<Frame>, LinesCodecError> {
        match result {
            Ok(line) => Ok(line.map(Frame::Line)),
            Err(e @ LinesCodecError::MaxLineLengthExceeded) => Ok(Some(Frame::Malformed(e))),
            Err(LinesCodecError::Io(e)) if e.kind() == std::io::ErrorKind::InvalidData => {
                Ok(Some(Frame::Malformed(LinesCodecError::Io(e))))
            }
            Err(e) => Err(e),
        }
    }
}

impl Decoder for MessageCodec {
    type Item = Frame;
    type Error = LinesCodecError;

    fn decode(&mut self, buf: &mut BytesMut) -> Result<Option<Frame>, LinesCodecError> {
        Self::frame(self.lines.decode(buf))
    }

    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<Frame>, LinesCodecError> {
        Self::frame(self.lines.decode_eof(buf))
    }
}

pub struct McpServer {
    name: String,
    version: String,
    registry: Arc<ToolRegistry>,
}

impl McpServer {
    pub fn new(name: impl Into<String>, version: impl Into<String>, registry: ToolRegistry) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            registry: Arc::new(registry),
        }
    }

    /// Serve on stdin/stdout until stdin closes
    pub async fn start(&self) -> Result<()> {
        tracing::info!(
            server = %self.name,
            tools = self.registry.len(),
            "MCP server listening on stdio"
        );
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await
    }

    /// Serve on any line-oriented byte stream pair
    pub async fn serve<R, W>(&self, reader: R, writer: W) -> Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut frames = FramedRead::new(reader, MessageCodec::new(MAX_MESSAGE_BYTES));
        let mut sink = FramedWrite::new(writer, LinesCodec::new());

        while let Some(frame) = frames.next().await {
            let response = match frame.context("Failed to read from input stream")? {
                Frame::Line(line) => self.handle_line(&line).await,
                Frame::Malformed(e) => {
                    tracing::warn!(error = %e, "Unreadable input line");
                    Some(JsonRpcResponse::error(
                        serde_json::Value::Null,
                        JsonRpcError::parse_error(e),
                    ))
                }
            };

            if let Some(response) = response {
                let json = serde_json::to_string(&response)?;
                sink.send(json)
                    .await
                    .context("Failed to write response")?;
            }
        }

        tracing::info!("Input closed, MCP server shutting down");
        Ok(())
    }

    /// Handle one raw input line. `None` means nothing is written back.
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let value: serde_json::Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to parse JSON-RPC message");
                return Some(JsonRpcResponse::error(
                    serde_json::Value::Null,
                    JsonRpcError::parse_error(e),
                ));
            }
        };

        let id = value.get("id").cloned();
        match serde_json::from_value::<JsonRpcRequest>(value) {
            Ok(request) => self.handle_request(request).await,
            Err(e) => id.map(|id| {
                JsonRpcResponse::error(
                    id,
                    JsonRpcError::invalid_request(format!("Invalid request: {}", e)),
                )
            }),
        }
    }

    /// Dispatch a parsed request
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let Some(id) = request.id.clone() else {
            tracing::debug!(method = %request.method, "Notification received");
            return None;
        };

        tracing::debug!(method = %request.method, id = %id, "Handling request");

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(id, request.params),
            "ping" => JsonRpcResponse::success(id, serde_json::json!({})),
            "tools/list" => self.handle_list_tools(id),
            "tools/call" => self.handle_call_tool(id, request.params).await,
            method => {
                tracing::warn!(method, "Unknown method");
                JsonRpcResponse::error(id, JsonRpcError::method_not_found(method))
            }
        };

        Some(response)
    }

    fn handle_initialize(
        &self,
        id: serde_json::Value,
        params: Option<serde_json::Value>,
    ) -> JsonRpcResponse {
        if let Some(params) = params.and_then(|p| serde_json::from_value::<InitializeParams>(p).ok()) {
            tracing::info!(
                client = %params.client_info.name,
                client_version = %params.client_info.version,
                protocol = %params.protocol_version,
                "Client connected"
            );
        }

        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
            },
            server_info: ServerInfo {
                name: self.name.clone(),
                version: self.version.clone(),
            },
        };

        JsonRpcResponse::success(id, result)
    }

    fn handle_list_tools(&self, id: serde_json::Value) -> JsonRpcResponse {
        let result = ListToolsResult {
            tools: self.registry.list_schemas(),
        };
        JsonRpcResponse::success(id, result)
    }

    async fn handle_call_tool(
        &self,
        id: serde_json::Value,
        params: Option<serde_json::Value>,
    ) -> JsonRpcResponse {
        let params: CallToolParams = match params.map(serde_json::from_value) {
            Some(Ok(params)) => params,
            Some(Err(e)) => {
                return JsonRpcResponse::error(
                    id,
                    JsonRpcError::invalid_params(format!("Invalid tool call params: {}", e)),
                )
            }
            None => {
                return JsonRpcResponse::error(
                    id,
                    JsonRpcError::invalid_params("Missing tool call params"),
                )
            }
        };

        let arguments = match params.arguments {
            Some(serde_json::Value::Null) | None => serde_json::json!({}),
            Some(arguments) => arguments,
        };

        tracing::info!(tool = %params.name, "Calling tool");

        match self.registry.call(&params.name, arguments).await {
            Some(result) => JsonRpcResponse::success(id, result),
            None => JsonRpcResponse::error(
                id,
                JsonRpcError::invalid_params(format!("Unknown tool: {}", params.name)),
            ),
        }
    }
}

//! MCP server implementation.
//!
//! The server handles the MCP protocol lifecycle:
//! 1. Initialize - exchange capabilities
//! 2. Handle tool calls and resource reads against the issue tracker
//! 3. Shut down when the transport closes

use std::sync::Arc;

use linear_context_core::IssueTracker;
use serde_json::Value;

use crate::handlers::ToolHandler;
use crate::protocol::{
    InitializeParams, InitializeResult, JsonRpcError, JsonRpcRequest, JsonRpcResponse, RequestId,
    ResourcesCapability, ResourcesListParams, ResourcesReadParams, ServerCapabilities, ServerInfo,
    ToolCallParams, ToolsCapability, ToolsListResult, MCP_VERSION,
};
use crate::resources::ResourceHandler;
use crate::transport::{IncomingMessage, StdioTransport};

/// MCP server for the Linear context server.
pub struct McpServer {
    tracker: Arc<dyn IssueTracker>,
    initialized: bool,
}

impl McpServer {
    /// Create a new MCP server over an issue tracker.
    pub fn new(tracker: Arc<dyn IssueTracker>) -> Self {
        Self {
            tracker,
            initialized: false,
        }
    }

    /// Run the MCP server main loop over stdio.
    pub async fn run(&mut self) -> linear_context_core::Result<()> {
        let transport = StdioTransport::stdio();
        self.run_with_transport(transport).await
    }

    /// Run the main loop over a specific transport.
    pub async fn run_with_transport(
        &mut self,
        mut transport: StdioTransport,
    ) -> linear_context_core::Result<()> {
        tracing::info!("Starting MCP server");

        let tools = ToolHandler::new(self.tracker.clone());
        let resources = ResourceHandler::new(self.tracker.clone());

        loop {
            match transport.read_message() {
                Ok(Some(msg)) => {
                    let response = self.handle_message(msg, &tools, &resources).await;
                    if let Some(resp) = response {
                        if let Err(e) = transport.write_response(&resp) {
                            tracing::error!("Failed to write response: {}", e);
                            break;
                        }
                    }
                }
                Ok(None) => {
                    tracing::info!("EOF received, shutting down");
                    break;
                }
                Err(e) => {
                    tracing::error!("Transport error: {}", e);
                    let error_resp = JsonRpcResponse::error(
                        RequestId::Null,
                        JsonRpcError::parse_error(&e.to_string()),
                    );
                    let _ = transport.write_response(&error_resp);
                }
            }
        }

        tracing::info!("MCP server stopped");
        Ok(())
    }

    /// Handle an incoming message.
    async fn handle_message(
        &mut self,
        msg: IncomingMessage,
        tools: &ToolHandler,
        resources: &ResourceHandler,
    ) -> Option<JsonRpcResponse> {
        match msg {
            IncomingMessage::Request(req) => Some(self.handle_request(req, tools, resources).await),
            IncomingMessage::Notification(notif) => {
                self.handle_notification(&notif.method);
                None // Notifications don't get responses
            }
        }
    }

    /// Handle a JSON-RPC request.
    async fn handle_request(
        &mut self,
        req: JsonRpcRequest,
        tools: &ToolHandler,
        resources: &ResourceHandler,
    ) -> JsonRpcResponse {
        tracing::debug!("Handling request: {} (id: {:?})", req.method, req.id);

        match req.method.as_str() {
            "initialize" => self.handle_initialize(req.id, req.params),
            "tools/list" => self.handle_tools_list(req.id, tools),
            "tools/call" => self.handle_tools_call(req.id, req.params, tools).await,
            "resources/list" => self.handle_resources_list(req.id, req.params, resources).await,
            "resources/read" => self.handle_resources_read(req.id, req.params, resources).await,
            "ping" => JsonRpcResponse::success(req.id, serde_json::json!({})),
            method => {
                tracing::warn!("Unknown method: {}", method);
                JsonRpcResponse::error(req.id, JsonRpcError::method_not_found(method))
            }
        }
    }

    /// Handle notifications (no response).
    fn handle_notification(&mut self, method: &str) {
        match method {
            "initialized" | "notifications/initialized" => {
                tracing::info!("Client initialized");
            }
            "notifications/cancelled" => {
                tracing::debug!("Request cancelled by client");
            }
            _ => {
                tracing::debug!("Ignoring notification: {}", method);
            }
        }
    }

    /// Handle initialize request.
    fn handle_initialize(&mut self, id: RequestId, params: Option<Value>) -> JsonRpcResponse {
        if self.initialized {
            return JsonRpcResponse::error(
                id,
                JsonRpcError::invalid_request("Server already initialized"),
            );
        }

        if let Some(params) = params {
            match serde_json::from_value::<InitializeParams>(params) {
                Ok(init_params) => {
                    tracing::info!(
                        "Client: {} v{} (protocol: {})",
                        init_params.client_info.name,
                        init_params.client_info.version,
                        init_params.protocol_version
                    );
                }
                Err(e) => {
                    tracing::warn!("Failed to parse initialize params: {}", e);
                }
            }
        }

        self.initialized = true;

        let result = InitializeResult {
            protocol_version: MCP_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
                resources: Some(ResourcesCapability {
                    subscribe: false,
                    list_changed: false,
                }),
            },
            server_info: ServerInfo {
                name: "linear-context-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        JsonRpcResponse::success(id, serde_json::to_value(result).unwrap())
    }

    /// Handle tools/list request.
    fn handle_tools_list(&self, id: RequestId, tools: &ToolHandler) -> JsonRpcResponse {
        let result = ToolsListResult {
            tools: tools.available_tools(),
        };
        JsonRpcResponse::success(id, serde_json::to_value(result).unwrap())
    }

    /// Handle tools/call request.
    async fn handle_tools_call(
        &self,
        id: RequestId,
        params: Option<Value>,
        tools: &ToolHandler,
    ) -> JsonRpcResponse {
        let params: ToolCallParams = match params {
            Some(p) => match serde_json::from_value(p) {
                Ok(params) => params,
                Err(e) => {
                    return JsonRpcResponse::error(id, JsonRpcError::invalid_params(&e.to_string()));
                }
            },
            None => {
                return JsonRpcResponse::error(id, JsonRpcError::invalid_params("Missing params"));
            }
        };

        tracing::info!("Calling tool: {}", params.name);

        let result = tools.execute(&params.name, params.arguments).await;
        JsonRpcResponse::success(id, serde_json::to_value(result).unwrap())
    }

    /// Handle resources/list request. Failures surface as JSON-RPC errors.
    async fn handle_resources_list(
        &self,
        id: RequestId,
        params: Option<Value>,
        resources: &ResourceHandler,
    ) -> JsonRpcResponse {
        let params: ResourcesListParams = match params {
            Some(p) => match serde_json::from_value(p) {
                Ok(params) => params,
                Err(e) => {
                    return JsonRpcResponse::error(id, JsonRpcError::invalid_params(&e.to_string()));
                }
            },
            None => ResourcesListParams::default(),
        };

        match resources.list(params.resource_type.as_deref()).await {
            Ok(result) => JsonRpcResponse::success(id, serde_json::to_value(result).unwrap()),
            Err(e) => JsonRpcResponse::error(id, JsonRpcError::internal_error(&e.to_string())),
        }
    }

    /// Handle resources/read request. Missing uri and unresolvable issues
    /// are hard failures, not soft envelopes.
    async fn handle_resources_read(
        &self,
        id: RequestId,
        params: Option<Value>,
        resources: &ResourceHandler,
    ) -> JsonRpcResponse {
        let params: ResourcesReadParams = match params {
            Some(p) => match serde_json::from_value(p) {
                Ok(params) => params,
                Err(e) => {
                    return JsonRpcResponse::error(id, JsonRpcError::invalid_params(&e.to_string()));
                }
            },
            None => {
                return JsonRpcResponse::error(id, JsonRpcError::invalid_params("URI is required"));
            }
        };

        match resources.read(&params.uri).await {
            Ok(result) => JsonRpcResponse::success(id, serde_json::to_value(result).unwrap()),
            Err(e) => JsonRpcResponse::error(id, JsonRpcError::internal_error(&e.to_string())),
        }
    }
}

//! MCP server on rmcp; listing and calls are served from the ToolExecutor.
//!
//! stdout carries only protocol messages; diagnostics go to the log file.

use std::sync::Arc;

use rmcp::model::{
    CallToolRequestParam, CallToolResult, Content, Implementation, JsonObject, ListToolsResult, PaginatedRequestParam,
    ProtocolVersion, ServerCapabilities, ServerInfo, Tool,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData as McpError, RoleServer, ServerHandler, ServiceExt};
use serde_json::Value;
use tokio::io::{AsyncRead, AsyncWrite};

use crate::error::{GameError, Result};
use crate::tools::{ToolContext, ToolDefinition, ToolExecutor};

const INSTRUCTIONS: &str = "Game metadata and artwork. Start with game_get_full_profile for a one-shot \
     profile, or steam_search_game to find an App ID for the storefront tools.";

/// Tool server bound to one executor and one set of clients
#[derive(Clone)]
pub struct McpServer {
    name: String,
    executor: Arc<ToolExecutor>,
    ctx: ToolContext,
}

impl McpServer {
    pub fn new(name: impl Into<String>, executor: ToolExecutor, ctx: ToolContext) -> Self {
        Self {
            name: name.into(),
            executor: Arc::new(executor),
            ctx,
        }
    }

    /// Serve stdin/stdout until the client disconnects
    pub async fn run_stdio(self) -> Result<()> {
        self.run(tokio::io::stdin(), tokio::io::stdout()).await
    }

    /// Serve one client over a reader/writer pair until it disconnects
    pub async fn run<R, W>(self, reader: R, writer: W) -> Result<()>
    where
        R: AsyncRead + Send + Unpin + 'static,
        W: AsyncWrite + Send + Unpin + 'static,
    {
        log::info!("MCP server '{}' serving {} tools", self.name, self.executor.tool_names().len());

        let running = self
            .serve((reader, writer))
            .await
            .map_err(|e| GameError::Protocol(format!("initialization failed: {}", e)))?;
        let reason = running
            .waiting()
            .await
            .map_err(|e| GameError::Protocol(format!("session task failed: {}", e)))?;

        log::info!("MCP session ended: {:?}", reason);
        Ok(())
    }
}

fn advertised(def: ToolDefinition) -> Tool {
    let schema = match def.input_schema {
        Value::Object(map) => map,
        _ => JsonObject::new(),
    };
    Tool::new(def.name, def.description, Arc::new(schema))
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.name.clone(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(INSTRUCTIONS.to_string()),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        let tools = self.executor.definitions().into_iter().map(advertised).collect();
        Ok(ListToolsResult::with_all_items(tools))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        log::debug!("<- tools/call {}", request.name);
        let input = request.arguments.map(Value::Object).unwrap_or(Value::Null);

        let result = self.executor.execute(&request.name, input, &self.ctx).await;
        let content = vec![Content::text(result.content)];
        if result.is_error {
            Ok(CallToolResult::error(content))
        } else {
            Ok(CallToolResult::success(content))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::context;
    use serde_json::json;
    use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

    fn server() -> McpServer {
        McpServer::new("game-encyclopedia-mcp-server", ToolExecutor::standard(false), context())
    }

    /// Open a session, send `requests` after the handshake, and collect one
    /// response per request, ordered by id
    async fn exchange(requests: &[Value]) -> Vec<Value> {
        let (client, transport) = tokio::io::duplex(256 * 1024);
        let (server_read, server_write) = tokio::io::split(transport);
        let session = tokio::spawn(server().run(server_read, server_write));

        let (client_read, mut client_write) = tokio::io::split(client);
        let handshake = [
            json!({ "jsonrpc": "2.0", "id": 0, "method": "initialize", "params": {
                "protocolVersion": "2024-11-05",
                "capabilities": {},
                "clientInfo": { "name": "test-client", "version": "0.0.0" }
            }}),
            json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }),
        ];
        for message in handshake.iter().chain(requests) {
            client_write.write_all(format!("{}\n", message).as_bytes()).await.unwrap();
        }

        let expected = 1 + requests.iter().filter(|r| r.get("id").is_some()).count();
        let mut lines = BufReader::new(client_read).lines();
        let mut responses = Vec::new();
        while responses.len() < expected {
            let line = lines.next_line().await.unwrap().unwrap();
            responses.push(serde_json::from_str::<Value>(&line).unwrap());
        }

        drop(client_write);
        drop(lines);
        session.await.unwrap().unwrap();

        responses.sort_by_key(|r| r["id"].as_u64());
        responses
    }

    #[tokio::test]
    async fn test_initialize() {
        let responses = exchange(&[]).await;
        let result = &responses[0]["result"];
        assert_eq!(result["protocolVersion"], "2024-11-05");
        assert_eq!(result["serverInfo"]["name"], "game-encyclopedia-mcp-server");
        assert_eq!(result["serverInfo"]["version"], env!("CARGO_PKG_VERSION"));
        assert!(result["capabilities"]["tools"].is_object());
    }

    #[tokio::test]
    async fn test_ping() {
        let responses = exchange(&[json!({ "jsonrpc": "2.0", "id": 1, "method": "ping" })]).await;
        assert_eq!(responses[1]["id"], 1);
        assert_eq!(responses[1]["result"], json!({}));
    }

    #[tokio::test]
    async fn test_tools_list_sorted() {
        let responses = exchange(&[json!({ "jsonrpc": "2.0", "id": 1, "method": "tools/list" })]).await;
        let tools = responses[1]["result"]["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 13);
        assert_eq!(tools[0]["name"], "game_get_full_profile");
        assert_eq!(tools[0]["inputSchema"]["type"], "object");

        let names: Vec<&str> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }

    #[tokio::test]
    async fn test_tools_call_success_and_error() {
        let responses = exchange(&[
            json!({ "jsonrpc": "2.0", "id": 1, "method": "tools/call",
                    "params": { "name": "steam_search_game", "arguments": { "query": "portal" } } }),
            json!({ "jsonrpc": "2.0", "id": 2, "method": "tools/call",
                    "params": { "name": "game_get_full_profile", "arguments": { "query": "zelda" } } }),
            json!({ "jsonrpc": "2.0", "id": 3, "method": "tools/call", "params": { "name": "steam_list_genres" } }),
        ])
        .await;

        let ok = &responses[1]["result"];
        assert_eq!(ok["isError"], false);
        assert_eq!(ok["content"][0]["type"], "text");
        let text: Value = serde_json::from_str(ok["content"][0]["text"].as_str().unwrap()).unwrap();
        assert_eq!(text["count"], 2);

        let failed = &responses[2]["result"];
        assert_eq!(failed["isError"], true);
        assert_eq!(
            failed["content"][0]["text"],
            "Error: Not found: no storefront match for query 'zelda'"
        );

        let no_arguments = &responses[3]["result"];
        assert_eq!(no_arguments["isError"], false);
    }

    #[tokio::test]
    async fn test_unknown_tool_is_reported_in_band() {
        let responses = exchange(&[json!({ "jsonrpc": "2.0", "id": 1, "method": "tools/call",
                                           "params": { "name": "steam_get_wishlist", "arguments": {} } })])
        .await;

        let result = &responses[1]["result"];
        assert_eq!(result["isError"], true);
        assert_eq!(result["content"][0]["text"], "Error: Unknown tool: steam_get_wishlist");
    }

    #[test]
    fn test_advertised_tool_keeps_schema() {
        let tool = advertised(ToolDefinition {
            name: "steam_get_news".to_string(),
            description: "News".to_string(),
            input_schema: json!({ "type": "object", "required": ["appid"] }),
        });
        assert_eq!(tool.name, "steam_get_news");
        assert_eq!(tool.input_schema.get("required"), Some(&json!(["appid"])));
    }
}

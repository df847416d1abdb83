//! MCP (Model Context Protocol) surface
//!
//! JSON-RPC framing and the handshake come from rmcp; `server` maps
//! `tools/list` and `tools/call` onto the ToolExecutor.

pub mod server;

pub use server::McpServer;

//! MCP (Model Context Protocol) server for Linear.
//!
//! Exposes Linear issues and teams to AI assistants as MCP tools and
//! resources over JSON-RPC 2.0 on stdio.

pub mod handlers;
pub mod protocol;
pub mod resources;
pub mod server;
pub mod tools;
pub mod transport;

pub use server::McpServer;

//! MCP server providing sandboxed filesystem tools rooted at a movable
//! base directory.
//!
//! All relative paths are resolved against a single base directory that can
//! be swapped at runtime via the `setBaseDirectory` tool. Every tool call
//! returns exactly one text payload: successes read `Successfully ...` (or
//! carry the requested listing/content), failures read `Error: ...`. Callers
//! pattern-match on those prefixes; nothing structured distinguishes the two.

use rmcp::{
    ServerHandler,
    handler::server::router::tool::ToolRouter,
    model::{Implementation, ServerCapabilities, ServerInfo},
    tool_handler,
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

pub mod error;
pub mod sandbox;
pub mod tools;
pub mod walker;

/// Environment variable naming the initial base directory.
pub const BASE_DIR_ENV: &str = "MCP_FILESYSTEM_BASE_DIR";

/// Fallback base directory when neither the CLI nor the environment
/// supplies one.
pub const DEFAULT_BASE_DIR: &str = "./uploads";

/// MCP filesystem server confined to one movable base directory.
///
/// The base directory is created lazily before every dispatch, so it only
/// needs to be creatable, not present, at startup.
#[derive(Debug, Clone)]
pub struct SandboxServer {
    pub(crate) root: Arc<RwLock<PathBuf>>,
    pub(crate) tool_router: ToolRouter<Self>,
}

#[tool_handler]
impl ServerHandler for SandboxServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "mcp-sandbox-fs".into(),
                title: Some("Sandboxed Filesystem Server".into()),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            instructions: Some(
                "File operations sandboxed to a movable base directory. \
                 All paths are relative to the base directory."
                    .into(),
            ),
        }
    }
}

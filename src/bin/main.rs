//! Binary entry point for the mcp-sandbox-fs server.

use clap::Parser;
use mcp_sandbox_fs::{BASE_DIR_ENV, DEFAULT_BASE_DIR, SandboxServer};
use rmcp::ServiceExt;

/// Sandboxed filesystem MCP server over stdio.
#[derive(Parser)]
#[command(name = "mcp-sandbox-fs", version, about)]
struct Cli {
    /// Base directory for all file operations. Falls back to the
    /// MCP_FILESYSTEM_BASE_DIR environment variable, then ./uploads.
    base_dir: Option<std::path::PathBuf>,
}

#[tokio::main]
async fn main() {
    if std::env::var_os("RUST_LOG").is_some() {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .init();
    }
    let cli = Cli::parse();
    let base = cli
        .base_dir
        .or_else(|| std::env::var_os(BASE_DIR_ENV).map(Into::into))
        .unwrap_or_else(|| DEFAULT_BASE_DIR.into());
    tracing::info!(base = %base.display(), "filesystem server starting on stdio");

    let server = SandboxServer::new(base);
    let transport = rmcp::transport::stdio();
    server
        .serve(transport)
        .await
        .expect("failed to start server")
        .waiting()
        .await
        .expect("server error");
}

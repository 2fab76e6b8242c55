//! Linear context server - CLI entry point.
//!
//! `serve` (the default) speaks MCP over stdio; `issues` and `teams` print
//! the same projections directly for quick inspection.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use linear_context_api::LinearClient;
use linear_context_core::config::{api_key_from_env, Config};
use linear_context_core::{IssueSummary, IssueTracker};
use linear_context_mcp::McpServer;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "linear-context-server")]
#[command(author, version, about = "MCP server exposing Linear issues and teams", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the MCP server over stdio
    Serve,

    /// Print issues assigned to the authenticated user
    Issues,

    /// Print teams the authenticated user belongs to
    Teams,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // stdout carries the JSON-RPC stream; all logging goes to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let api_key = api_key_from_env()?;
    let config = Config::load()?;

    let tracker: Arc<dyn IssueTracker> = match config.api_url {
        Some(url) => Arc::new(LinearClient::with_endpoint(url, api_key)),
        None => Arc::new(LinearClient::new(api_key)),
    };

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            tracing::info!("Linear MCP server running on stdio");
            let mut server = McpServer::new(tracker);
            server.run().await?;
        }
        Commands::Issues => {
            let issues = tracker.assigned_issues().await?;
            let summaries: Vec<IssueSummary> = issues.iter().map(IssueSummary::from).collect();
            println!("{}", serde_json::to_string_pretty(&summaries)?);
        }
        Commands::Teams => {
            let teams = tracker.teams().await?;
            println!("{}", serde_json::to_string_pretty(&teams)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}

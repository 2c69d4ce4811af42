//! Paper Lookup MCP Server - Entry Point

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use paper_lookup_mcp::config::Config;
use paper_lookup_mcp::server::McpServer;
use paper_lookup_mcp::tools::ToolContext;

#[derive(Parser, Debug)]
#[command(name = "paper-lookup-mcp")]
#[command(about = "MCP server for looking up research papers on OpenAlex and arXiv")]
#[command(version)]
struct Cli {
    /// Contact email sent to OpenAlex (opts into the polite pool's higher rate limits)
    #[arg(long, env = "PAPER_LOOKUP_MAILTO")]
    mailto: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn init_tracing(log_level: &str, json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        subscriber.with(tracing_subscriber::fmt::layer().compact()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        polite_pool = cli.mailto.is_some(),
        "Starting paper lookup MCP server"
    );

    let config = Config::new(cli.mailto);
    let ctx = ToolContext::from_config(&config)?;
    let server = McpServer::new(ctx);

    server.run_stdio().await
}

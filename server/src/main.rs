//! SheetDB example server
//!
//! Serves a one-page message board whose messages are stored as a single
//! JSON document in a spreadsheet, through a deployed web-hook script.
//!
//! Usage:
//!   sheetdb-server --url https://script.google.com/macros/s/<id>/exec --port 3000
//!
//! Without `--url` the board is kept in memory.

use anyhow::{Context, Result};
use clap::Parser;
use sheetdb_adapter::ErrorPolicy;
use sheetdb_server::{build_router, ServerConfig};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "sheetdb-server")]
#[command(about = "Example message board persisted to a spreadsheet")]
struct Args {
    /// Deployed web-hook script URL
    #[arg(short, long, env = "SHEETDB_URL")]
    url: Option<String>,

    /// Sheet (tab) holding the document
    #[arg(short, long, env = "SHEET_NAME")]
    sheet_name: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value = "3000")]
    port: u16,

    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    bind: String,

    /// Surface storage failures as HTTP 500 instead of falling back
    #[arg(long)]
    strict: bool,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .compact()
        .init();

    if args.url.is_none() {
        warn!("No --url given, messages are kept in memory only");
    }

    let config = ServerConfig {
        sheet_url: args.url,
        sheet_name: args.sheet_name,
        error_policy: if args.strict {
            ErrorPolicy::Strict
        } else {
            ErrorPolicy::Lenient
        },
    };
    let db = config.open().await.context("Failed to set up storage")?;

    let addr = format!("{}:{}", args.bind, args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server listening on {}", addr);

    axum::serve(listener, build_router(db))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await
        .context("HTTP server failed")?;

    Ok(())
}

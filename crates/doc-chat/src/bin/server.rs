//! Chat server binary
//!
//! Run with: cargo run -p doc-chat --bin doc-chat-server -- --config doc-chat.toml

use clap::Parser;
use doc_chat::{config::ChatConfig, server::ChatServer};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "doc-chat-server", version, about = "Chat server with document context")]
struct Args {
    /// TOML configuration file
    #[arg(short, long, env = "DOC_CHAT_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listen host
    #[arg(long)]
    host: Option<String>,

    /// Override the listen port
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "doc_chat=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    // Load configuration
    let mut config = ChatConfig::load(args.config.as_deref())?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    tracing::info!("Configuration loaded");
    tracing::info!("  - API key loaded: {}", config.llm.api_key.is_some());
    tracing::info!("  - Model: {}", config.llm.model);
    tracing::info!("  - Context budget: {:?}", config.context.budget);
    tracing::info!("  - Store: {:?}", config.store);
    if config.llm.api_key.is_none() {
        tracing::warn!("OPENAI_API_KEY is not set; completion requests will be unauthenticated");
    }

    // Create and start server
    let server = ChatServer::new(config)?;

    println!("\nServer starting...");
    println!("  API: http://{}", server.address());
    println!("\nEndpoints:");
    println!("  POST /ask        - Ask a question");
    println!("  POST /upload     - Upload a document");
    println!("  GET  /documents  - List documents");
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}

//! Chat server binary
//!
//! Run with: cargo run -p chatpdf --bin chatpdf-server

use std::path::PathBuf;

use chatpdf::{config::ChatConfig, server::ChatServer};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "chatpdf-server", version, about = "Chat with your PDFs over HTTP")]
struct Args {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to bind
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Ollama model used for answers
    #[arg(short, long)]
    model: Option<String>,

    /// Ollama base URL
    #[arg(long)]
    ollama_url: Option<String>,
}

impl Args {
    fn apply(self, config: &mut ChatConfig) {
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(model) = self.model {
            config.llm.model = model;
        }
        if let Some(url) = self.ollama_url {
            config.llm.base_url = url;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chatpdf=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    println!(
        r#"
╔═══════════════════════════════════════════════════════════╗
║                          ChatPDF                          ║
║         Ask questions about your PDFs with Ollama         ║
╚═══════════════════════════════════════════════════════════╝
"#
    );

    // File, then environment, then flags
    let mut config = ChatConfig::load(args.config.as_deref())?;
    config.apply_env_overrides()?;
    args.apply(&mut config);
    config.validate()?;

    tracing::info!("Configuration loaded");
    tracing::info!("  - LLM model: {}", config.llm.model);
    tracing::info!("  - Chunk size: {}", config.chunking.chunk_size);
    tracing::info!("  - Top K: {}", config.retrieval.top_k);
    tracing::info!("  - Request timeout: {}s", config.llm.timeout_secs);

    let server = ChatServer::new(config.clone())?;

    tracing::info!("Checking Ollama at {}...", config.llm.base_url);
    match server.state().pipeline().llm().health_check().await {
        Ok(true) => tracing::info!("Ollama is running"),
        _ => {
            tracing::warn!("Ollama not available at {}", config.llm.base_url);
            tracing::warn!("Please start Ollama:");
            tracing::warn!("  1. Start: ollama serve");
            tracing::warn!("  2. Pull the model: ollama pull {}", config.llm.model);
        }
    }

    println!("\nServer starting...");
    println!("  API: http://{}", server.address());
    println!("  Health: http://{}/health", server.address());
    println!("  API Info: http://{}/api/info", server.address());
    println!("\nEndpoints:");
    println!("  POST /api/sessions                - Start a session");
    println!("  PUT  /api/sessions/:id/documents  - Upload PDFs");
    println!("  POST /api/sessions/:id/chat       - Ask a question");
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;
use toolshed::app::web::chat;
use toolshed::utils::logger;
use toolshed::ToolshedConfig;
use tower_http::trace::TraceLayer;

#[derive(Parser)]
#[command(name = "chatbot")]
#[command(about = "Keyword chatbot served over HTTP")]
struct Args {
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address, overrides [web] bind
    #[arg(short, long)]
    bind: Option<String>,

    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_server_logger(args.verbose);

    let config = ToolshedConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    let app = chat::router().layer(TraceLayer::new_for_http());

    let addr = args.bind.unwrap_or_else(|| config.web.bind.clone());
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("🤖 Chatbot listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

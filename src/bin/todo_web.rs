use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;
use toolshed::app::web::todo;
use toolshed::core::todo::TodoStore;
use toolshed::utils::logger;
use toolshed::{LocalStorage, ToolshedConfig};
use tower_http::trace::TraceLayer;

#[derive(Parser)]
#[command(name = "todo-web")]
#[command(about = "Browser front-end for the shared to-do list")]
struct Args {
    /// Configuration file (defaults to ./toolshed.toml when present)
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
    let store = TodoStore::new(LocalStorage::default(), config.todo_path());
    let app = todo::router(store).layer(TraceLayer::new_for_http());

    let addr = args.bind.unwrap_or_else(|| config.web.bind.clone());
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("📝 To-do list listening on http://{}", addr);
    tracing::info!("📁 Tasks stored in {}", config.todo_path().display());

    axum::serve(listener, app).await?;
    Ok(())
}

use clap::Parser;
use toolshed::app::tools;
use toolshed::utils::logger;
use toolshed::{Cli, ToolshedConfig};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // logging first so config errors are traced
    logger::init_cli_logger(cli.verbose);

    let config = match ToolshedConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    };
    tracing::debug!("Configuration: {:?}", config);

    if let Err(e) = tools::run(cli.command, &config).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ Error: {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }
}

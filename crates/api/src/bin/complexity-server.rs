//! Complexity analyzer server entry point
//!
//! Loads configuration (file, then `.env`/environment for the credential)
//! and serves the HTTP API.

use anyhow::{Context, Result};
use clap::Parser;
use complexity_common::SystemConfig;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "complexity-server")]
#[command(version)]
#[command(about = "Big-O complexity analysis service")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Host to bind to
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to
    #[arg(long, env = "PORT")]
    port: Option<u16>,

    /// Validate configuration and exit
    #[arg(long)]
    check_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is normal outside development
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let log_level = cli.log_level.as_deref().unwrap_or("info");
    complexity_common::init_tracing_with_level(log_level)?;

    info!("Complexity analyzer v{} starting", env!("CARGO_PKG_VERSION"));

    let mut config = SystemConfig::load_config(&cli.config)
        .map_err(|e| {
            error!("Failed to load configuration: {}", e);
            e
        })
        .with_context(|| format!("failed to load configuration from {}", cli.config))?;

    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    config.validate()?;

    if cli.check_config {
        println!("✓ Configuration is valid");
        println!("  Listen:     {}:{}", config.server.host, config.server.port);
        println!("  Model:      {}", config.model.model);
        println!("  Credential: {}", if config.model.has_credential() { "set" } else { "missing" });
        println!("  Toolchain:  {} {}", config.harness.program, config.harness.args.join(" "));
        return Ok(());
    }

    complexity_api::ApiServer::new(config)
        .context("failed to initialize analyzer")?
        .run()
        .await
}

//! TrustShield - Multi-Signal Fraud Detection Engine
//!
//! Scans messages, URLs, documents and payment screenshots, blending a
//! semantic oracle with deterministic rule checks into one trust verdict.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use trustshield::analyzer::Analyzer;
use trustshield::api::build_app;
use trustshield::config::{resolve_secret, TrustShieldConfig};

#[derive(Parser)]
#[command(name = "trustshield")]
#[command(version)]
#[command(about = "Multi-signal fraud detection for messages, URLs, documents and payments")]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "TRUSTSHIELD_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TrustShield API server
    Serve {
        /// Host to bind to (overrides the configuration file)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides the configuration file)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Run diagnostics
    Doctor,

    /// Show configuration
    Config {
        /// Show default configuration
        #[arg(long)]
        default: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("trustshield={},tower_http=debug", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = if let Some(config_path) = cli.config {
        let content = std::fs::read_to_string(&config_path)?;
        toml::from_str(&content)?
    } else {
        TrustShieldConfig::default()
    };

    match cli.command {
        Commands::Serve { host, port } => {
            run_serve(config, host, port).await?;
        }
        Commands::Doctor => {
            run_doctor(&config)?;
        }
        Commands::Config { default } => {
            show_config(if default { None } else { Some(&config) })?;
        }
    }

    Ok(())
}

async fn run_serve(
    mut config: TrustShieldConfig,
    host: Option<String>,
    port: Option<u16>,
) -> Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    tracing::info!(model = %config.oracle.model, "Starting TrustShield");
    if resolve_secret(&config.oracle.api_key_ref).is_none() {
        tracing::warn!(
            key_ref = %config.oracle.api_key_ref,
            "oracle API key not set; scans will serve ERROR verdicts"
        );
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let cors_origins = config.server.cors_origins.clone();
    let analyzer = Analyzer::from_config(config);
    let app = build_app(Arc::new(analyzer), &cors_origins);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "TrustShield is listening. Press Ctrl+C to stop.");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("Shutting down...");
}

fn run_doctor(config: &TrustShieldConfig) -> Result<()> {
    println!("🔍 TrustShield Doctor");
    println!();

    println!("Checking oracle credentials...");
    match resolve_secret(&config.oracle.api_key_ref) {
        Some(_) => println!("  ✓ {} is set", config.oracle.api_key_ref),
        None => println!(
            "  ✗ {} not set (scans will serve ERROR verdicts)",
            config.oracle.api_key_ref
        ),
    }
    println!("  Model: {}", config.oracle.model);
    println!("  Endpoint: {}", config.oracle.base_url);

    println!();
    println!("Checking collector credentials...");
    match resolve_secret(&config.collectors.safe_browsing_key_ref) {
        Some(_) => println!("  ✓ {} is set", config.collectors.safe_browsing_key_ref),
        None => println!(
            "  ℹ {} not set (reputation lookups report unknown)",
            config.collectors.safe_browsing_key_ref
        ),
    }

    println!();
    println!("Checking configuration...");
    match std::env::var("TRUSTSHIELD_CONFIG") {
        Ok(path) if std::path::Path::new(&path).exists() => {
            println!("  ✓ Configuration file found: {}", path);
        }
        Ok(path) => println!("  ✗ TRUSTSHIELD_CONFIG points at a missing file: {}", path),
        Err(_) => println!("  ℹ No configuration file set (using defaults)"),
    }

    println!();
    println!("Doctor check complete!");

    Ok(())
}

fn show_config(config: Option<&TrustShieldConfig>) -> Result<()> {
    let config = config.cloned().unwrap_or_default();
    let toml = toml::to_string_pretty(&config)?;
    println!("{}", toml);
    Ok(())
}

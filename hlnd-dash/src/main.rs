//! hlnd-dash - Hyperlocal news dashboard service
//!
//! Loads the processed article CSV once, then serves filtered metrics,
//! tables and map points over HTTP until shut down.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use hlnd_common::config::{default_config_path, load_toml_config, resolve_dataset_path};
use hlnd_common::RecordStore;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hlnd_dash::{build_router, AppState};

/// Command-line arguments for hlnd-dash
#[derive(Parser, Debug)]
#[command(name = "hlnd-dash")]
#[command(about = "Hyperlocal news dashboard service")]
#[command(version)]
struct Args {
    /// Processed articles CSV (overrides HLND_DATASET and the config file)
    #[arg(short, long)]
    dataset: Option<PathBuf>,

    /// TOML config file
    #[arg(short, long, env = "HLND_CONFIG")]
    config: Option<PathBuf>,

    /// Port to listen on (overrides the config file)
    #[arg(short, long, env = "HLND_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config is read before tracing starts so its log level can apply;
    // problems are reported once the subscriber is up
    let config_path = args.config.clone().or_else(default_config_path);
    let config_result = config_path.as_deref().map(load_toml_config);
    let log_level = match &config_result {
        Some(Ok(config)) => config.logging.level.clone(),
        _ => "info".to_string(),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("hlnd_dash={0},hlnd_common={0},tower_http=info", log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting hlnd-dash v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let config = match config_result {
        Some(result) => result.context("Failed to load configuration")?,
        None => {
            warn!("No config directory on this platform, using built-in defaults");
            Default::default()
        }
    };

    let dataset_path = resolve_dataset_path(args.dataset.as_deref(), &config);
    let store = match RecordStore::load(&dataset_path) {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to load dataset: {}", e);
            return Err(e).context("Dataset is required to start the dashboard");
        }
    };

    let state = AppState::new(store, config.dashboard);
    let app = build_router(state);

    let port = args.port.unwrap_or(config.port);
    let addr: SocketAddr = format!("{}:{}", config.bind_host, port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", config.bind_host, port))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("hlnd-dash listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install terminate handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}

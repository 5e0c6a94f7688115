//! Students API server.
//!
//! Usage:
//!   students-api --config config/local.yaml
//!
//! `CONFIG_PATH`, when set, takes precedence over `--config`.

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use students_api::{
    build_router, config_path_from_env, serve, shutdown_signal, AppConfig, SHUTDOWN_DEADLINE,
};
use students_db::SqliteStorage;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "students-api")]
#[command(about = "HTTP API for student records")]
struct Args {
    /// Path to the YAML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    let config_path = config_path_from_env(args.config);
    let config = AppConfig::load(config_path.as_deref()).context("failed to load config")?;

    let storage = SqliteStorage::open(&config.storage_path).with_context(|| {
        format!("failed to create storage at {}", config.storage_path.display())
    })?;
    info!(
        env = %config.env,
        version = env!("CARGO_PKG_VERSION"),
        "storage created"
    );

    let address = &config.http_server.address;
    let listener = TcpListener::bind(address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
    info!(%address, "starting server");

    let app = build_router(Arc::new(storage));
    serve(listener, app, shutdown_signal(), SHUTDOWN_DEADLINE)
        .await
        .context("server shutdown failed")?;

    info!("server exited properly");
    Ok(())
}

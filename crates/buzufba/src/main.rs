//! buzufba daemon
//!
//! Read-only HTTP API serving bus routes and their departures

use std::path::PathBuf;
use std::sync::Arc;

use buzufba_db::PgRouteRepository;
use clap::Parser;
use color_eyre::Result;
use eyre::WrapErr;
use tracing::{error, info, warn};

mod api;
mod config;
mod router;
mod state;
mod telemetry;

use crate::config::Config;
use crate::state::AppState;

#[derive(Parser)]
#[command(name = "buzufba")]
#[command(about = "Bus route API server", long_about = None)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, env = "BUZUFBA_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let source = cli.config.or_else(Config::locate);
    let config = match &source {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    }
    .with_database_url(std::env::var("DATABASE_URL").ok());

    telemetry::init(&config.daemon)?;
    match &source {
        Some(path) => info!(path = %path.display(), "configuration loaded"),
        None => warn!("no config file found, using defaults"),
    }

    let repository = PgRouteRepository::connect(&config.database.pool_config()?)
        .await
        .wrap_err("failed to connect to the route store")?;
    if config.database.run_migrations {
        repository.migrate().await?;
    }
    if config.database.seed {
        repository
            .seed()
            .await
            .wrap_err("failed to seed the route store")?;
    }

    let bind = config.daemon.bind.clone();
    let state = Arc::new(AppState::new(Arc::new(repository), config));
    info!(backend = state.routes.backend(), "route store ready");
    let app = router::create_router(state);

    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .wrap_err_with(|| format!("failed to bind {bind}"))?;
    info!(%bind, "HTTP server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
    }
}

//! nbadle-gs - NBA-dle game server
//!
//! Picks one player per day from the roster and scores guesses against it.
//! Default port: 5730

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use nbadle_common::config::{resolve_config_path, TomlConfig, CONFIG_ENV_VAR};
use nbadle_common::time::LocalClock;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use nbadle_gs::roster::PlayerRoster;
use nbadle_gs::services::{RetryPolicy, StatsApiClient};
use nbadle_gs::{build_router, AppState};

/// Command-line arguments for nbadle-gs
#[derive(Parser, Debug)]
#[command(name = "nbadle-gs")]
#[command(about = "NBA-dle daily player guessing game server")]
#[command(version)]
struct Args {
    /// Path to the TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on (overrides config file)
    #[arg(short, long, env = "NBADLE_PORT")]
    port: Option<u16>,

    /// Player roster JSON file (overrides config file)
    #[arg(short, long, env = "NBADLE_ROSTER")]
    roster: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = resolve_config_path(args.config.as_deref(), CONFIG_ENV_VAR);
    let mut config =
        TomlConfig::load_or_default(config_path.as_deref()).context("Failed to load configuration")?;
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(roster) = args.roster {
        config.roster_path = roster;
    }

    // Initialize tracing (RUST_LOG wins over the config file level)
    let level = &config.logging.level;
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "nbadle_gs={level},nbadle_common={level},tower_http={level}"
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting NBA-dle game server (nbadle-gs) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    match &config_path {
        Some(path) if path.exists() => info!("Configuration: {}", path.display()),
        Some(path) => warn!(
            "Config file {} not found, using compiled defaults",
            path.display()
        ),
        None => info!("No config directory available, using compiled defaults"),
    }

    let roster = match PlayerRoster::from_json_file(&config.roster_path) {
        Ok(roster) => roster,
        Err(e) => {
            error!("Failed to load roster {}: {}", config.roster_path.display(), e);
            return Err(e).context("Failed to load player roster");
        }
    };
    info!(
        players = roster.len(),
        active = roster.active_count(),
        "Roster loaded from {}",
        config.roster_path.display()
    );
    if roster.is_empty() {
        warn!("Roster file contains no players; daily selection will fail");
    } else if roster.active_count() == 0 {
        warn!("Roster has no active players; daily selection will fail");
    }

    let provider = StatsApiClient::new(&config.stats_api).context("Failed to build stats client")?;
    let policy = RetryPolicy::from(&config.stats_api);
    info!(
        base_url = %config.stats_api.base_url,
        max_attempts = policy.max_attempts,
        "Stats service client ready"
    );

    let state = AppState::new(
        Arc::new(roster),
        Arc::new(provider),
        policy,
        Arc::new(LocalClock),
    );
    let app = build_router(state);

    let addr = format!("{}:{}", config.bind_address, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("Listening on http://{}", addr);
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
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
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

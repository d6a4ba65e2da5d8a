//! Wordle Server - Unified CLI
//!
//! Runs the HTTP game server or scores a single guess offline.

#![warn(missing_docs)]

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;
use wordle_core::{RandomSource, SeededRandom, ThreadRandom};
use wordle_server::{AppState, Cli, Command, GameService, MemorySessionStore, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            port,
            host,
            config,
            seed,
        } => run_http_server(config, host, port, seed).await,
        Command::Score { guess, secret } => run_score(&guess, &secret),
    }
}

/// Run the HTTP game server
async fn run_http_server(
    config_path: Option<PathBuf>,
    host: Option<String>,
    port: Option<u16>,
    seed: Option<u64>,
) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,wordle_server=debug")),
        )
        .init();

    let config = load_config(config_path.as_deref())?.with_address(host, port);

    let random: Arc<dyn RandomSource> = match seed {
        Some(seed) => {
            info!(seed, "Using seeded word selection");
            Arc::new(SeededRandom::new(seed))
        }
        None => Arc::new(ThreadRandom),
    };

    let game = GameService::new(
        config.rules(),
        config.word_list()?,
        Arc::new(MemorySessionStore::with_capacity(*config.max_sessions())),
        random,
    );
    let app = wordle_server::router(AppState::new(game, config.cookie_name()));

    let listener = tokio::net::TcpListener::bind((config.host().as_str(), *config.port())).await?;
    info!(
        "Server ready at http://{}:{}/",
        config.host(),
        config.port()
    );
    info!("Endpoints: POST /check, POST /restart");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

#[instrument]
fn load_config(path: Option<&std::path::Path>) -> Result<ServerConfig> {
    match path {
        Some(path) => Ok(ServerConfig::from_file(path)?),
        None => {
            info!("No config file given, using defaults");
            Ok(ServerConfig::default())
        }
    }
}

/// Print feedback for one guess
fn run_score(guess: &str, secret: &str) -> Result<()> {
    println!("{}", wordle_server::score_json(guess, secret)?);
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

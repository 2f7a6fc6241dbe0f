mod app;
mod cache;
mod config;
mod handlers;
mod lookup;
mod seeder;
mod state;
mod storage;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use listenfd::ListenFd;
use tokio::{net::TcpListener, signal};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    app::create_app,
    cache::MemoryCache,
    config::Config,
    seeder::{SeedOutcome, Seeder},
    state::AppState,
    storage::Store,
};

/// PDP - Product detail lookups backed by a read-through cache
#[derive(Parser, Debug)]
#[command(name = "pdp")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Host address to bind the server to
    #[arg(long, short = 'H', default_value = "0.0.0.0", env = "HOST")]
    host: String,

    /// Port to listen on
    #[arg(long, short, default_value = "3000", env = "PORT")]
    port: u16,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Insert the sample products if the store is empty
    Seed,
    /// Delete every product
    Clear,
    /// Manage Postgres schema migrations
    Migrate {
        #[command(subcommand)]
        action: MigrateAction,
    },
}

#[derive(Subcommand, Debug)]
enum MigrateAction {
    /// Revert the most recently applied migration
    Revert,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pdp=debug,tower_http=debug,sqlx::query=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("Invalid configuration")?;
    let store = Store::open(&config.store).await?;

    let outcome = match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(&cli.host, cli.port, &config, &store).await,
        Command::Seed => seed(&store).await,
        Command::Clear => clear(&store).await,
        Command::Migrate {
            action: MigrateAction::Revert,
        } => revert_migration(&store).await,
    };

    store.close().await;
    outcome
}

async fn serve(host: &str, port: u16, config: &Config, store: &Store) -> Result<()> {
    let cache = Arc::new(MemoryCache::new(config.cache.max_entries));
    let state = AppState::new(store.repository(), cache, config.cache.ttl);

    tracing::info!(
        backend = %store.backend(),
        cache_ttl_ms = config.cache.ttl.as_millis() as u64,
        cache_max_entries = config.cache.max_entries.get(),
        "Application state initialized"
    );

    // Build the application router
    let app = create_app(state, &config.cors_origins);

    // Auto-reload support via listenfd
    let mut listenfd = ListenFd::from_env();
    let listener = match listenfd.take_tcp_listener(0)? {
        // If we are given a tcp listener on listen fd 0, use that one
        Some(listener) => {
            listener.set_nonblocking(true)?;
            TcpListener::from_std(listener)?
        }
        // Otherwise fall back to CLI-specified host:port
        None => {
            let addr = format!("{host}:{port}");
            TcpListener::bind(&addr).await?
        }
    };

    tracing::info!("listening on {}", listener.local_addr()?);

    // Run the server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn seed(store: &Store) -> Result<()> {
    match Seeder::new(store.repository()).seed_products().await? {
        SeedOutcome::Seeded(count) => println!("Seeded {count} products"),
        SeedOutcome::Skipped { existing } => {
            println!("Store already holds {existing} products, nothing to do")
        }
    }
    Ok(())
}

async fn clear(store: &Store) -> Result<()> {
    let deleted = Seeder::new(store.repository()).clear_products().await?;
    println!("Deleted {deleted} products");
    Ok(())
}

async fn revert_migration(store: &Store) -> Result<()> {
    match store.revert_last_migration().await? {
        Some(version) => println!("Reverted migration {version}"),
        None => println!("No applied migrations to revert"),
    }
    Ok(())
}

/// Wait for shutdown signals (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
    }
}

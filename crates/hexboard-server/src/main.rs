//! Hexboard viewer server.

use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod protocol;
mod server;
mod session;

use config::ServerConfig;
use server::ServerState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Refuse to start on a malformed board config
    let config = ServerConfig::from_env()?;

    info!(
        "Starting Hexboard server with the {} board...",
        config.board.variant.name()
    );

    let state = Arc::new(ServerState::new(config.board));

    server::run_server(config.addr, state).await
}

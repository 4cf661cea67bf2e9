//! # HTTP Mock Server CLI
//!
//! Runs the admin API and the mock-serving endpoint side by side over one
//! in-memory store, optionally seeded from a YAML file.

use std::future::IntoFuture;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use http_mock_rs::http::{build_admin_router, build_mock_router, AppState};
use http_mock_rs::seed::SeedBook;
use http_mock_rs::storage::MemoryStore;

mod cli;

use cli::Cli;

#[tokio::main]
async fn main() -> io::Result<()> {
    // Initialize logging
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(env_filter).init();

    // Parse CLI arguments
    let cli = Cli::parse();

    let store = Arc::new(MemoryStore::new());
    let state = AppState::builder().with_store(store).build()?;

    if let Some(path) = &cli.seed {
        SeedBook::load_from_path(path)
            .and_then(|book| book.apply(&state.admin))
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    }

    let admin_addr: SocketAddr = cli.admin_listen.parse().map_err(io::Error::other)?;
    let mock_addr: SocketAddr = cli.mock_listen.parse().map_err(io::Error::other)?;

    let admin_listener = tokio::net::TcpListener::bind(admin_addr).await?;
    let mock_listener = tokio::net::TcpListener::bind(mock_addr).await?;

    tracing::info!("starting admin api on http://{admin_addr}");
    tracing::info!("starting mock endpoint on http://{mock_addr}");

    // Either server stopping ends the process.
    tokio::select! {
        res = axum::serve(admin_listener, build_admin_router(state.clone())).into_future() => res,
        res = axum::serve(mock_listener, build_mock_router(state)).into_future() => res,
    }
}

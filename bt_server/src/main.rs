//! Shared-table blackjack server.
//!
//! Spawns a single TableActor and serves it over HTTP/WebSocket.

use std::net::SocketAddr;

use anyhow::Error;
use blackjack_table::table::TableActor;
use bt_server::{
    api,
    config::{DEFAULT_BIND, ServerConfig},
    logging,
};
use log::info;
use pico_args::Arguments;

const HELP: &str = "\
Run a shared-table blackjack server

USAGE:
  bt_server [OPTIONS]

OPTIONS:
  --bind       IP:PORT     Server socket bind address  [default: env SERVER_BIND, 0.0.0.0:$PORT or 0.0.0.0:3000]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  SERVER_BIND              Server bind address (e.g., 0.0.0.0:8080)
  PORT                     Port to listen on when SERVER_BIND is unset
  TABLE_INBOX_CAPACITY     Actions queued for the table before senders wait [default: 256]
  PARTICIPANT_BUFFER       Updates buffered per connection before dropping [default: 64]
  RUST_LOG                 Log filter
";

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let bind_override: Option<SocketAddr> = pargs
        .opt_value_from_str("--bind")
        .map_err(|e| anyhow::anyhow!("Invalid --bind (expected IP:PORT like {DEFAULT_BIND}): {e}"))?;

    logging::init();

    let config = ServerConfig::from_env(bind_override)?;
    config.validate()?;

    let (actor, table) = TableActor::new(config.table);
    tokio::spawn(actor.run());

    let app = api::create_router(api::AppState { table });

    info!("Starting HTTP/WebSocket server on {}", config.bind);
    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", config.bind, e))?;

    info!(
        "Server is running at http://{}. Press Ctrl+C to stop.",
        config.bind
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    info!("Shutting down server...");

    Ok(())
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to install CTRL+C signal handler: {}", e);
        std::future::pending::<()>().await;
    }
}

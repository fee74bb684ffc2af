//! HTTP/WebSocket API for the blackjack server.
//!
//! Every route shares one [`TableHandle`], so all connections play at the same
//! table and see the same broadcasts.
//!
//! # Endpoints
//!
//! ```text
//! GET /ws             - WebSocket session (gameAction in, gameStateUpdate out)
//! GET /health         - Health check (public)
//! GET /api/v1/state   - Current game state snapshot
//! ```
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use blackjack_table::table::{TableActor, TableConfig};
//! use bt_server::api::{AppState, create_router};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let (actor, table) = TableActor::new(TableConfig::default());
//! tokio::spawn(actor.run());
//!
//! let app = create_router(AppState { table });
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # CORS
//!
//! CORS is configured permissively for development. In production, configure
//! appropriate origins, methods, and headers.

pub mod websocket;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
};
use blackjack_table::table::TableHandle;
use serde::Serialize;
use tower_http::cors::CorsLayer;

/// Application state shared across all HTTP handlers and WebSocket connections.
#[derive(Clone)]
pub struct AppState {
    pub table: TableHandle,
}

/// Health check response body
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub players: usize,
    pub participants: usize,
    pub timestamp: String,
}

/// Create the API router with all endpoints and middleware.
pub fn create_router(state: AppState) -> Router {
    let v1_routes = Router::new().route("/state", get(game_state));

    Router::new()
        .route("/health", get(health_check))
        .route("/ws", get(websocket::websocket_handler))
        .nest("/api/v1", v1_routes)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint for monitoring and load balancers.
///
/// Returns `200 OK` while the table actor answers, `503 Service Unavailable`
/// once it has stopped.
///
/// ```bash
/// curl http://localhost:3000/health
/// # {"status":"healthy","version":"0.1.0","players":2,"participants":3,"timestamp":"..."}
/// ```
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let (status_code, status, stats) = match state.table.stats().await {
        Ok(stats) => (StatusCode::OK, "healthy", Some(stats)),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "unhealthy", None)
        }
    };

    let response = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        players: stats.as_ref().map_or(0, |s| s.players),
        participants: stats.as_ref().map_or(0, |s| s.participants),
        timestamp: chrono::Utc::now().to_rfc3339(),
    };

    (status_code, Json(response))
}

/// Current game state, in the same shape as a `gameStateUpdate` payload.
async fn game_state(State(state): State<AppState>) -> Response {
    match state.table.state().await {
        Ok(game) => Json(game).into_response(),
        Err(e) => (StatusCode::SERVICE_UNAVAILABLE, e.to_string()).into_response(),
    }
}

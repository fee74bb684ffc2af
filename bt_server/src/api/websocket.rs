//! WebSocket handler for the shared table.
//!
//! # Connection Flow
//!
//! 1. Client connects via `GET /ws`
//! 2. Server assigns a connection id and registers it with the table
//! 3. The table greets the client with `connected` and a state snapshot
//! 4. Every `gameAction` frame is forwarded to the table; the resulting state
//!    is broadcast to all participants as `gameStateUpdate`
//! 5. On disconnect, players joined under the connection id are removed
//!
//! # Example
//!
//! ```javascript
//! const ws = new WebSocket('ws://localhost:3000/ws');
//! let me;
//!
//! ws.onmessage = (msg) => {
//!   const { event, data } = JSON.parse(msg.data);
//!   if (event === 'connected') me = data.connectionId;
//!   if (event === 'gameStateUpdate') render(data);
//! };
//!
//! ws.send(JSON.stringify({
//!   event: 'gameAction',
//!   data: { type: 'JOIN', playerId: me, playerName: 'Alice' },
//! }));
//! ```

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::Response,
};
use blackjack_table::messages::ClientEvent;
use futures_util::{SinkExt, StreamExt};
use log::{debug, error, info, warn};
use uuid::Uuid;

use super::AppState;

/// Upgrade HTTP connection to WebSocket.
pub async fn websocket_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle an established WebSocket connection.
///
/// A send task drains the participant's event channel into the socket while
/// this task reads client frames. Either side ending tears down both.
async fn handle_socket(socket: WebSocket, state: AppState) {
    let connection_id = Uuid::new_v4().to_string();
    let (mut sender, mut receiver) = socket.split();

    let mut events = match state.table.connect(connection_id.clone()).await {
        Ok(rx) => rx,
        Err(e) => {
            error!("Failed to register connection {}: {}", connection_id, e);
            return;
        }
    };

    info!("WebSocket connected: {}", connection_id);

    let send_id = connection_id.clone();
    let mut send_task = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            let json = match event.encode() {
                Ok(json) => json,
                Err(e) => {
                    error!("Failed to encode {} for {}: {}", event, send_id, e);
                    continue;
                }
            };

            if sender.send(Message::Text(json.into())).await.is_err() {
                break;
            }
        }
    });

    loop {
        tokio::select! {
            msg = receiver.next() => match msg {
                Some(Ok(Message::Text(text))) => {
                    let action = match ClientEvent::decode(&text) {
                        Ok(event) => event.into_action(),
                        Err(e) => {
                            warn!("Dropping frame from {}: {}", connection_id, e);
                            continue;
                        }
                    };

                    debug!("Connection {} sent {}", connection_id, action);
                    if let Err(e) = state.table.act(connection_id.clone(), action).await {
                        error!("Table unavailable for {}: {}", connection_id, e);
                        break;
                    }
                }
                Some(Ok(Message::Close(_))) | None => {
                    info!("WebSocket closed: {}", connection_id);
                    break;
                }
                Some(Err(e)) => {
                    warn!("WebSocket error on {}: {}", connection_id, e);
                    break;
                }
                Some(Ok(_)) => {}
            },
            _ = &mut send_task => break,
        }
    }

    send_task.abort();

    if let Err(e) = state.table.disconnect(connection_id.clone()).await {
        warn!("Failed to unregister {}: {}", connection_id, e);
    }

    info!("WebSocket disconnected: {}", connection_id);
}

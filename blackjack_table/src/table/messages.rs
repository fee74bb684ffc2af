//! Table actor message types.

use crate::game::{Action, GameState};
use crate::net::messages::ServerEvent;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

/// Transport-level identity of one connected participant.
pub type ConnectionId = String;

/// Messages that can be sent to a TableActor
#[derive(Debug)]
pub enum TableMessage {
    /// Register a participant to receive state broadcasts
    Connect {
        connection_id: ConnectionId,
        sender: mpsc::Sender<ServerEvent>,
    },

    /// Apply a player action, then broadcast
    Action {
        connection_id: ConnectionId,
        action: Action,
    },

    /// Participant went away; drop its players, then broadcast
    Disconnect { connection_id: ConnectionId },

    /// Get current game state
    GetState {
        response: oneshot::Sender<Arc<GameState>>,
    },

    /// Get table counters
    GetStats {
        response: oneshot::Sender<TableStats>,
    },
}

/// Table counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableStats {
    /// Players in the roster
    pub players: usize,

    /// Connected participants
    pub participants: usize,

    /// Current game phase
    pub phase: String,
}

//! Event envelopes exchanged between participants and the table.

use serde::{Deserialize, Serialize};
use std::{fmt, sync::Arc};

use super::errors::{ProtocolError, Result};
use crate::game::{Action, GameState};

/// Events sent by a participant.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ClientEvent {
    /// Raw action payload. Kept undecoded so that payloads naming unknown
    /// action types still reach the table as no-ops.
    GameAction(serde_json::Value),
}

impl ClientEvent {
    pub fn decode(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(ProtocolError::Decode)
    }

    pub fn into_action(self) -> Action {
        match self {
            Self::GameAction(payload) => Action::from_payload(payload),
        }
    }
}

impl From<Action> for ClientEvent {
    fn from(action: Action) -> Self {
        // Action serialization is infallible: plain strings and options.
        Self::GameAction(serde_json::to_value(action).unwrap_or_default())
    }
}

/// Events sent by the table.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(
    tag = "event",
    content = "data",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum ServerEvent {
    /// Sent once, to the participant that just connected.
    Connected { connection_id: String },
    /// Full state snapshot, sent to everyone after every change.
    GameStateUpdate(Arc<GameState>),
}

impl ServerEvent {
    pub fn encode(&self) -> Result<String> {
        serde_json::to_string(self).map_err(ProtocolError::Encode)
    }

    pub fn decode(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(ProtocolError::Decode)
    }
}

impl fmt::Display for ServerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connected { connection_id } => write!(f, "connected as {connection_id}"),
            Self::GameStateUpdate(state) => write!(
                f,
                "state update ({}, {} players)",
                state.phase(),
                state.players().len()
            ),
        }
    }
}
